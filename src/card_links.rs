use crate::config::CardCatalogConfig;
use crate::loader::TableSource;
use crate::model::{CardLink, LinkError};
use crate::normalizer::word_overlap;
use crate::parser::CardCatalogParser;
use tracing::{info, warn};

/// Card product pages scraped from the card catalog, in page order.
#[derive(Debug, Clone)]
pub struct CardLinkDirectory {
    links: Vec<CardLink>,
    threshold: f64,
}

impl CardLinkDirectory {
    /// Later links with an already-seen name replace the earlier URL in place.
    pub fn from_links(links: impl IntoIterator<Item = CardLink>, threshold: f64) -> Self {
        let mut unique: Vec<CardLink> = Vec::new();
        for link in links {
            match unique.iter_mut().find(|l| l.name == link.name) {
                Some(existing) => existing.url = link.url,
                None => unique.push(link),
            }
        }
        Self {
            links: unique,
            threshold,
        }
    }

    /// Fetches and parses the catalog page.
    pub async fn fetch<S>(source: &S, config: &CardCatalogConfig) -> Result<Self, LinkError>
    where
        S: TableSource + ?Sized,
    {
        let url = config.catalog_url();
        info!("Fetching card catalog from {}", url);

        let html = source.fetch(&url).await?;
        let links = CardCatalogParser::new(config.base_url.as_str()).parse(&html)?;
        if links.is_empty() {
            warn!("No card links found at {}", url);
            return Err(LinkError::NoCards { url });
        }

        let directory = Self::from_links(links, config.match_threshold);
        info!("Found {} card links", directory.len());
        Ok(directory)
    }

    /// Exact name first, then the best word-overlap match above the threshold.
    pub fn find_link(&self, card_name: &str) -> Option<&str> {
        if let Some(link) = self.links.iter().find(|l| l.name == card_name) {
            return Some(&link.url);
        }

        let mut best: Option<&CardLink> = None;
        let mut best_score = 0.0;
        for link in &self.links {
            let score = word_overlap(card_name, &link.name);
            if score > best_score {
                best_score = score;
                best = Some(link);
            }
        }

        best.filter(|_| best_score >= self.threshold)
            .map(|l| l.url.as_str())
    }

    pub fn card_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.links.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, slug: &str) -> CardLink {
        CardLink {
            name: name.into(),
            url: format!("https://www.myrupaya.in/credit-card-products/{slug}"),
        }
    }

    fn directory() -> CardLinkDirectory {
        CardLinkDirectory::from_links(
            vec![
                link("Hdfc Regalia", "hdfc-regalia"),
                link("Hdfc Millennia", "hdfc-millennia"),
                link("Axis Bank Magnus", "axis-bank-magnus"),
            ],
            0.5,
        )
    }

    #[test]
    fn exact_name_wins() {
        assert_eq!(
            directory().find_link("Axis Bank Magnus"),
            Some("https://www.myrupaya.in/credit-card-products/axis-bank-magnus")
        );
    }

    #[test]
    fn fuzzy_match_ignores_filler_words_and_case() {
        assert_eq!(
            directory().find_link("HDFC Bank Regalia Credit Card"),
            Some("https://www.myrupaya.in/credit-card-products/hdfc-regalia")
        );
    }

    #[test]
    fn ties_go_to_the_first_listed_card() {
        assert_eq!(
            directory().find_link("hdfc"),
            Some("https://www.myrupaya.in/credit-card-products/hdfc-regalia")
        );
    }

    #[test]
    fn weak_matches_are_rejected() {
        assert_eq!(directory().find_link("SBI Elite Prime"), None);
        assert_eq!(directory().find_link("Credit Card"), None);
    }

    #[test]
    fn duplicate_names_keep_first_position_and_last_url() {
        let directory = CardLinkDirectory::from_links(
            vec![link("A", "a-1"), link("B", "b"), link("A", "a-2")],
            0.5,
        );
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.find_link("A"),
            Some("https://www.myrupaya.in/credit-card-products/a-2")
        );
    }

    #[test]
    fn card_names_are_sorted() {
        assert_eq!(
            directory().card_names(),
            vec!["Axis Bank Magnus", "Hdfc Millennia", "Hdfc Regalia"]
        );
    }
}
