// Card catalog HTML parsing
use crate::model::{CardLink, ParseError};
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::sync::LazyLock;

const LINK_TEXT: &str = "Learn More";
const PRODUCT_PATH: &str = "/credit-card-products/";

static WORD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w").unwrap());

pub struct CardCatalogParser {
    base_url: String,
}

impl CardCatalogParser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Collects every "Learn More" link that points at a card product page.
    pub fn parse(&self, html: &str) -> Result<Vec<CardLink>, ParseError> {
        let document = Html::parse_document(html);
        let anchor_selector = Selector::parse("a").map_err(|e| ParseError::Selector {
            selector: "a".into(),
            reason: e.to_string(),
        })?;

        let mut links = Vec::new();

        for anchor in document.select(&anchor_selector) {
            let text = anchor.text().collect::<String>();
            if text.trim() != LINK_TEXT {
                continue;
            }
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains(PRODUCT_PATH) {
                continue;
            }

            let url = if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", self.base_url, href)
            };
            let name = card_name_from_url(&url);
            if name.trim().is_empty() {
                continue;
            }

            links.push(CardLink { name, url });
        }

        Ok(links)
    }
}

/// Turns the last path segment of a product URL into a display name:
/// dashes become spaces, percent escapes are decoded and every word is
/// capitalized.
pub fn card_name_from_url(url: &str) -> String {
    let slug = url.rsplit('/').next().unwrap_or_default().replace('-', " ");
    let decoded = percent_decode_str(&slug).decode_utf8_lossy();
    WORD_START
        .replace_all(&decoded, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}
