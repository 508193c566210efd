// Read-only projections of offer rows for display.
use crate::model::{columns, OfferCategory, OfferRow, SelectedOffers};
use std::collections::HashMap;

const NO_DETAILS: &str = "No additional details available";

/// Content-derived identity of an offer row, independent of list position.
///
/// Rows with identical content are told apart by their occurrence number:
/// the first copy is occurrence 0, the next 1, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferKey(String);

impl OfferKey {
    pub fn of(row: &OfferRow) -> Self {
        Self::nth(row, 0)
    }

    pub fn nth(row: &OfferRow, occurrence: usize) -> Self {
        let mut key = String::new();
        for (column, value) in row.iter() {
            key.push_str(column);
            key.push('\u{1f}');
            key.push_str(value.trim());
            key.push('\u{1e}');
        }
        if occurrence > 0 {
            key.push_str(&occurrence.to_string());
        }
        Self(key)
    }
}

/// Fields of one offer as a display layer would show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferView<'a> {
    pub category: OfferCategory,
    pub key: OfferKey,
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub validity: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub terms: Option<&'a str>,
    /// Text revealed when the offer is expanded.
    pub details: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl<'a> OfferView<'a> {
    pub fn from_row(category: OfferCategory, row: &'a OfferRow) -> Self {
        Self::with_key(category, row, OfferKey::of(row))
    }

    fn with_key(category: OfferCategory, row: &'a OfferRow, key: OfferKey) -> Self {
        let title_column = match category {
            OfferCategory::Benefits => columns::CREDIT_CARD_NAME,
            OfferCategory::Debit => columns::WEBSITE,
            _ => columns::TITLE,
        };

        let mut view = OfferView {
            category,
            key,
            title: row.field(title_column).unwrap_or(category.fallback_title()),
            image: row.image(),
            validity: None,
            summary: None,
            terms: None,
            details: None,
            link: None,
        };

        match category {
            OfferCategory::Pvr | OfferCategory::Inox => {
                view.validity = row.field(columns::VALIDITY);
                view.details = row.get(columns::OFFERS);
            }
            OfferCategory::BookMyShow => {
                view.validity = row.field(columns::VALIDITY);
                view.summary = row.field(columns::OFFER);
                view.details = Some(row.field(columns::OFFERS).unwrap_or(NO_DETAILS));
                view.link = row.field(columns::LINK);
            }
            OfferCategory::Debit => {
                view.summary = row.field(columns::OFFER);
                view.link = row.field(columns::LINK);
            }
            OfferCategory::Benefits => {
                view.summary = row.field(columns::MOVIE_BENEFIT);
                view.terms = row.field(columns::TERMS);
                view.link = row.field(columns::LINK);
            }
        }

        view
    }

    /// Offers without an outbound link show their details inline instead.
    pub fn is_expandable(&self) -> bool {
        match self.category {
            OfferCategory::Pvr | OfferCategory::Inox => true,
            OfferCategory::BookMyShow => self.link.is_none(),
            OfferCategory::Debit | OfferCategory::Benefits => false,
        }
    }
}

/// Non-empty categories of a selection, in display order. Identical rows
/// within a category get distinct keys.
pub fn sections<'a>(selected: &SelectedOffers<'a>) -> Vec<(OfferCategory, Vec<OfferView<'a>>)> {
    OfferCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let rows = selected.rows(category);
            if rows.is_empty() {
                return None;
            }
            let mut seen: HashMap<OfferKey, usize> = HashMap::new();
            let views = rows
                .iter()
                .map(|row| {
                    let count = seen.entry(OfferKey::of(row)).or_insert(0);
                    let key = OfferKey::nth(row, *count);
                    *count += 1;
                    OfferView::with_key(category, *row, key)
                })
                .collect();
            Some((category, views))
        })
        .collect()
}
