// Core structs: OfferRow, CardIndex, SearchResult, OfferTables, Catalog
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::index::build_index;

/// Column names read from the source tables.
pub mod columns {
    pub const CREDIT_CARD: &str = "Credit Card";
    pub const CREDIT_CARD_NAME: &str = "Credit Card Name";
    pub const APPLICABLE_DEBIT_CARDS: &str = "Applicable Debit Cards";
    pub const IMAGE: &str = "Image";
    pub const IMAGE_LOWER: &str = "image";
    pub const TITLE: &str = "Title";
    pub const VALIDITY: &str = "Validity";
    pub const OFFERS: &str = "Offers";
    pub const OFFER: &str = "Offer";
    pub const LINK: &str = "Link";
    pub const TERMS: &str = "Terms";
    pub const WEBSITE: &str = "Website";
    pub const MOVIE_BENEFIT: &str = "Movie Benefit";
}

/// One record of a source table, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferRow {
    fields: BTreeMap<String, String>,
}

impl OfferRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw value of a column, exactly as parsed.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Raw value of a column, treating an empty string as absent.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    /// Trimmed value of a column; blank values count as absent.
    pub fn trimmed(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    /// The offer image, under either spelling of the column.
    pub fn image(&self) -> Option<&str> {
        self.field(columns::IMAGE)
            .or_else(|| self.field(columns::IMAGE_LOWER))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OfferRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = OfferRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Splits an "Applicable Debit Cards" cell into trimmed, non-empty card names.
pub fn split_card_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|c| !c.is_empty())
}

/// Which card set a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Credit,
    Debit,
}

impl CardKind {
    pub fn heading(self) -> &'static str {
        match self {
            CardKind::Credit => "Credit Cards",
            CardKind::Debit => "Debit Cards",
        }
    }
}

/// Sorted, deduplicated card names known to the loaded tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardIndex {
    credit: Vec<String>,
    debit: Vec<String>,
}

impl CardIndex {
    /// Both inputs must already be sorted and free of duplicates.
    pub(crate) fn from_sorted(credit: Vec<String>, debit: Vec<String>) -> Self {
        Self { credit, debit }
    }

    pub fn credit_cards(&self) -> &[String] {
        &self.credit
    }

    pub fn debit_cards(&self) -> &[String] {
        &self.debit
    }

    pub fn cards(&self, kind: CardKind) -> &[String] {
        match kind {
            CardKind::Credit => &self.credit,
            CardKind::Debit => &self.debit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.credit.is_empty() && self.debit.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEntry {
    Heading(CardKind),
    Card { kind: CardKind, name: String },
}

/// Ordered search output: a heading per non-empty section, then its cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    entries: Vec<SearchEntry>,
}

impl SearchResult {
    pub(crate) fn push_section(&mut self, kind: CardKind, names: Vec<String>) {
        if names.is_empty() {
            return;
        }
        self.entries.push(SearchEntry::Heading(kind));
        self.entries
            .extend(names.into_iter().map(|name| SearchEntry::Card { kind, name }));
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Card names of one section, in index order.
    pub fn cards(&self, kind: CardKind) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(move |e| match e {
            SearchEntry::Card { kind: k, name } if *k == kind => Some(name.as_str()),
            _ => None,
        })
    }
}

/// The five offer categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OfferCategory {
    Benefits,
    Pvr,
    Inox,
    BookMyShow,
    Debit,
}

impl OfferCategory {
    pub const ALL: [OfferCategory; 5] = [
        OfferCategory::Benefits,
        OfferCategory::Pvr,
        OfferCategory::Inox,
        OfferCategory::BookMyShow,
        OfferCategory::Debit,
    ];

    pub const VENUES: [OfferCategory; 3] = [
        OfferCategory::Pvr,
        OfferCategory::Inox,
        OfferCategory::BookMyShow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OfferCategory::Benefits => "benefits",
            OfferCategory::Pvr => "pvr",
            OfferCategory::Inox => "inox",
            OfferCategory::BookMyShow => "book_my_show",
            OfferCategory::Debit => "debit",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            OfferCategory::Benefits => "Permanent Offers",
            OfferCategory::Pvr => "PVR Offers",
            OfferCategory::Inox => "INOX Offers",
            OfferCategory::BookMyShow => "BookMyShow Offers",
            OfferCategory::Debit => "Debit Card Offers",
        }
    }

    /// Title shown when a row has no title column of its own.
    pub fn fallback_title(self) -> &'static str {
        match self {
            OfferCategory::Benefits => "Card Offer",
            OfferCategory::Pvr => "PVR Offer",
            OfferCategory::Inox => "INOX Offer",
            OfferCategory::BookMyShow => "BookMyShow Offer",
            OfferCategory::Debit => "Debit Card Offer",
        }
    }
}

impl fmt::Display for OfferCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows of all five source tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferTables {
    pub pvr: Vec<OfferRow>,
    pub inox: Vec<OfferRow>,
    pub book_my_show: Vec<OfferRow>,
    pub debit: Vec<OfferRow>,
    pub benefits: Vec<OfferRow>,
}

impl OfferTables {
    pub fn rows(&self, category: OfferCategory) -> &[OfferRow] {
        match category {
            OfferCategory::Benefits => &self.benefits,
            OfferCategory::Pvr => &self.pvr,
            OfferCategory::Inox => &self.inox,
            OfferCategory::BookMyShow => &self.book_my_show,
            OfferCategory::Debit => &self.debit,
        }
    }
}

/// Offer rows matching one selected card, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedOffers<'a> {
    pub pvr: Vec<&'a OfferRow>,
    pub inox: Vec<&'a OfferRow>,
    pub book_my_show: Vec<&'a OfferRow>,
    pub debit: Vec<&'a OfferRow>,
    pub benefits: Vec<&'a OfferRow>,
}

impl<'a> SelectedOffers<'a> {
    pub fn rows(&self, category: OfferCategory) -> &[&'a OfferRow] {
        match category {
            OfferCategory::Benefits => &self.benefits,
            OfferCategory::Pvr => &self.pvr,
            OfferCategory::Inox => &self.inox,
            OfferCategory::BookMyShow => &self.book_my_show,
            OfferCategory::Debit => &self.debit,
        }
    }

    pub fn total(&self) -> usize {
        OfferCategory::ALL.iter().map(|c| self.rows(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Immutable snapshot published by a successful load.
#[derive(Debug, Clone)]
pub struct Catalog {
    index: CardIndex,
    tables: OfferTables,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(tables: OfferTables, loaded_at: DateTime<Utc>) -> Self {
        let index = build_index(&tables);
        Self {
            index,
            tables,
            loaded_at,
        }
    }

    pub fn index(&self) -> &CardIndex {
        &self.index
    }

    pub fn credit_cards(&self) -> &[String] {
        self.index.credit_cards()
    }

    pub fn debit_cards(&self) -> &[String] {
        self.index.debit_cards()
    }

    pub fn tables(&self) -> &OfferTables {
        &self.tables
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// A card product page found in the card catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {table} table: {source}")]
    Fetch {
        table: OfferCategory,
        #[source]
        source: FetchError,
    },

    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: OfferCategory,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    pub fn table(&self) -> OfferCategory {
        match self {
            LoadError::Fetch { table, .. } | LoadError::Parse { table, .. } => *table,
        }
    }
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no card links found at {url}")]
    NoCards { url: String },
}
