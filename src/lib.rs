//! Card index and offer lookup over movie-ticketing offer tables.
//!
//! Loading is the only asynchronous step: [`load_all`] fetches the five
//! tables and returns an immutable [`Catalog`]. Searching ([`search`]) and
//! selecting ([`offers_for`]) are pure functions over that snapshot.

pub mod card_links;
pub mod config;
pub mod expansion;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod selector;
pub mod view;

pub use card_links::CardLinkDirectory;
pub use config::{
    load_config, load_config_or_default, AppConfig, CardCatalogConfig, ConfigError,
    SourceConfig,
};
pub use expansion::ExpansionState;
pub use index::build_index;
pub use loader::{load_all, SourceFetcher, TableSource};
pub use matcher::search;
pub use model::{
    CardIndex, CardKind, CardLink, Catalog, FetchError, LinkError, LoadError, OfferCategory,
    OfferRow, OfferTables, ParseError, SearchEntry, SearchResult, SelectedOffers,
};
pub use selector::offers_for;
pub use view::{OfferKey, OfferView};
