use crate::model::OfferCategory;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Locations of the five offer tables: URLs or paths relative to `base_dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub pvr: String,
    pub inox: String,
    pub book_my_show: String,
    pub debit: String,
    pub benefits: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pvr: "Pvr final.csv".into(),
            inox: "Inox final.csv".into(),
            book_my_show: "Book My Show final.csv".into(),
            debit: "Final_Cleaned_Movie_Offers.csv".into(),
            benefits: "Movie_Benefits_List_With_Images.csv".into(),
        }
    }
}

impl SourceConfig {
    pub fn location(&self, table: OfferCategory) -> &str {
        match table {
            OfferCategory::Pvr => &self.pvr,
            OfferCategory::Inox => &self.inox,
            OfferCategory::BookMyShow => &self.book_my_show,
            OfferCategory::Debit => &self.debit,
            OfferCategory::Benefits => &self.benefits,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CardCatalogConfig {
    pub base_url: String,
    pub catalog_path: String,
    /// Minimum word overlap for a fuzzy card link match.
    pub match_threshold: f64,
}

impl Default for CardCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.myrupaya.in".into(),
            catalog_path: "/copy-2-of-product-category-1-1/credit-card".into(),
            match_threshold: 0.5,
        }
    }
}

impl CardCatalogConfig {
    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.catalog_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub base_dir: PathBuf,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    pub card_catalog: CardCatalogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourceConfig::default(),
            base_dir: PathBuf::from("."),
            request_timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) CardOffersBot/0.1".into(),
            card_catalog: CardCatalogConfig::default(),
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Like [`load_config`], but a missing file yields the defaults.
///
/// An unreadable, malformed or invalid file is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(AppConfig::default())
        }
        other => other,
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.request_timeout_seconds == 0 {
        return Err(ConfigError::Invalid {
            field: "request_timeout_seconds",
            reason: "must be greater than zero".into(),
        });
    }

    let threshold = config.card_catalog.match_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::Invalid {
            field: "card_catalog.match_threshold",
            reason: format!("{threshold} is outside 0..=1"),
        });
    }

    for table in OfferCategory::ALL {
        if config.sources.location(table).trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "sources",
                reason: format!("no location for {table} table"),
            });
        }
    }

    Ok(())
}
