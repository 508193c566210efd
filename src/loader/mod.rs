// Loader module: fetches the five offer tables and publishes a Catalog.

pub mod fetcher;
pub mod traits;

pub use fetcher::SourceFetcher;
pub use traits::TableSource;

use crate::config::SourceConfig;
use crate::model::{Catalog, LoadError, OfferCategory, OfferRow, OfferTables};
use crate::parser::parse_table;
use chrono::Utc;
use futures::try_join;
use tracing::{error, info};

/// Fetches and parses all five tables concurrently.
///
/// The catalog is returned only when every table loaded; otherwise the first
/// failure is logged once and returned, and nothing is published.
pub async fn load_all<S>(source: &S, sources: &SourceConfig) -> Result<Catalog, LoadError>
where
    S: TableSource + ?Sized,
{
    info!("Loading offer tables...");

    let loaded = try_join!(
        load_table(source, sources, OfferCategory::Pvr),
        load_table(source, sources, OfferCategory::Inox),
        load_table(source, sources, OfferCategory::BookMyShow),
        load_table(source, sources, OfferCategory::Debit),
        load_table(source, sources, OfferCategory::Benefits),
    );

    let (pvr, inox, book_my_show, debit, benefits) = match loaded {
        Ok(tables) => tables,
        Err(e) => {
            error!("Error loading offer tables: {}", e);
            return Err(e);
        }
    };

    let catalog = Catalog::new(
        OfferTables {
            pvr,
            inox,
            book_my_show,
            debit,
            benefits,
        },
        Utc::now(),
    );
    info!(
        "Loaded {} credit and {} debit cards",
        catalog.credit_cards().len(),
        catalog.debit_cards().len()
    );
    Ok(catalog)
}

async fn load_table<S>(
    source: &S,
    sources: &SourceConfig,
    table: OfferCategory,
) -> Result<Vec<OfferRow>, LoadError>
where
    S: TableSource + ?Sized,
{
    let text = source
        .fetch(sources.location(table))
        .await
        .map_err(|source| LoadError::Fetch { table, source })?;
    let rows = parse_table(&text).map_err(|source| LoadError::Parse { table, source })?;
    info!("Parsed {} rows from {} table", rows.len(), table);
    Ok(rows)
}
