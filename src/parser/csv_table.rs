// Header-keyed CSV parsing for the offer tables
use crate::model::{OfferRow, ParseError};

/// Parses CSV text with a header row into rows keyed by column name.
///
/// Short rows simply lack the trailing columns; extra cells beyond the header
/// are dropped. A UTF-8 BOM in front of the first header is ignored.
pub fn parse_table(text: &str) -> Result<Vec<OfferRow>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: OfferRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
