// Parsers for the CSV offer tables and the card catalog page.

pub mod card_page;
pub mod csv_table;

pub use card_page::CardCatalogParser;
pub use csv_table::parse_table;
