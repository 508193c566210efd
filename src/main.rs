use card_offers::view::sections;
use card_offers::{
    load_all, load_config_or_default, offers_for, search, CardLinkDirectory, Catalog,
    OfferCategory, SearchEntry, SourceFetcher,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "card-offers")]
#[command(about = "Look up movie offers by credit or debit card")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List cards whose name contains every word of the query
    Search { query: Vec<String> },
    /// Show all offers for one card, exactly as listed by `search`
    Offers { card: Vec<String> },
    /// Find the product page of a card in the card catalog
    Link {
        card: Vec<String>,
        /// List every card in the catalog instead
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match load_config_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match SourceFetcher::from_config(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Search { query } => {
            let Ok(catalog) = load_all(&fetcher, &config.sources).await else {
                return ExitCode::FAILURE;
            };
            print_search(&catalog, &query.join(" "));
        }
        Commands::Offers { card } => {
            let Ok(catalog) = load_all(&fetcher, &config.sources).await else {
                return ExitCode::FAILURE;
            };
            print_offers(&catalog, &card.join(" "));
        }
        Commands::Link { card, list } => {
            let directory = match CardLinkDirectory::fetch(&fetcher, &config.card_catalog).await {
                Ok(d) => d,
                Err(e) => {
                    error!("Card catalog unavailable: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if list {
                println!("Available credit cards:");
                for (i, name) in directory.card_names().iter().enumerate() {
                    println!("{}. {}", i + 1, name);
                }
                return ExitCode::SUCCESS;
            }
            let card = card.join(" ");
            match directory.find_link(&card) {
                Some(url) => println!("Link for '{}':\n{}", card, url),
                None => println!("No link found for '{}'", card),
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_search(catalog: &Catalog, query: &str) {
    let result = search(query, catalog.index());
    if result.is_empty() {
        println!("No cards match '{}'", query);
        return;
    }
    for entry in result.entries() {
        match entry {
            SearchEntry::Heading(kind) => println!("{}", kind.heading()),
            SearchEntry::Card { name, .. } => println!("  {}", name),
        }
    }
}

fn print_offers(catalog: &Catalog, card: &str) {
    let selected = offers_for(card, catalog.tables());
    if selected.is_empty() {
        println!("No offers found for '{}'", card);
        return;
    }

    for (category, views) in sections(&selected) {
        match category {
            OfferCategory::Benefits => println!("\n{} on {}", category.heading(), card),
            _ => println!("\n{}", category.heading()),
        }
        for view in views {
            println!("- {}", view.title);
            for (label, value) in [
                ("Benefit", view.summary.filter(|_| category == OfferCategory::Benefits)),
                ("Offer", view.summary.filter(|_| category != OfferCategory::Benefits)),
                ("Validity", view.validity),
                ("Terms", view.terms),
                ("Details", view.details.filter(|_| view.is_expandable())),
                ("Link", view.link),
            ] {
                if let Some(value) = value {
                    println!("    {}: {}", label, value);
                }
            }
        }
    }
}
