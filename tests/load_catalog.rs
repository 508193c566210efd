//! Integration tests for `load_all` against real sources.
//!
//! HTTP tables are served by `wiremock`; file tables live in a `tempfile`
//! directory. No real network traffic is made.

use std::fs;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use card_offers::{
    load_all, offers_for, search, CardKind, LoadError, OfferCategory, SourceConfig, SourceFetcher,
};

const PVR: &str = "Credit Card,Title,Validity,Offers\n\
                   Axis Bank Magnus,Buy 1 Get 1,31 Dec 2025,Max 2 tickets per month\n\
                   HDFC Regalia,25% off,30 Jun 2025,\n";
const INOX: &str = "Credit Card,Title,Validity\n Axis Bank Magnus ,Flat 100 off,31 Dec 2025\n";
const BMS: &str = "Credit Card,Title,Offer,Link\nKotak Royale,Weekend deal,Rs 200 off,https://in.bookmyshow.com/offers/9\n";
const DEBIT: &str = "Applicable Debit Cards,Website,Offer,Link\n\"SBI Debit, HDFC Debit\",BookMyShow,10% off,https://example.com/d\n";
const BENEFITS: &str = "Credit Card Name,Movie Benefit,Terms,image\n ICICI Amazon Pay ,Free ticket monthly,Min spend,https://img/icici.png\n";

fn test_fetcher(base_dir: &std::path::Path) -> SourceFetcher {
    SourceFetcher::new(5, "card-offers-test/0.1", base_dir).expect("failed to build test fetcher")
}

fn remote_sources(server: &MockServer) -> SourceConfig {
    SourceConfig {
        pvr: format!("{}/pvr.csv", server.uri()),
        inox: format!("{}/inox.csv", server.uri()),
        book_my_show: format!("{}/bms.csv", server.uri()),
        debit: format!("{}/debit.csv", server.uri()),
        benefits: format!("{}/benefits.csv", server.uri()),
    }
}

async fn mount_csv(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount_csv(server, "/pvr.csv", PVR).await;
    mount_csv(server, "/inox.csv", INOX).await;
    mount_csv(server, "/bms.csv", BMS).await;
    mount_csv(server, "/debit.csv", DEBIT).await;
    mount_csv(server, "/benefits.csv", BENEFITS).await;
}

#[tokio::test]
async fn loads_tables_over_http_and_builds_index() {
    let server = MockServer::start().await;
    mount_all(&server).await;
    let dir = tempfile::tempdir().unwrap();

    let catalog = load_all(&test_fetcher(dir.path()), &remote_sources(&server))
        .await
        .expect("load should succeed");

    assert_eq!(
        catalog.credit_cards(),
        &["Axis Bank Magnus", "HDFC Regalia", "ICICI Amazon Pay", "Kotak Royale"]
    );
    assert_eq!(catalog.debit_cards(), &["HDFC Debit", "SBI Debit"]);
}

#[tokio::test]
async fn loaded_catalog_answers_search_and_selection() {
    let server = MockServer::start().await;
    mount_all(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_all(&test_fetcher(dir.path()), &remote_sources(&server))
        .await
        .unwrap();

    let result = search("hdfc", catalog.index());
    assert_eq!(result.cards(CardKind::Credit).collect::<Vec<_>>(), vec!["HDFC Regalia"]);
    assert_eq!(result.cards(CardKind::Debit).collect::<Vec<_>>(), vec!["HDFC Debit"]);

    let selected = offers_for("Axis Bank Magnus", catalog.tables());
    assert_eq!(selected.pvr.len(), 1);
    assert_eq!(selected.inox.len(), 1);
    assert!(selected.book_my_show.is_empty());

    let selected = offers_for("ICICI AMAZON PAY", catalog.tables());
    assert_eq!(selected.benefits.len(), 1);
}

#[tokio::test]
async fn server_error_on_one_table_fails_the_load() {
    let server = MockServer::start().await;
    mount_csv(&server, "/pvr.csv", PVR).await;
    mount_csv(&server, "/inox.csv", INOX).await;
    mount_csv(&server, "/bms.csv", BMS).await;
    mount_csv(&server, "/benefits.csv", BENEFITS).await;
    Mock::given(method("GET"))
        .and(path("/debit.csv"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let err = load_all(&test_fetcher(dir.path()), &remote_sources(&server))
        .await
        .unwrap_err();

    assert_eq!(err.table(), OfferCategory::Debit);
    assert!(
        err.to_string().contains("500"),
        "expected status in error, got: {err}"
    );
}

#[tokio::test]
async fn loads_tables_from_files_relative_to_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    let sources = SourceConfig::default();
    fs::write(dir.path().join(&sources.pvr), PVR).unwrap();
    fs::write(dir.path().join(&sources.inox), INOX).unwrap();
    fs::write(dir.path().join(&sources.book_my_show), BMS).unwrap();
    fs::write(dir.path().join(&sources.debit), DEBIT).unwrap();
    fs::write(dir.path().join(&sources.benefits), BENEFITS).unwrap();

    let catalog = load_all(&test_fetcher(dir.path()), &sources).await.unwrap();

    assert_eq!(catalog.credit_cards().len(), 4);
    assert_eq!(catalog.tables().debit.len(), 1);
}

#[tokio::test]
async fn missing_file_reports_its_table() {
    let dir = tempfile::tempdir().unwrap();
    let sources = SourceConfig::default();
    fs::write(dir.path().join(&sources.pvr), PVR).unwrap();

    let err = load_all(&test_fetcher(dir.path()), &sources).await.unwrap_err();

    assert!(matches!(err, LoadError::Fetch { .. }));
    assert_ne!(err.table(), OfferCategory::Pvr);
}
