//! Integration tests for Book Finder
//!
//! These tests run the Open Library source and the search controller against
//! a local mock HTTP server.

use book_finder::config::load_config;
use book_finder::models::{SearchField, SearchQuery};
use book_finder::session::SearchController;
use book_finder::sources::{BookSource, OpenLibrarySource, SourceError};
use book_finder::utils::{CoverSize, HttpClient, Links};
use mockito::Matcher;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const DUNE_PAGE: &str = r#"{
    "numFound": 45,
    "start": 0,
    "docs": [
        {
            "key": "/works/OL893415W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "cover_i": 11481354,
            "edition_count": 120,
            "subject": ["Science fiction", "Arrakis"]
        },
        {
            "key": "/works/OL45804W",
            "title": "Dune Messiah"
        }
    ]
}"#;

fn source_for(server: &mockito::Server) -> OpenLibrarySource {
    let client = HttpClient::new().expect("http client");
    OpenLibrarySource::with_base_url(client, server.url())
}

#[tokio::test]
async fn test_search_parses_open_library_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "dune".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DUNE_PAGE)
        .create_async()
        .await;

    let source = source_for(&server);
    let result = source.search(&SearchQuery::new("dune")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.total_found, 45);
    assert_eq!(result.total_pages(), 3);
    assert_eq!(result.documents.len(), 2);

    let links = Links::default();
    let dune = &result.documents[0];
    assert_eq!(dune.author_names, vec!["Frank Herbert"]);
    assert_eq!(dune.first_publish_year, Some(1965));
    assert_eq!(
        dune.cover_url(&links, CoverSize::Medium).as_deref(),
        Some("https://covers.openlibrary.org/b/id/11481354-M.jpg")
    );
    assert_eq!(dune.work_url(&links), "https://openlibrary.org/works/OL893415W");

    // Missing optional fields
    let messiah = &result.documents[1];
    assert!(messiah.cover_id.is_none());
    assert!(messiah.author_names.is_empty());
    assert!(messiah.cover_url(&links, CoverSize::Medium).is_none());
}

#[tokio::test]
async fn test_search_by_author_encodes_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("author".into(), "ursula k. le guin & co".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"numFound": 0, "docs": []}"#)
        .create_async()
        .await;

    let query = SearchQuery::new("ursula k. le guin & co")
        .field(SearchField::Author)
        .page(2);
    let result = source_for(&server).search(&query).await.unwrap();

    mock.assert_async().await;
    assert!(result.is_empty());
    assert_eq!(result.total_pages(), 0);
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = source_for(&server)
        .search(&SearchQuery::new("dune"))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Api(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = source_for(&server)
        .search(&SearchQuery::new("dune"))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Parse(_)));
}

#[tokio::test]
async fn test_empty_query_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = source_for(&server)
        .search(&SearchQuery::new("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::InvalidRequest(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_controller_pages_through_http_source() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "dune".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(DUNE_PAGE)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "dune".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"numFound": 45, "docs": [{"key": "/works/OL2W", "title": "Dune 21"}]}"#)
        .create_async()
        .await;

    let source: Arc<dyn BookSource> = Arc::new(source_for(&server));
    let mut controller = SearchController::new(source, SearchField::Title, Duration::ZERO);

    controller.set_text("dune");
    controller.settle().await;
    first.assert_async().await;
    assert_eq!(controller.session().total_pages(), 3);
    assert!(!controller.session().pager().has_prev());

    controller.next_page();
    controller.settle().await;
    second.assert_async().await;

    let session = controller.session();
    assert_eq!(session.query().page, 2);
    assert_eq!(session.result().documents[0].title, "Dune 21");
    assert!(session.pager().has_prev());
    assert!(session.pager().has_next());
    assert!(!session.ui().loading);
}

#[tokio::test]
async fn test_controller_surfaces_http_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let source: Arc<dyn BookSource> = Arc::new(source_for(&server));
    let mut controller = SearchController::new(source, SearchField::Isbn, Duration::ZERO);

    controller.set_text("9780441013593");
    controller.settle().await;

    let session = controller.session();
    assert!(!session.ui().loading);
    assert!(session.result().is_empty());
    let error = session.ui().error.as_deref().unwrap_or_default();
    assert!(error.contains("503"), "unexpected error: {error}");
}

#[tokio::test]
async fn test_config_file_points_source_at_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("isbn".into(), "0441013597".into()))
        .with_status(200)
        .with_body(DUNE_PAGE)
        .create_async()
        .await;

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[api]\nsearch_base = \"{}\"\ncovers_base = \"https://covers.example.org\"\n\n[search]\ndefault_field = \"isbn\"",
        server.url()
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.search.default_field, SearchField::Isbn);

    let query = SearchQuery::new("0441013597").field(config.search.default_field);
    let result = config.source().unwrap().search(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        result.documents[0].cover_url(&config.links(), CoverSize::Large).as_deref(),
        Some("https://covers.example.org/b/id/11481354-L.jpg")
    );
}
