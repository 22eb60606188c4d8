//! Integration tests for the scraper
//!
//! These tests use wiremock to serve catalog pages and test
//! the full walk-extract-write cycle end-to-end.

use book_scout::config::Config;
use book_scout::crawler::{CatalogWalker, Rating};
use book_scout::output::{MemoryReporter, ScrapeEvent, HEADER};
use book_scout::{scrape, FetchFailure, ScrapeError, WriteFailure};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, page_count: u32, csv_path: &Path) -> Config {
    let mut config = Config::default();
    config.catalog.page_count = page_count;
    config.catalog.page_url_template = format!("{}/catalogue/page-{{page}}.html", base_url);
    config.catalog.site_base = format!("{}/", base_url);
    config.crawler.politeness_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.csv_path = csv_path.display().to_string();
    config
}

/// One `article.product_pod` the way the reference site renders it
fn product_pod(title: &str, href: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
            <article class="product_pod">
                <div class="image_container"><a href="{href}"><img src="../media/thumb.jpg" alt="{title}"></a></div>
                <p class="star-rating {rating}"><i class="icon-star"></i></p>
                <h3><a href="{href}" title="{title}">{title}</a></h3>
                <div class="product_price">
                    <p class="price_color">{price}</p>
                    <p class="instock availability">
                        <i class="icon-ok"></i>
                            In stock
                    </p>
                </div>
            </article>
        </li>"#
    )
}

fn catalog_page(items: &[String]) -> String {
    format!(
        r#"<html><head><meta charset="utf-8"><title>All products | Books to Scrape</title></head>
        <body><section><ol class="row">{}</ol></section></body></html>"#,
        items.join("\n")
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/catalogue/page-{}.html", page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_bytes(), "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn read_rows(csv_path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .expect("Failed to open output");
    reader
        .records()
        .map(|row| {
            row.expect("Failed to read row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_full_scrape_two_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        1,
        catalog_page(&[
            product_pod(
                "A Light in the Attic",
                "a-light-in-the-attic_1000/index.html",
                "£51.77",
                "Three",
            ),
            product_pod(
                "Tipping the Velvet",
                "tipping-the-velvet_999/index.html",
                "£53.74",
                "One",
            ),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        catalog_page(&[product_pod(
            "Soumission",
            "soumission_998/index.html",
            "£50.10",
            "Five",
        )]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, 2, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let stats = scrape(&config, reporter.clone())
        .await
        .expect("Scrape failed");

    assert_eq!(stats.pages_attempted, 2);
    assert_eq!(stats.pages_failed, 0);
    assert_eq!(stats.records_collected, 3);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], HEADER.to_vec());
    assert_eq!(
        rows[1],
        vec![
            "A Light in the Attic".to_string(),
            "£51.77".to_string(),
            "In stock".to_string(),
            "Three".to_string(),
            format!("{}/catalogue/a-light-in-the-attic_1000/index.html", base_url),
        ]
    );
    assert_eq!(rows[2][0], "Tipping the Velvet");
    assert_eq!(rows[2][3], "One");
    assert_eq!(rows[3][0], "Soumission");
    assert_eq!(rows[3][3], "Five");

    let lines = reporter.lines();
    assert_eq!(lines[0], "Scraping page 1...");
    assert!(lines
        .iter()
        .any(|l| l == "Scraping done! Total items collected: 3 from 2 pages"));
    assert!(matches!(
        reporter.events().last(),
        Some(ScrapeEvent::CatalogSaved { records: 3, .. })
    ));
}

#[tokio::test]
async fn test_failed_page_is_skipped_without_retry() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        1,
        catalog_page(&[product_pod("First", "first_1/index.html", "£1.00", "One")]),
    )
    .await;

    // Page 2 fails and must be requested exactly once
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        3,
        catalog_page(&[product_pod("Third", "third_3/index.html", "£3.00", "Two")]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, 3, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let stats = scrape(&config, reporter.clone())
        .await
        .expect("A failed page must not fail the run");

    assert_eq!(stats.pages_attempted, 3);
    assert_eq!(stats.pages_failed, 1);

    let titles: Vec<String> = read_rows(&csv_path)
        .into_iter()
        .skip(1)
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(titles, vec!["First", "Third"]);

    let failures: Vec<ScrapeEvent> = reporter
        .events()
        .into_iter()
        .filter(ScrapeEvent::is_failure)
        .collect();
    assert_eq!(
        failures,
        vec![ScrapeEvent::PageFailed {
            page: 2,
            failure: FetchFailure::Status {
                url: format!("{}/catalogue/page-2.html", base_url),
                status_code: 500,
            },
        }]
    );
}

#[tokio::test]
async fn test_broken_items_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let broken = r#"<li><article class="product_pod">
            <h3><a href="no-title_5/index.html">No title attribute</a></h3>
            <p class="price_color">£9.99</p>
            <p class="instock availability">In stock</p>
        </article></li>"#
        .to_string();
    let unrated = r#"<li><article class="product_pod">
            <p class="star-rating"></p>
            <h3><a href="unrated_6/index.html" title="Unrated">Unrated</a></h3>
            <p class="price_color">£8.00</p>
            <p class="instock availability">In stock</p>
        </article></li>"#
        .to_string();

    mount_page(
        &mock_server,
        1,
        catalog_page(&[
            product_pod("Good", "good_4/index.html", "£4.00", "Four"),
            broken,
            unrated,
        ]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, 1, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let mut walker = CatalogWalker::from_config(&config, reporter.clone()).unwrap();
    let catalog = walker.run(1).await;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[0].title(), "Good");
    assert_eq!(catalog.records()[1].title(), "Unrated");
    assert_eq!(catalog.records()[1].rating(), Rating::Unknown);

    assert_eq!(walker.statistics().items_found, 3);
    assert_eq!(walker.statistics().items_skipped, 1);

    assert!(reporter.events().iter().any(|event| matches!(
        event,
        ScrapeEvent::ItemSkipped {
            page: 1,
            position: 2,
            ..
        }
    )));
}

#[tokio::test]
async fn test_zero_pages_writes_header_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // No page may be requested
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, 0, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let stats = scrape(&config, reporter.clone()).await.expect("Scrape failed");

    assert_eq!(stats.pages_attempted, 0);
    assert_eq!(stats.records_collected, 0);

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec!["Title,Price,Availability,Rating,Product URL"]
    );
}

#[tokio::test]
async fn test_all_pages_failing_is_not_an_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&base_url, 3, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let stats = scrape(&config, reporter.clone()).await.expect("Scrape failed");

    assert_eq!(stats.pages_failed, 3);
    assert_eq!(stats.records_collected, 0);
    assert_eq!(read_rows(&csv_path).len(), 1);
    assert!(matches!(
        reporter.events().last(),
        Some(ScrapeEvent::CatalogSaved { records: 0, .. })
    ));
}

#[tokio::test]
async fn test_politeness_delay_after_every_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Failing pages are paced too
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&base_url, 3, &csv_path);
    config.crawler.politeness_delay_ms = 40;

    let mut walker =
        CatalogWalker::from_config(&config, Arc::new(MemoryReporter::new())).unwrap();

    let start = Instant::now();
    walker.run(3).await;

    assert!(start.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_unwritable_output_is_surfaced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        1,
        catalog_page(&[product_pod("Only", "only_1/index.html", "£1.00", "One")]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("no-such-dir").join("books.csv");
    let config = create_test_config(&base_url, 1, &csv_path);
    let reporter = Arc::new(MemoryReporter::new());

    let result = scrape(&config, reporter.clone()).await;

    match result {
        Err(ScrapeError::Write(WriteFailure::Open { path, .. })) => assert_eq!(path, csv_path),
        other => panic!("expected write failure, got {:?}", other.map(|s| s.records_collected)),
    }
    assert!(matches!(
        reporter.events().last(),
        Some(ScrapeEvent::CatalogNotSaved { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config("http://127.0.0.1:9", 2, &csv_path);
    config.crawler.request_timeout_secs = 2;
    let reporter = Arc::new(MemoryReporter::new());

    let stats = scrape(&config, reporter.clone()).await.expect("Scrape failed");

    assert_eq!(stats.pages_failed, 2);
    let page_failures = reporter
        .events()
        .iter()
        .filter(|event| matches!(event, ScrapeEvent::PageFailed { .. }))
        .count();
    assert_eq!(page_failures, 2);
    assert_eq!(read_rows(&csv_path).len(), 1);
}
