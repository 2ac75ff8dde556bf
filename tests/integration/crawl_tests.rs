//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, writing pages into a temp directory.

use site_scribe::config::Config;
use site_scribe::crawler::Coordinator;
use site_scribe::storage::DirectoryStorage;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `base_url` into `output_dir`
fn create_test_config(base_url: &str, output_dir: &Path, workers: u32) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.workers = workers;
    config.crawler.polite_delay_ms = 10; // Very short for testing
    config.output.directory = output_dir.to_string_lossy().into_owned();
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>\n{}\n</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_stays_on_site() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        r#"<p>Welcome home</p>
        <a href="/a">Page A</a>
        <a href="https://other.com/b">Elsewhere</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/a", "<p>About  Page A</p>", 1).await;

    let config = create_test_config(&base_url, out.path(), 1);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(
        report.visited,
        vec![base_url.clone(), format!("{}a", base_url)]
    );
    assert!(!report.was_visited("https://other.com/b"));
    assert_eq!(report.pages_saved, 2);
    assert_eq!(report.pages_failed, 0);

    let home = std::fs::read_to_string(out.path().join("penn.txt")).unwrap();
    assert!(home.contains("Welcome home"));
    assert!(home.contains("Page A"));

    let page_a = std::fs::read_to_string(out.path().join("penn_a.txt")).unwrap();
    assert_eq!(page_a, "About\nPage A");
}

#[tokio::test]
async fn test_failed_page_is_skipped_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">Broken</a><a href="/b">Fine</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/b", r#"<p>Page B</p><a href="/c">C</a>"#, 1).await;
    mount_page(&mock_server, "/c", "<p>Page C</p>", 1).await;

    let config = create_test_config(&base_url, out.path(), 1);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.pages_saved, 3);
    assert!(report.was_visited(&format!("{}a", base_url)));
    assert!(!out.path().join("penn_a.txt").exists());
    assert!(out.path().join("penn_b.txt").exists());
    assert!(out.path().join("penn_c.txt").exists());
}

#[tokio::test]
async fn test_binary_links_never_queued() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/docs/report.pdf">Report</a>
        <a href="/img/logo.PNG">Logo</a>
        <a href="/docs">Docs</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/docs", "<p>Docs</p>", 1).await;
    Mock::given(method("GET"))
        .and(path("/docs/report.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/logo.PNG"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, out.path(), 1);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.visited.len(), 2);
    assert!(!report.was_visited(&format!("{}docs/report.pdf", base_url)));
}

#[tokio::test]
async fn test_cyclic_links_fetched_once_with_concurrent_workers() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    // Every page links to every other page, with fragment variants
    let links = r##"
        <a href="/">Home</a>
        <a href="/one">One</a>
        <a href="/one#top">One again</a>
        <a href="/two">Two</a>
        <a href="/three#bottom">Three</a>
        <a href="three">Three relative</a>
    "##;
    for page in ["/", "/one", "/two", "/three"] {
        mount_page(&mock_server, page, links, 1).await;
    }

    let config = create_test_config(&base_url, out.path(), 4);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.visited.len(), 4);
    assert_eq!(report.pages_saved, 4);
    assert_eq!(report.links_discovered, 3);
    // wiremock verifies each page was requested exactly once when the server drops
}

#[tokio::test]
async fn test_query_variants_share_a_file() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about/us">Us</a><a href="/about/us?x=1">Us with query</a>"#,
        1,
    )
    .await;
    mount_page(&mock_server, "/about/us", "<p>About us</p>", 2).await;

    let config = create_test_config(&base_url, out.path(), 1);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.visited.len(), 3);
    assert_eq!(report.pages_saved, 3);

    let files: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 2);
    assert!(out.path().join("penn_about_us.txt").exists());
}

#[tokio::test]
async fn test_links_after_redirect_resolve_against_requested_url() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(&mock_server, "/", r#"<a href="/dir">Directory</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/dir"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/dir/"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/dir/", r#"<a href="child">Child</a>"#, 1).await;
    mount_page(&mock_server, "/child", "<p>Child page</p>", 1).await;
    mount_page(&mock_server, "/dir/child", "<p>Wrong child</p>", 0).await;

    let config = create_test_config(&base_url, out.path(), 1);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(
        report.visited,
        vec![
            base_url.clone(),
            format!("{}child", base_url),
            format!("{}dir", base_url),
        ]
    );
    assert!(out.path().join("penn_dir.txt").exists());
    assert!(out.path().join("penn_child.txt").exists());
}

#[tokio::test]
async fn test_store_failure_logged_and_links_dropped() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();
    let pages_dir = out.path().join("pages");

    mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#, 1).await;
    mount_page(&mock_server, "/a", "<p>A</p>", 0).await;

    let storage = DirectoryStorage::new(&pages_dir, "penn").unwrap();
    std::fs::remove_dir(&pages_dir).unwrap();

    let config = create_test_config(&base_url, &pages_dir, 1);
    let mut coordinator =
        Coordinator::with_storage(config, storage).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl should not abort");

    assert_eq!(report.store_failures, 1);
    assert_eq!(report.pages_saved, 0);
    assert_eq!(report.visited, vec![base_url]);
}

#[tokio::test]
async fn test_requests_are_spaced_by_polite_delay() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    let out = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/p1">1</a><a href="/p2">2</a><a href="/p3">3</a>"#,
        1,
    )
    .await;
    for page in ["/p1", "/p2", "/p3"] {
        mount_page(&mock_server, page, "<p>leaf</p>", 1).await;
    }

    let mut config = create_test_config(&base_url, out.path(), 4);
    config.crawler.polite_delay_ms = 100;

    let start = Instant::now();
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_saved, 4);
    // Four requests through one gate: at least three full intervals
    assert!(start.elapsed() >= Duration::from_millis(290));
}

#[tokio::test]
async fn test_unwritable_output_directory_fails_setup() {
    let out = TempDir::new().unwrap();
    let occupied = out.path().join("file");
    std::fs::write(&occupied, "not a directory").unwrap();

    let config = create_test_config("http://127.0.0.1:9/", &occupied, 1);
    assert!(Coordinator::new(config).is_err());
}
