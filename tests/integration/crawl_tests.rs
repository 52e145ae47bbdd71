//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_sweep::config::{Config, Traversal};
use site_sweep::crawler::{crawl, Coordinator, CrawlOutcome};
use site_sweep::url::SiteRoot;
use site_sweep::{CrawlPhase, SweepError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into `output_dir`
fn create_test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.crawler.page_fetch_retries = 0;
    config.output.directory = output_dir.display().to_string();
    config
}

/// Wraps sections into a full page
fn page(header: &str, main: &str, footer: &str) -> String {
    format!(
        r#"<html><head><title>Test</title></head><body>
        <div id="header_site">{}</div>
        <div id="main">{}</div>
        <div id="footer_site">{}</div>
        </body></html>"#,
        header, main, footer
    )
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

async fn run_crawl(server: &MockServer, config: Config) -> CrawlOutcome {
    let root = SiteRoot::parse(&server.uri()).expect("Failed to parse mock server URI");
    crawl(config, root).await.expect("Crawl should complete")
}

fn read_output(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).expect("Report should exist")
}

#[tokio::test]
async fn test_end_to_end_single_broken_link() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page(
            "",
            r#"<a href="/financial-aid">Aid</a> <a href="/old-page">Old</a>"#,
            "",
        ),
    )
    .await;
    mount_page(&server, "/financial-aid", page("", "<p>Aid page.</p>", "")).await;
    mount_status(&server, "/old-page", 404).await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    assert_eq!(outcome.phase, CrawlPhase::Done);

    let broken: Vec<_> = outcome.broken_links().collect();
    assert_eq!(broken.len(), 1);
    let (page_url, link) = broken[0];
    assert_eq!(page_url, base);
    assert_eq!(link.url, format!("{}/old-page", base));
    assert_eq!(link.reason, "404 Not Found");

    // three root sections + /financial-aid
    assert_eq!(outcome.stats.pages_scanned, 4);

    let report = read_output(&dir, "broken-links.md");
    assert!(report.contains(&format!("- {}/old-page (404 Not Found)", base)));
    assert!(report.contains("- **Outcome**: done"));

    let log = read_output(&dir, "frontier.log");
    assert_eq!(log, format!("{}/financial-aid\n", base));
}

#[tokio::test]
async fn test_each_url_probed_at_most_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            r#"<a href="/shared">Shared</a> <a href="/gone">Gone</a>"#,
            r#"<a href="/shared">Shared</a> <a href="/a">A</a> <a href="/b">B</a>"#,
            r#"<a href="/gone">Gone</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/a",
        page("", r#"<a href="/gone">Gone</a> <a href="/b">B</a>"#, ""),
    )
    .await;
    mount_page(
        &server,
        "/b",
        page("", r#"<a href="/gone">Gone</a> <a href="/a">A</a>"#, ""),
    )
    .await;

    // /shared: one probe, then one page fetch
    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("", "", "")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    assert_eq!(outcome.phase, CrawlPhase::Done);
    assert_eq!(outcome.stats.broken, 1);

    // reported once per occurrence: header, footer, /a and /b
    let gone: Vec<_> = outcome
        .broken_links()
        .filter(|(_, link)| link.url.ends_with("/gone"))
        .collect();
    assert_eq!(gone.len(), 4);
    assert!(gone.iter().all(|(_, link)| link.reason == "404 Not Found"));
    assert_eq!(
        outcome.stats.broken_records,
        outcome.broken_links().count() as u64
    );

    server.verify().await;
}

#[tokio::test]
async fn test_root_invalid_aborts_and_still_writes_reports() {
    let server = MockServer::start().await;
    mount_status(&server, "/", 500).await;

    let dir = tempfile::tempdir().unwrap();
    let root = SiteRoot::parse(&server.uri()).unwrap();
    let mut coordinator = Coordinator::new(create_test_config(dir.path()), root).unwrap();

    let result = coordinator.run().await;
    match result {
        Err(SweepError::RootInvalid { reason, .. }) => {
            assert_eq!(reason, "500 Internal Server Error")
        }
        other => panic!("expected RootInvalid, got {:?}", other),
    }
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);

    let report = read_output(&dir, "broken-links.md");
    assert!(report.contains("- **Outcome**: aborted"));
    assert!(report.contains("Found 0 broken link(s) on 0 page(s)."));

    // only the validation probe was sent
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_root_unreachable_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let root = SiteRoot::parse("http://127.0.0.1:9").unwrap();

    let result = crawl(create_test_config(dir.path()), root).await;
    match result {
        Err(SweepError::RootInvalid { reason, .. }) => assert_eq!(reason, "No Response"),
        other => panic!("expected RootInvalid, got {:?}", other),
    }
}

#[tokio::test]
async fn test_skip_markers_never_probed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            "",
            r##"
            <a href="/forms/aid.pdf">PDF</a>
            <a href="mailto:aid@x.edu">Mail</a>
            <a href="tel:5205551234">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="#top">Top</a>
            "##,
            "",
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/forms/aid.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    assert_eq!(outcome.broken_links().count(), 0);
    assert_eq!(outcome.stats.links_skipped, 5);
    // the root validation probe only
    assert_eq!(outcome.stats.probes, 1);

    server.verify().await;
}

#[tokio::test]
async fn test_redirect_and_not_modified_classification() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            "",
            r#"<a href="/moved">Moved</a> <a href="/cached">Cached</a>"#,
            "",
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new-home"))
        .mount(&server)
        .await;
    mount_page(&server, "/new-home", page("", "", "")).await;
    mount_status(&server, "/cached", 304).await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    let broken: Vec<_> = outcome.broken_links().map(|(_, link)| link.clone()).collect();
    assert_eq!(broken.len(), 1);
    assert!(broken[0].url.ends_with("/moved"));
    assert_eq!(broken[0].reason, "301 Moved Permanently");

    // /cached probed Ok and was queued, but its fetch returns 304
    assert_eq!(outcome.stats.pages_failed, 1);
}

#[tokio::test]
async fn test_keyword_hits_reported() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            "<p>UA navigation.</p>",
            r#"<p>UA is great. This has nothing UA-related.</p><a href="/about">About</a>"#,
            "<p>Nothing here.</p>",
        ),
    )
    .await;
    mount_page(
        &server,
        "/about",
        page(
            "",
            "<p>UA was founded long ago. UA has many students! Visit today.</p>",
            "",
        ),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    let counts: Vec<_> = outcome
        .keyword_hits
        .iter()
        .map(|hit| (hit.section.as_str(), hit.count))
        .collect();
    assert_eq!(counts, vec![("header", 1), ("main", 1), ("main", 2)]);

    let report = read_output(&dir, "keywords.md");
    assert!(report.contains("# Keyword \"UA\""));
    assert!(report.contains(&format!("## {} (header)\n\n1 sentence with UA", server.uri())));
    assert!(report.contains(&format!("## {}/about\n\n2 sentences with UA", server.uri())));
}

#[tokio::test]
async fn test_page_fetch_failure_is_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page("", r#"<a href="/flaky">Flaky</a> <a href="/fine">Fine</a>"#, ""),
    )
    .await;
    // first request (the probe) succeeds, the page fetch fails
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_status(&server, "/flaky", 503).await;
    mount_page(&server, "/fine", page("", "<p>ok</p>", "")).await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    assert_eq!(outcome.phase, CrawlPhase::Done);
    assert_eq!(outcome.stats.pages_failed, 1);
    assert_eq!(outcome.broken_links().count(), 0);
}

#[tokio::test]
async fn test_breadth_first_visits_in_discovery_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page(
            "",
            r#"<a href="/one">1</a> <a href="/two">2</a> <a href="/three">3</a>"#,
            "",
        ),
    )
    .await;
    for route in ["/one", "/two", "/three"] {
        mount_page(&server, route, page("", "", "")).await;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(dir.path());
    config.crawler.traversal = Traversal::BreadthFirst;
    let outcome = run_crawl(&server, config).await;

    let visited: Vec<_> = outcome
        .pages
        .iter()
        .skip(3)
        .map(|page| page.page_url.trim_start_matches(&server.uri()).to_string())
        .collect();
    assert_eq!(visited, vec!["/one", "/two", "/three"]);
}

#[tokio::test]
async fn test_depth_first_visits_newest_first() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page("", r#"<a href="/one">1</a> <a href="/two">2</a>"#, ""),
    )
    .await;
    mount_page(&server, "/one", page("", r#"<a href="/deep">D</a>"#, "")).await;
    mount_page(&server, "/two", page("", "", "")).await;
    mount_page(&server, "/deep", page("", "", "")).await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&server, create_test_config(dir.path())).await;

    let visited: Vec<_> = outcome
        .pages
        .iter()
        .skip(3)
        .map(|page| page.page_url.trim_start_matches(&server.uri()).to_string())
        .collect();
    assert_eq!(visited, vec!["/two", "/one", "/deep"]);
}

#[tokio::test]
async fn test_external_links_probed_not_crawled() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;

    mount_page(
        &site,
        "/",
        page(
            "",
            &format!(r#"<a href="{}/partner">Partner</a>"#, external.uri()),
            "",
        ),
    )
    .await;
    // probed once, never fetched as a page
    Mock::given(method("GET"))
        .and(path("/partner"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("", "", "")))
        .expect(1)
        .mount(&external)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let outcome = run_crawl(&site, create_test_config(dir.path())).await;

    assert_eq!(outcome.stats.queued, 0);
    assert_eq!(read_output(&dir, "frontier.log"), "");
    external.verify().await;
}

#[tokio::test]
async fn test_previous_reports_replaced() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("", "", "")).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken-links.md"), "stale report").unwrap();
    std::fs::write(dir.path().join("frontier.log"), "https://stale.example\n").unwrap();

    run_crawl(&server, create_test_config(dir.path())).await;

    assert!(!read_output(&dir, "broken-links.md").contains("stale report"));
    assert_eq!(read_output(&dir, "frontier.log"), "");
}
