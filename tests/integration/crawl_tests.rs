//! Integration tests for the mirror
//!
//! These tests use wiremock to create mock HTTP servers and tempfile for the
//! output root, and check the mirrored tree end-to-end.

use std::path::Path;
use sumi_mirror::config::Config;
use sumi_mirror::crawler::{analyze, crawl};
use sumi_mirror::{ConfigError, MirrorError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

/// An HTML page response
fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

/// Mounts `response` for GET `route`, expected to be requested `times` times
async fn mount(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Creates a test configuration rooted at `route` on the mock server
fn create_test_config(server: &MockServer, route: &str, output: &Path, max_depth: u32) -> Config {
    let mut config = Config::new(format!("{}{}", server.uri(), route), output);
    config.crawler.max_depth = max_depth;
    config.crawler.request_timeout_ms = 5_000;
    config
}

fn read(dir: &TempDir, relative: &str) -> String {
    std::fs::read_to_string(dir.path().join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

#[tokio::test]
async fn test_depth_zero_saves_only_root() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<html><body><a href="/about">About</a></body></html>"#), 1).await;
    mount(&server, "/about", page("<html><body>About</body></html>"), 0).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 1);
    assert!(dir.path().join("index.html").exists());
    assert!(!dir.path().join("about.html").exists());

    // The link is still rewritten even though the target is not fetched
    assert!(read(&dir, "index.html").contains(r#"href="about.html""#));
}

#[tokio::test]
async fn test_root_without_extension_saved_as_html() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/about", page("<html><body>About us</body></html>"), 1).await;

    let summary = crawl(create_test_config(&server, "/about", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 1);
    assert!(read(&dir, "about.html").contains("About us"));
}

#[tokio::test]
async fn test_trailing_slash_link_saved_as_index() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/blog/">Blog</a>"#), 1).await;
    mount(&server, "/blog/", page("<p>Posts</p>"), 1).await;

    crawl(create_test_config(&server, "/", dir.path(), 1))
        .await
        .expect("Crawl failed");

    assert!(read(&dir, "index.html").contains(r#"href="blog/index.html""#));
    assert!(read(&dir, "blog/index.html").contains("Posts"));
}

#[tokio::test]
async fn test_image_extension_from_content_type() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<img src="/img/logo">"#), 1).await;
    mount(
        &server,
        "/img/logo",
        ResponseTemplate::new(200).set_body_raw(PNG_BYTES.to_vec(), "image/png"),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.assets_downloaded, 1);
    assert!(read(&dir, "index.html").contains(r#"src="assets/image/logo.png""#));

    let saved = std::fs::read(dir.path().join("assets/image/logo.png")).unwrap();
    assert_eq!(saved, PNG_BYTES);
}

#[tokio::test]
async fn test_shared_stylesheet_downloaded_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(
        &server,
        "/",
        page(r#"<link rel="stylesheet" href="/css/site.css"><a href="/about">About</a>"#),
        1,
    )
    .await;
    mount(
        &server,
        "/about",
        page(r#"<link rel="stylesheet" href="/css/site.css"><p>About</p>"#),
        1,
    )
    .await;
    mount(
        &server,
        "/css/site.css",
        ResponseTemplate::new(200).set_body_raw(b"body { color: red; }".to_vec(), "text/css"),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 1))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 2);
    assert_eq!(summary.assets_downloaded, 1);
    assert_eq!(summary.assets_reused, 1);

    let expected = r#"href="assets/css/site.css""#;
    assert!(read(&dir, "index.html").contains(expected));
    assert!(read(&dir, "about.html").contains(expected));
    assert_eq!(read(&dir, "assets/css/site.css"), "body { color: red; }");
}

#[tokio::test]
async fn test_style_background_rewritten() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(
        &server,
        "/",
        page(r#"<div style="color: blue; background-image: url(/bg.jpg)">Hero</div>"#),
        1,
    )
    .await;
    mount(
        &server,
        "/bg.jpg",
        ResponseTemplate::new(200).set_body_raw(b"jpeg".to_vec(), "image/jpeg"),
        1,
    )
    .await;

    crawl(create_test_config(&server, "/", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert!(read(&dir, "index.html")
        .contains(r#"style="color: blue; background-image: url('assets/image/bg.jpg')""#));
    assert!(dir.path().join("assets/image/bg.jpg").exists());
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Chain: / -> /a -> /b -> /c
    mount(&server, "/", page(r#"<a href="/a">A</a>"#), 1).await;
    mount(&server, "/a", page(r#"<a href="/b">B</a>"#), 1).await;
    mount(&server, "/b", page(r#"<a href="/c">C</a>"#), 1).await;
    mount(&server, "/c", page("<p>Too deep</p>"), 0).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 2))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 3);
    assert!(!dir.path().join("c.html").exists());
    // Wiremock verifies expect(0) on /c when the server drops
}

#[tokio::test]
async fn test_link_back_to_root_not_refetched() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/about">About</a>"#), 1).await;
    mount(
        &server,
        "/about",
        page(&format!(r#"<a href="/">Home</a><a href="{}/">Home again</a>"#, server.uri())),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 5))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 2);
    assert!(read(&dir, "about.html").contains(r#"href="index.html""#));
}

#[tokio::test]
async fn test_pages_visited_depth_first_in_document_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/a">A</a><a href="/b">B</a>"#), 1).await;
    mount(&server, "/a", page(r#"<a href="/a1">A1</a>"#), 1).await;
    mount(&server, "/a1", page("<p>A1</p>"), 1).await;
    mount(&server, "/b", page("<p>B</p>"), 1).await;

    crawl(create_test_config(&server, "/", dir.path(), 3))
        .await
        .expect("Crawl failed");

    let requests = server.received_requests().await.unwrap();
    let order: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(order, vec!["/", "/a", "/a1", "/b"]);
}

#[tokio::test]
async fn test_external_links_unchanged() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(
        &server,
        "/",
        page(
            r##"<a href="https://other.example/page">Elsewhere</a>
            <a href="mailto:team@site.test">Mail</a>
            <a href="#top">Top</a>"##,
        ),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 2))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 1);
    let html = read(&dir, "index.html");
    assert!(html.contains(r#"href="https://other.example/page""#));
    assert!(html.contains(r#"href="mailto:team@site.test""#));
    assert!(html.contains(r##"href="#top""##));
}

#[tokio::test]
async fn test_nested_page_references_are_relative() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/blog/post">Post</a>"#), 1).await;
    mount(
        &server,
        "/blog/post",
        page(r#"<link rel="stylesheet" href="/css/site.css"><a href="/about">About</a><a href="/">Home</a>"#),
        1,
    )
    .await;
    mount(&server, "/about", page("<p>About</p>"), 1).await;
    mount(
        &server,
        "/css/site.css",
        ResponseTemplate::new(200).set_body_raw(b"p {}".to_vec(), "text/css"),
        1,
    )
    .await;

    crawl(create_test_config(&server, "/", dir.path(), 2))
        .await
        .expect("Crawl failed");

    let post = read(&dir, "blog/post.html");
    assert!(post.contains(r#"href="../assets/css/site.css""#));
    assert!(post.contains(r#"href="../about.html""#));
    assert!(post.contains(r#"href="../index.html""#));
    assert!(dir.path().join("about.html").exists());
}

#[tokio::test]
async fn test_failed_asset_keeps_remote_reference() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<img src="/img/missing.png"><script src="/app.js"></script>"#), 1).await;
    mount(&server, "/img/missing.png", ResponseTemplate::new(404), 1).await;
    mount(
        &server,
        "/app.js",
        ResponseTemplate::new(200).set_body_raw(b"console.log(1)".to_vec(), "application/javascript"),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 1);
    assert_eq!(summary.assets_failed, 1);
    assert_eq!(summary.assets_downloaded, 1);

    let html = read(&dir, "index.html");
    assert!(html.contains(r#"src="/img/missing.png""#));
    assert!(html.contains(r#"src="assets/js/app.js""#));
}

#[tokio::test]
async fn test_failed_page_does_not_abort_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/broken">Broken</a><a href="/ok">OK</a>"#), 1).await;
    // Not marked visited after failing, so the second link retries it
    mount(&server, "/broken", ResponseTemplate::new(500), 2).await;
    mount(&server, "/ok", page(r#"<a href="/broken">Broken again</a>"#), 1).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 2))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 2);
    assert_eq!(summary.pages_failed, 2);
    assert!(dir.path().join("ok.html").exists());
    assert!(!dir.path().join("broken.html").exists());
}

#[tokio::test]
async fn test_write_failure_does_not_abort_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // A plain file where the docs/ directory would go
    std::fs::write(dir.path().join("docs"), b"in the way").unwrap();

    mount(&server, "/", page(r#"<a href="/docs/guide">Guide</a><a href="/contact">Contact</a>"#), 1).await;
    mount(&server, "/docs/guide", page("<p>Guide</p>"), 1).await;
    mount(&server, "/contact", page("<p>Contact</p>"), 1).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 1))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 2);
    assert_eq!(summary.pages_failed, 1);
    assert!(read(&dir, "contact.html").contains("Contact"));
    assert_eq!(read(&dir, "docs"), "in the way");
}

#[tokio::test]
async fn test_repeated_asset_on_one_page_downloaded_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(
        &server,
        "/",
        page(r#"<img src="/a.png"><img src="a.png"><div style="background: url('/a.png')">x</div>"#),
        1,
    )
    .await;
    mount(
        &server,
        "/a.png",
        ResponseTemplate::new(200).set_body_raw(PNG_BYTES.to_vec(), "image/png"),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 0))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.assets_downloaded, 1);
    assert_eq!(summary.assets_reused, 2);

    let html = read(&dir, "index.html");
    assert_eq!(html.matches(r#"src="assets/image/a.png""#).count(), 2);
    assert!(html.contains("url('assets/image/a.png')"));
    assert!(!dir.path().join("assets/image/a-1.png").exists());
}

#[tokio::test]
async fn test_failed_asset_retried_by_later_reference() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<img src="/flaky.png"><a href="/next">Next</a>"#), 1).await;
    mount(&server, "/next", page(r#"<img src="/flaky.png">"#), 1).await;

    // First request fails, the second one succeeds
    Mock::given(method("GET"))
        .and(path("/flaky.png"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount(
        &server,
        "/flaky.png",
        ResponseTemplate::new(200).set_body_raw(PNG_BYTES.to_vec(), "image/png"),
        1,
    )
    .await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 1))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.assets_failed, 1);
    assert_eq!(summary.assets_downloaded, 1);
    assert!(read(&dir, "index.html").contains(r#"src="/flaky.png""#));
    assert!(read(&dir, "next.html").contains(r#"src="assets/image/flaky.png""#));
}

#[tokio::test]
async fn test_non_html_page_saved_unchanged() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let pdf: &[u8] = b"%PDF-1.4\n\xff\xfe\x00binary<a href=x>";

    mount(&server, "/", page(r#"<a href="/files/report.pdf">Report</a>"#), 1).await;
    mount(
        &server,
        "/files/report.pdf",
        ResponseTemplate::new(200).set_body_raw(pdf.to_vec(), "application/pdf"),
        1,
    )
    .await;
    mount(&server, "/files/x", page("<p>never linked</p>"), 0).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 3))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 2);
    assert!(read(&dir, "index.html").contains(r#"href="files/report.pdf""#));

    let saved = std::fs::read(dir.path().join("files/report.pdf")).unwrap();
    assert_eq!(saved, pdf);
}

#[tokio::test]
async fn test_percent_encoded_page_written_decoded() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<a href="/about%20us">About</a>"#), 1).await;
    mount(&server, "/about%20us", page("<p>Who we are</p>"), 1).await;

    crawl(create_test_config(&server, "/", dir.path(), 1))
        .await
        .expect("Crawl failed");

    assert!(read(&dir, "index.html").contains(r#"href="about%20us.html""#));
    assert!(read(&dir, "about us.html").contains("Who we are"));
    assert!(!dir.path().join("about%20us.html").exists());
}

#[tokio::test]
async fn test_offsite_redirect_not_saved() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let port = server.address().port();

    mount(&server, "/", page(r#"<a href="/away">Away</a>"#), 1).await;
    // Same server, different host name
    mount(
        &server,
        "/away",
        ResponseTemplate::new(302)
            .insert_header("location", format!("http://localhost:{}/landing", port).as_str()),
        1,
    )
    .await;
    mount(&server, "/landing", page(r#"<a href="/deeper">Deeper</a>"#), 1).await;
    mount(&server, "/deeper", page("<p>Deeper</p>"), 0).await;

    let summary = crawl(create_test_config(&server, "/", dir.path(), 3))
        .await
        .expect("Crawl failed");

    assert_eq!(summary.pages_written, 1);
    assert_eq!(summary.pages_failed, 0);
    assert!(!dir.path().join("away.html").exists());
}

#[tokio::test]
async fn test_assets_skipped_when_disabled() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount(&server, "/", page(r#"<img src="/img/logo.png">"#), 1).await;
    mount(
        &server,
        "/img/logo.png",
        ResponseTemplate::new(200).set_body_raw(PNG_BYTES.to_vec(), "image/png"),
        0,
    )
    .await;

    let mut config = create_test_config(&server, "/", dir.path(), 0);
    config.crawler.download_assets = false;
    let summary = crawl(config).await.expect("Crawl failed");

    assert_eq!(summary.assets_downloaded, 0);
    assert!(read(&dir, "index.html").contains(r#"src="/img/logo.png""#));
    assert!(!dir.path().join("assets").exists());
}

#[tokio::test]
async fn test_invalid_root_url_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let config = Config::new("not a url", dir.path());

    let result = crawl(config).await;
    assert!(matches!(
        result,
        Err(MirrorError::Config(ConfigError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn test_analyze_reports_root_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let body = r#"<html><head><title>Home</title><link rel="stylesheet" href="/s.css"></head>
        <body><a href="/a">A</a><a href="/b">B</a><img src="/i.png"><script src="/x.js"></script></body></html>"#;

    mount(&server, "/", page(body), 1).await;

    let report = analyze(&create_test_config(&server, "/", dir.path(), 2))
        .await
        .expect("Analyze failed");

    assert_eq!(report.title.as_deref(), Some("Home"));
    assert_eq!(report.anchor_count, 2);
    assert_eq!(report.image_count, 1);
    assert_eq!(report.stylesheet_count, 1);
    assert_eq!(report.script_count, 1);
    assert_eq!(report.byte_size, body.len());

    // Nothing is written by analysis
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
