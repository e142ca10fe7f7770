//! Shared helpers: mock gallery pages and a recording visitor

use pho::crawler::{build_http_client, Page};
use pho::visitor::{VisitError, VisitResult, Visitor};
use pho::{Fetcher, RetryPolicy, Site, Walker};
use std::io;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Album prefix used by every mock gallery
pub const PREFIX: &str = "/var/albums";

/// Retry policy short enough for tests
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        initial_interval: Duration::from_millis(1),
        multiplier: 2.0,
        max_interval: Duration::from_millis(10),
    }
}

/// Builds a walker against the mock server
pub fn walker(server: &MockServer, recurse: bool) -> Walker {
    let client = build_http_client(Duration::from_secs(5)).expect("Failed to build client");
    Walker::new(
        Fetcher::new(client, fast_retry()),
        Site::new(server.uri(), PREFIX),
        recurse,
    )
}

/// Serves an HTML listing with one anchor per link
pub async fn mount_listing(server: &MockServer, remote_path: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{0}">{0}</a>"#, link))
        .collect();
    mount_html(
        server,
        remote_path,
        &format!("<html><body>{}</body></html>", anchors),
    )
    .await;
}

/// Serves a raw HTML body
pub async fn mount_html(server: &MockServer, remote_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(remote_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// Serves a leaf resource
pub async fn mount_leaf(server: &MockServer, remote_path: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(remote_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type))
        .mount(server)
        .await;
}

/// Serves the tree used by most walk tests:
///
/// ```text
/// /          -> A/, B
/// /A         -> A1, A2 (plus a parent link)
/// /A/A1, /A/A2, /B are JPEG leaves
/// ```
pub async fn mount_two_level_tree(server: &MockServer) {
    mount_listing(server, "/var/albums", &["A/", "B"]).await;
    mount_listing(server, "/var/albums/A", &["/var/albums/", "A1", "A2"]).await;
    mount_leaf(server, "/var/albums/A/A1", "image/jpeg", b"a1").await;
    mount_leaf(server, "/var/albums/A/A2", "image/jpeg", b"a2").await;
    mount_leaf(server, "/var/albums/B", "image/jpeg", b"b").await;
}

/// Returns true if the server saw a request for `remote_path`
pub async fn was_requested(server: &MockServer, remote_path: &str) -> bool {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .any(|request| request.url.path() == remote_path)
}

/// Visitor that records every callback and can be told to fail
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
    pub fail_index: Option<&'static str>,
    pub fail_leaf: Option<&'static str>,
}

impl Recorder {
    pub fn failing_index(node: &'static str) -> Self {
        Self {
            fail_index: Some(node),
            ..Self::default()
        }
    }

    pub fn failing_leaf(base: &'static str) -> Self {
        Self {
            fail_leaf: Some(base),
            ..Self::default()
        }
    }
}

fn failure(what: &str) -> VisitError {
    VisitError::Io(io::Error::new(io::ErrorKind::Other, format!("cannot handle {}", what)))
}

impl Visitor for Recorder {
    fn on_index(&mut self, base: &str, node: &str, depth: usize) -> VisitResult {
        self.events.push(format!("index {} {} {}", base, node, depth));
        if self.fail_index == Some(node) {
            return Err(failure(node));
        }
        Ok(())
    }

    async fn on_leaf(&mut self, page: Page, base: &str) -> VisitResult {
        self.events
            .push(format!("leaf {} {}", base, page.content_type()));
        if self.fail_leaf == Some(base) {
            return Err(failure(base));
        }
        Ok(())
    }
}
