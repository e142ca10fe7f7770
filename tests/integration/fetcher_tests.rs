use crate::support::{fast_retry, mount_listing};
use pho::crawler::{build_http_client, Transport};
use pho::Fetcher;
use reqwest::{Client, Response};
use std::cell::Cell;
use std::io;
use std::time::Duration;
use wiremock::MockServer;

/// Refuses the first `failures` requests, then forwards to a real client
struct FlakyTransport {
    client: Client,
    failures: Cell<u32>,
}

impl Transport for FlakyTransport {
    type Error = io::Error;

    async fn get(&self, url: &str) -> Result<Response, io::Error> {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }

        Client::get(&self.client, url)
            .send()
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

#[tokio::test]
async fn test_retries_until_response() {
    let server = MockServer::start().await;
    mount_listing(&server, "/var/albums", &["A/"]).await;

    let transport = FlakyTransport {
        client: build_http_client(Duration::from_secs(5)).unwrap(),
        failures: Cell::new(2),
    };
    let fetcher = Fetcher::new(transport, fast_retry());

    let mut waits = Vec::new();
    let page = fetcher
        .fetch_with_notify(&format!("{}/var/albums", server.uri()), |error, wait| {
            assert_eq!(error.kind(), io::ErrorKind::ConnectionRefused);
            waits.push(wait);
        })
        .await
        .expect("fetch should eventually succeed");

    assert_eq!(page.status(), 200);
    assert!(page.is_index());
    assert_eq!(waits.len(), 2);
    assert!(waits[0] <= waits[1]);
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let server = MockServer::start().await;
    let client = build_http_client(Duration::from_secs(5)).unwrap();
    let fetcher = Fetcher::new(client, fast_retry());

    let mut retries = 0;
    let page = fetcher
        .fetch_with_notify(&format!("{}/var/albums/missing", server.uri()), |_, _| {
            retries += 1;
        })
        .await
        .expect("a 404 is still a response");

    assert_eq!(page.status(), 404);
    assert!(!page.is_index());
    assert_eq!(retries, 0);
}
