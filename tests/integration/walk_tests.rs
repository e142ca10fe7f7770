use crate::support::{
    mount_html, mount_leaf, mount_listing, mount_two_level_tree, walker, was_requested, Recorder,
};
use pho::crawler::ParseError;
use pho::{FatalError, VisitError, WalkError};
use wiremock::MockServer;

fn full_walk_events() -> Vec<&'static str> {
    vec![
        "index / A/ 0",
        "index /A A1 1",
        "leaf /A/A1 image/jpeg",
        "index /A A2 1",
        "leaf /A/A2 image/jpeg",
        "index / B 0",
        "leaf /B image/jpeg",
    ]
}

#[tokio::test]
async fn test_depth_first_document_order() {
    let server = MockServer::start().await;
    mount_two_level_tree(&server).await;

    let mut recorder = Recorder::default();
    walker(&server, true)
        .walk("/", &mut recorder)
        .await
        .expect("walk should succeed");

    assert_eq!(recorder.events, full_walk_events());
}

#[tokio::test]
async fn test_without_recursion_only_root_links_are_visited() {
    let server = MockServer::start().await;
    mount_two_level_tree(&server).await;

    let mut recorder = Recorder::default();
    walker(&server, false)
        .walk("/", &mut recorder)
        .await
        .expect("walk should succeed");

    assert_eq!(recorder.events, vec!["index / A/ 0", "index / B 0"]);
    assert!(!was_requested(&server, "/var/albums/A").await);
}

#[tokio::test]
async fn test_leaf_failure_is_contained() {
    let server = MockServer::start().await;
    mount_two_level_tree(&server).await;

    let mut recorder = Recorder::failing_leaf("/A/A1");
    let result = walker(&server, true).walk("/", &mut recorder).await;

    assert!(result.is_ok(), "leaf failure escaped: {:?}", result);
    assert_eq!(recorder.events, full_walk_events());
}

#[tokio::test]
async fn test_index_failure_aborts_walk() {
    let server = MockServer::start().await;
    mount_two_level_tree(&server).await;

    let mut recorder = Recorder::failing_index("A2");
    let result = walker(&server, true).walk("/", &mut recorder).await;

    match result {
        Err(WalkError::Fatal(FatalError::Index { url, status, source })) => {
            assert_eq!(url, format!("{}/var/albums/A", server.uri()));
            assert_eq!(status, 200);
            assert!(matches!(source, VisitError::Io(_)));
        }
        other => panic!("expected index error, got {:?}", other),
    }

    assert_eq!(
        recorder.events,
        vec![
            "index / A/ 0",
            "index /A A1 1",
            "leaf /A/A1 image/jpeg",
            "index /A A2 1",
        ]
    );
    assert!(!was_requested(&server, "/var/albums/A/A2").await);
    assert!(!was_requested(&server, "/var/albums/B").await);
}

#[tokio::test]
async fn test_leaf_failure_at_root_surfaces() {
    let server = MockServer::start().await;
    mount_leaf(&server, "/var/albums/B", "image/jpeg", b"b").await;

    let mut recorder = Recorder::failing_leaf("/B");
    let result = walker(&server, true).walk("/B", &mut recorder).await;

    match result {
        Err(WalkError::Leaf(e)) => {
            assert_eq!(e.url, format!("{}/var/albums/B", server.uri()));
            assert_eq!(e.content_type, "image/jpeg");
        }
        other => panic!("expected leaf error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_anchor_without_href_is_fatal() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/var/albums",
        r#"<html><body><a href="A/">A</a><a name="broken">?</a><a href="B">B</a></body></html>"#,
    )
    .await;
    mount_listing(&server, "/var/albums/A", &[]).await;

    let mut recorder = Recorder::default();
    let result = walker(&server, true).walk("/", &mut recorder).await;

    assert!(matches!(
        result,
        Err(WalkError::Fatal(FatalError::MalformedListing {
            source: ParseError::MissingHref(_),
            ..
        }))
    ));
    assert_eq!(recorder.events, vec!["index / A/ 0"]);
    assert!(!was_requested(&server, "/var/albums/B").await);
}

#[tokio::test]
async fn test_malformed_child_listing_stops_siblings() {
    let server = MockServer::start().await;
    mount_listing(&server, "/var/albums", &["A/", "B"]).await;
    mount_html(&server, "/var/albums/A", "<a>no target</a>").await;
    mount_leaf(&server, "/var/albums/B", "image/jpeg", b"b").await;

    let mut recorder = Recorder::default();
    let result = walker(&server, true).walk("/", &mut recorder).await;

    assert!(result.is_err());
    assert!(!result.unwrap_err().is_leaf());
    assert_eq!(recorder.events, vec!["index / A/ 0"]);
    assert!(!was_requested(&server, "/var/albums/B").await);
}

#[tokio::test]
async fn test_error_status_is_handled_as_leaf() {
    let server = MockServer::start().await;
    mount_listing(&server, "/var/albums", &["Gone"]).await;

    let mut recorder = Recorder::default();
    walker(&server, true)
        .walk("/", &mut recorder)
        .await
        .expect("walk should succeed");

    assert_eq!(recorder.events.len(), 2);
    assert_eq!(recorder.events[0], "index / Gone 0");
    assert!(recorder.events[1].starts_with("leaf /Gone"));
}

#[tokio::test]
async fn test_misnested_listing_visits_each_anchor_once() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/var/albums",
        r#"<p><a href="A/">A</p>caption<p><a href="B">B</a></p>"#,
    )
    .await;
    mount_listing(&server, "/var/albums/A", &["A1"]).await;
    mount_leaf(&server, "/var/albums/A/A1", "image/jpeg", b"a1").await;
    mount_leaf(&server, "/var/albums/B", "image/jpeg", b"b").await;

    let mut recorder = Recorder::default();
    walker(&server, true)
        .walk("/", &mut recorder)
        .await
        .expect("walk should succeed");

    assert_eq!(
        recorder.events,
        vec![
            "index / A/ 0",
            "index /A A1 1",
            "leaf /A/A1 image/jpeg",
            "index / B 0",
            "leaf /B image/jpeg",
        ]
    );
}
