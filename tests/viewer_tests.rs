use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use timelapse::models::commit::{parse_commit_message, ParsedCommitMessage};
use timelapse::models::snapshot::{Snapshot, SnapshotContents};
use timelapse::viewer::navigation::NavigationState;
use timelapse::viewer::service::{ServiceError, SnapshotService};
use timelapse::viewer::timelapse::{TimelapseSession, ViewState};

fn snap(hash: &str, date: &str) -> Snapshot {
    Snapshot {
        hash: hash.to_string(),
        message: format!("WEB3 - John DOE - {}", hash),
        author: "John DOE".to_string(),
        date: DateTime::parse_from_rfc3339(date)
            .unwrap()
            .with_timezone(&Utc),
        folder: "target".to_string(),
        has_screenshot: false,
    }
}

fn loaded(snaps: Vec<Snapshot>) -> NavigationState {
    let mut nav = NavigationState::new();
    nav.load(snaps);
    nav
}

// ==================== Navigation Tests ====================

#[test]
fn test_load_sorts_newest_first() {
    let nav = loaded(vec![
        snap("old", "2024-01-01T00:00:00Z"),
        snap("new", "2024-03-01T00:00:00Z"),
        snap("mid", "2024-02-01T00:00:00Z"),
    ]);

    let order: Vec<&str> = nav.snapshots().iter().map(|s| s.hash.as_str()).collect();
    assert_eq!(order, vec!["new", "mid", "old"]);
    assert_eq!(nav.current_index(), Some(0));
}

#[test]
fn test_load_ties_keep_original_order() {
    let nav = loaded(vec![
        snap("first", "2024-01-01T00:00:00Z"),
        snap("second", "2024-01-01T00:00:00Z"),
    ]);

    let order: Vec<&str> = nav.snapshots().iter().map(|s| s.hash.as_str()).collect();
    assert_eq!(order, vec!["first", "second"]);
}

#[test]
fn test_empty_load_has_no_cursor() {
    let nav = loaded(Vec::new());
    assert!(nav.is_empty());
    assert_eq!(nav.current_index(), None);
    assert!(nav.current().is_none());
    assert!(!nav.has_next());
    assert!(!nav.has_previous());
    assert_eq!(nav.display_number(), None);
}

#[test]
fn test_boundary_transitions_are_no_ops() {
    let mut nav = loaded(vec![
        snap("a", "2024-03-01T00:00:00Z"),
        snap("b", "2024-02-01T00:00:00Z"),
        snap("c", "2024-01-01T00:00:00Z"),
    ]);

    // At cursor 0 (newest), previous is a no-op.
    assert!(!nav.has_previous());
    nav.previous();
    assert_eq!(nav.current_index(), Some(0));

    // Walk to the end.
    nav.next();
    nav.next();
    assert_eq!(nav.current_index(), Some(2));

    // At the last element, next is a no-op.
    assert!(!nav.has_next());
    nav.next();
    assert_eq!(nav.current_index(), Some(2));
    assert!(nav.has_previous());
}

#[test]
fn test_go_to_out_of_range_is_ignored() {
    let mut nav = loaded(vec![
        snap("a", "2024-03-01T00:00:00Z"),
        snap("b", "2024-02-01T00:00:00Z"),
    ]);

    nav.go_to(1);
    assert_eq!(nav.current_index(), Some(1));

    nav.go_to(5);
    assert_eq!(nav.current_index(), Some(1));
}

#[test]
fn test_display_number_counts_from_oldest() {
    let mut nav = loaded(vec![
        snap("s1", "2024-05-01T00:00:00Z"),
        snap("s2", "2024-04-01T00:00:00Z"),
        snap("s3", "2024-03-01T00:00:00Z"),
        snap("s4", "2024-02-01T00:00:00Z"),
        snap("s5", "2024-01-01T00:00:00Z"),
    ]);

    // Newest is iteration #5.
    assert_eq!(nav.display_number(), Some(5));

    nav.go_to(4);
    // Oldest is iteration #1.
    assert_eq!(nav.display_number(), Some(1));
}

#[test]
fn test_display_date_and_time() {
    let s = snap("h", "2024-05-03T14:07:00Z");
    assert_eq!(s.display_date(), "3 May 2024");
    assert_eq!(s.display_time(), "14:07");
}

// ==================== Commit Message Tests ====================

#[test]
fn test_parse_full_commit_message() {
    assert_eq!(
        parse_commit_message("WEB3 - John DOE - Fixed navbar"),
        ParsedCommitMessage {
            classe: "WEB3".to_string(),
            name: "John DOE".to_string(),
            content: "Fixed navbar".to_string(),
        }
    );
}

#[test]
fn test_parse_two_part_commit_message() {
    assert_eq!(
        parse_commit_message("WEB3 - Fixed navbar"),
        ParsedCommitMessage {
            classe: "WEB3".to_string(),
            name: "Prenom NOM".to_string(),
            content: "Fixed navbar".to_string(),
        }
    );
}

#[test]
fn test_parse_free_form_commit_message() {
    assert_eq!(
        parse_commit_message("random text"),
        ParsedCommitMessage {
            classe: "Classe".to_string(),
            name: "Prenom NOM".to_string(),
            content: "random text".to_string(),
        }
    );
}

#[test]
fn test_parse_extra_separators_stay_in_content() {
    let parsed = parse_commit_message("WEB3 - John DOE - Fixed - navbar");
    assert_eq!(parsed.content, "Fixed - navbar");
}

#[test]
fn test_parse_empty_message_uses_defaults() {
    assert_eq!(
        parse_commit_message(""),
        ParsedCommitMessage {
            classe: "Classe".to_string(),
            name: "Prenom NOM".to_string(),
            content: "Update".to_string(),
        }
    );
}

// ==================== Session Tests ====================

/// Service with a fixed index and one single-file snapshot per hash.
struct FixtureService {
    snapshots: Vec<Snapshot>,
    documents: HashMap<String, String>,
    fail_reads: bool,
}

impl FixtureService {
    fn new(snapshots: Vec<Snapshot>) -> Self {
        let documents = snapshots
            .iter()
            .map(|s| {
                (
                    s.hash.clone(),
                    format!("<html><head></head><body>{}</body></html>", s.hash),
                )
            })
            .collect();
        Self {
            snapshots,
            documents,
            fail_reads: false,
        }
    }
}

#[async_trait]
impl SnapshotService for FixtureService {
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, ServiceError> {
        Ok(self.snapshots.clone())
    }

    async fn list_files(&self, hash: &str) -> Result<SnapshotContents, ServiceError> {
        if !self.documents.contains_key(hash) {
            return Err(ServiceError::NotFound(hash.to_string()));
        }
        Ok(SnapshotContents {
            hash: hash.to_string(),
            files: vec!["target/index.html".to_string()],
        })
    }

    async fn read_file(&self, hash: &str, path: &str) -> Result<String, ServiceError> {
        if self.fail_reads {
            return Err(ServiceError::Transport("connection reset".to_string()));
        }
        if path != "target/index.html" {
            return Err(ServiceError::NotFound(path.to_string()));
        }
        self.documents
            .get(hash)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(hash.to_string()))
    }

    fn screenshot_url(&self, hash: &str) -> String {
        format!("/api/snapshots/{}/screenshot.png", hash)
    }

    fn asset_base_url(&self, hash: &str, folder: &str) -> String {
        format!("/api/snapshots/{}/{}/", hash, folder)
    }
}

fn three_snapshots() -> Vec<Snapshot> {
    vec![
        snap("old", "2024-01-01T00:00:00Z"),
        snap("new", "2024-03-01T00:00:00Z"),
        snap("mid", "2024-02-01T00:00:00Z"),
    ]
}

#[tokio::test]
async fn test_init_shows_newest_snapshot() {
    let mut session = TimelapseSession::new(FixtureService::new(three_snapshots()));
    session.init().await.unwrap();

    match session.view() {
        ViewState::Document(doc) => assert!(doc.contains("new")),
        other => panic!("expected document, got {:?}", other),
    }
    assert_eq!(session.nav().display_number(), Some(3));
}

#[tokio::test]
async fn test_empty_index_is_distinct_from_error() {
    let mut session = TimelapseSession::new(FixtureService::new(Vec::new()));
    session.init().await.unwrap();
    assert_eq!(*session.view(), ViewState::Empty);
}

#[tokio::test]
async fn test_read_failure_becomes_failed_view() {
    let mut service = FixtureService::new(three_snapshots());
    service.fail_reads = true;
    let mut session = TimelapseSession::new(service);
    session.init().await.unwrap();

    assert!(matches!(session.view(), ViewState::Failed(_)));
}

#[tokio::test]
async fn test_stale_build_is_discarded() {
    let mut session = TimelapseSession::new(FixtureService::new(three_snapshots()));
    session.init().await.unwrap();

    // Two rapid navigations: the second supersedes the first.
    let slow = session.select(1).expect("in range");
    let fast = session.select(2).expect("in range");

    let slow_result = session.build(&slow).await;
    let fast_result = session.build(&fast).await;

    // The newest navigation lands first; the slow build must not overwrite it.
    assert!(session.commit(fast, fast_result));
    assert!(!session.commit(slow, slow_result));

    match session.view() {
        ViewState::Document(doc) => assert!(doc.contains("old")),
        other => panic!("expected document, got {:?}", other),
    }
}

#[tokio::test]
async fn test_session_navigation_boundaries() {
    let mut session = TimelapseSession::new(FixtureService::new(three_snapshots()));
    session.init().await.unwrap();

    // At the newest snapshot, previous yields no ticket.
    assert!(session.previous().is_none());

    // select out of range yields no ticket and keeps the cursor.
    assert!(session.select(10).is_none());
    assert_eq!(session.nav().current_index(), Some(0));

    // Walk to the oldest snapshot; next then yields no ticket.
    assert!(session.show(2).await);
    assert!(session.next().is_none());
}

#[tokio::test]
async fn test_show_renders_selected_snapshot() {
    let mut session = TimelapseSession::new(FixtureService::new(three_snapshots()));
    session.init().await.unwrap();

    assert!(session.show(1).await);
    match session.view() {
        ViewState::Document(doc) => assert!(doc.contains("mid")),
        other => panic!("expected document, got {:?}", other),
    }
    assert_eq!(session.current_snapshot().unwrap().hash, "mid");
}
