//! Integration tests for roster-svc API endpoints
//!
//! Tests cover:
//! - Member, main, class and guild lookups
//! - Dump upload and merge
//! - Health, identity and log endpoints
//!
//! Each test runs against its own temporary dump directory.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use roster_svc::store::RosterStore;
use roster_svc::{build_router, AppState};

const CURRENT: &str = "Vets of Norrath_firiona-20211201-120000.txt";
const NEXT: &str = "Vets of Norrath_firiona-20211220-211345.txt";

const DUMP: &str = "\
Alice\t65\tCleric\tMember\t\t12/01/21\tPoK\tHealer\t\ton\toff\t120\t11/30/21
Bob\t60\tWarrior\tMember\tA\t12/02/21\tPoK\tAlice 2nd main\t\toff\toff\t0\t
Carol\t62\tWizard\tMember\tA\t11/15/21\tNexus\t\t\toff\toff\t5\t
";

struct TestApp {
    dir: TempDir,
    app: Router,
}

/// Test helper: App over a dump directory holding `DUMP`
fn setup_app(log_file: Option<&str>) -> TestApp {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CURRENT), DUMP).unwrap();

    let log_file = log_file.map(|contents| {
        let path = dir.path().join("roster-service.log");
        fs::write(&path, contents).unwrap();
        path
    });

    let store = RosterStore::open(dir.path()).expect("Should load test dump");
    let app = build_router(AppState::new(store, log_file, 1024 * 1024));
    TestApp { dir, app }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: multipart upload with a single `file` part
fn upload(file_name: &str, contents: &str) -> Request<Body> {
    let boundary = "roster-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: text/plain\r\n\r\n{c}\r\n--{b}--\r\n",
        b = boundary,
        f = file_name,
        c = contents
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap()
}

/// Test helper: Send a request, return status and JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_get_member_case_insensitive() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/char/aLiCe")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["class"], "Cleric");
    assert_eq!(body["level"], 65);
}

#[tokio::test]
async fn test_get_member_not_found() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/char/Nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "member_not_found");
    assert!(body["error"].as_str().unwrap().contains("Nobody"));
}

#[tokio::test]
async fn test_get_main_of_alt_and_main() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/main/bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");

    let (status, body) = send(&t.app, get("/main/Alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
}

#[tokio::test]
async fn test_get_main_without_note() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/main/Carol")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "no_annotation");
}

#[tokio::test]
async fn test_get_class_members() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/class/cleric")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Alice"]);

    let (status, body) = send(&t.app, get("/class/wizard,WARRIOR")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Bob", "Carol"]);
}

#[tokio::test]
async fn test_get_class_empty_and_unknown() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/class/bard")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "no_class_members");

    let (status, body) = send(&t.app, get("/class/jester")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "unknown_class");
}

#[tokio::test]
async fn test_get_guild_in_dump_order() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, get("/guild")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Alice", "Bob", "Carol"]);
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn test_upload_merges_and_replaces_dump() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, upload(NEXT, "Alice\t65\tCleric\tOfficer\n")).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["members"], 1);
    assert_eq!(body["removed"], serde_json::json!(["Bob", "Carol"]));
    assert!(body["message"].as_str().unwrap().contains(NEXT));

    let (_, body) = send(&t.app, get("/guild")).await;
    assert_eq!(names(&body), vec!["Alice"]);
    assert_eq!(body[0]["rank"], "Officer");
    // Blank columns in the upload keep the previous values
    assert_eq!(body[0]["zone"], "PoK");

    let (status, _) = send(&t.app, get("/char/Bob")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(t.dir.path().join(NEXT).exists());
    assert!(!t.dir.path().join(CURRENT).exists());
}

#[tokio::test]
async fn test_upload_for_other_guild_rejected() {
    let t = setup_app(None);

    let (status, body) = send(
        &t.app,
        upload("Other Guild_firiona-20211220-211345.txt", "Alice\t65\tCleric\tOfficer\n"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "naming_mismatch");

    let (_, body) = send(&t.app, get("/guild")).await;
    assert_eq!(names(&body).len(), 3);
    assert!(t.dir.path().join(CURRENT).exists());
}

#[tokio::test]
async fn test_upload_unreadable_dump_rejected() {
    let t = setup_app(None);

    let (status, body) = send(&t.app, upload(NEXT, "this is not a guild dump")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "snapshot_unreadable");
    assert!(!t.dir.path().join(NEXT).exists());
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let t = setup_app(None);

    let boundary = "roster-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&t.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "missing_file");
}

// =============================================================================
// Health, identity and logs
// =============================================================================

#[tokio::test]
async fn test_health_reports_roster_and_counters() {
    let t = setup_app(None);

    send(&t.app, get("/char/Alice")).await;
    send(&t.app, get("/char/Nobody")).await;

    let (status, body) = send(&t.app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "roster-svc");
    assert_eq!(body["guild"], "Vets of Norrath");
    assert_eq!(body["server"], "firiona");
    assert_eq!(body["roster_count"], 3);
    assert_eq!(body["roster_file_size"], DUMP.len());
    assert_eq!(body["requests_handled"], 2);
    assert_eq!(body["errors"], 1);
    assert!(body["roster_path"].as_str().unwrap().ends_with(CURRENT));
    assert!(body["last_roster"].is_string());
}

#[tokio::test]
async fn test_guild_and_server_names() {
    let t = setup_app(None);

    let (_, body) = send(&t.app, get("/guildname")).await;
    assert_eq!(body["guild"], "Vets of Norrath");

    let (_, body) = send(&t.app, get("/servername")).await;
    assert_eq!(body["server"], "firiona");
}

#[tokio::test]
async fn test_logs() {
    let t = setup_app(Some("line one\nline two\n"));
    let response = t.app.clone().oneshot(get("/logs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"line one\nline two\n");

    let t = setup_app(None);
    let (status, body) = send(&t.app, get("/logs")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "logs_unavailable");
}
