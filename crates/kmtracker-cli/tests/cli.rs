//! CLI integration tests against a mock API.
//!
//! The binary is run as a subprocess with `KMTRACKER_API` pointing at a
//! wiremock server and `KMTRACKER_CREDENTIALS` at a temporary file.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_success, stored_access, write_credentials};

fn api(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn user() -> Value {
    json!({
        "id": 7,
        "username": "alice",
        "email": "alice@example.com",
        "first_name": "Alice",
        "last_name": "Virtanen",
        "company": "Acme Oy",
        "created_at": "2025-01-01T12:00:00Z"
    })
}

fn trip() -> Value {
    json!({
        "id": 12,
        "user": 7,
        "date": "2025-03-14",
        "start_address": "Mannerheimintie 1, Helsinki",
        "end_address": "Hämeenkatu 10, Tampere",
        "distance_km": "178.40",
        "purpose": "Customer meeting",
        "is_manual": true,
        "created_at": "2025-03-14T08:00:00Z",
        "updated_at": "2025-03-14T08:00:00Z"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_session_error() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");

    let output = run_cli(&["whoami"], &api(&server), &credentials);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No active session"),
        "Expected 'no session' error, got: {}",
        stderr
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_whoami() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user(),
            "tokens": {"access": "A1", "refresh": "R1"},
            "message": "Login successful"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user()))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["login", "--username", "alice", "--password", "secret"],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("Logged in successfully"));
    assert_eq!(stored_access(&credentials).as_deref(), Some("A1"));

    let stdout = run_cli_success(&["whoami", "--json"], &api(&server), &credentials);
    let profile: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(profile["username"], "alice");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let output = run_cli(
        &["login", "--username", "alice", "--password", "wrong"],
        &api(&server),
        &credentials,
    );
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid credentials"), "got: {}", stderr);
    assert!(!stderr.contains("session has ended"));
    assert!(!credentials.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_is_refreshed_and_persisted() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/trips/12/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trips/12/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip()))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["trips", "show", "12"], &api(&server), &credentials);
    assert!(stdout.contains("178.40 km"));
    assert_eq!(stored_access(&credentials).as_deref(), Some("A2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_refresh_ends_session() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/trips/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["trips", "list"], &api(&server), &credentials);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("session has ended"), "got: {}", stderr);
    assert!(stderr.contains("Token is blacklisted"), "got: {}", stderr);
    assert!(!credentials.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(205))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["logout"], &api(&server), &credentials);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("session has ended"));
    assert!(!credentials.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_trips_summary() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/trips/monthly-summary/"))
        .and(query_param("year", "2025"))
        .and(query_param("month", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "year": 2025,
            "month": 3,
            "total_km": "178.40",
            "trip_count": 1,
            "trips": [trip()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["trips", "summary", "--year", "2025", "--month", "3"],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("2025-03"));
    assert!(stdout.contains("178.40 km"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_trip_calculates_missing_distance() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("POST"))
        .and(path("/api/trips/calculate-distance/"))
        .and(body_json(json!({
            "start_address": "Mannerheimintie 1, Helsinki",
            "end_address": "Hämeenkatu 10, Tampere"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"distance_km": 178.4})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/trips/"))
        .and(body_json(json!({
            "date": "2025-03-14",
            "start_address": "Mannerheimintie 1, Helsinki",
            "end_address": "Hämeenkatu 10, Tampere",
            "distance_km": 178.4,
            "purpose": "Customer meeting",
            "is_manual": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(trip()))
        .expect(1)
        .mount(&server)
        .await;

    run_cli_success(
        &[
            "trips",
            "add",
            "--from",
            "Mannerheimintie 1, Helsinki",
            "--to",
            "Hämeenkatu 10, Tampere",
            "--purpose",
            "Customer meeting",
            "--date",
            "2025-03-14",
        ],
        &api(&server),
        &credentials,
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_month_out_of_range() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    let output = run_cli(
        &["reports", "generate", "--year", "2025", "--month", "13"],
        &api(&server),
        &credentials,
    );
    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_trips_edit_patches_given_fields() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("PATCH"))
        .and(path("/api/trips/12/"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({"purpose": "Site visit", "distance_km": 180.0, "is_manual": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip()))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["trips", "edit", "12", "--purpose", "Site visit", "--distance", "180"],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("Updated trip 12"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_trips_edit_without_changes_sends_nothing() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    let output = run_cli(&["trips", "edit", "12"], &api(&server), &credentials);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing to change"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_update() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    let mut updated = user();
    updated["company"] = json!("Beta Oy");

    Mock::given(method("PATCH"))
        .and(path("/api/auth/profile/"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({"company": "Beta Oy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["profile", "--company", "Beta Oy"],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("Profile updated"));
    assert!(stdout.contains("Beta Oy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_change_password() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("POST"))
        .and(path("/api/auth/change-password/"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({"old_password": "0ld", "new_password": "n3w"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Password changed successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["password", "--old", "0ld", "--new", "n3w"],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("Password changed successfully"));
    assert_eq!(stored_access(&credentials).as_deref(), Some("A1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reports_download_writes_pdf() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    let target = temp.path().join("march.pdf");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/reports/5/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "user": 7,
            "year": 2025,
            "month": 3,
            "total_km": "356.80",
            "trip_count": 2,
            "pdf_file": "/media/reports/2025-03.pdf",
            "created_at": "2025-04-01T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/reports/2025-03.pdf"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 march".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["reports", "download", "5", "--output", target.to_str().unwrap()],
        &api(&server),
        &credentials,
    );
    assert!(stdout.contains("Saved report"));
    assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.4 march");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reports_download_without_pdf_fails() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let credentials = temp.path().join("credentials.json");
    let target = temp.path().join("missing.pdf");
    write_credentials(&credentials, "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/api/reports/6/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 6,
            "user": 7,
            "year": 2025,
            "month": 4,
            "total_km": "0.00",
            "trip_count": 0,
            "pdf_file": null,
            "created_at": "2025-05-01T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let output = run_cli(
        &["reports", "download", "6", "--output", target.to_str().unwrap()],
        &api(&server),
        &credentials,
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("has no PDF"));
    assert!(!target.exists());
}

#[test]
fn test_version_reports_a_semver_prefix() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_kmtracker"))
        .arg("--version")
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout
        .trim()
        .strip_prefix("kmtracker ")
        .expect("version line starts with the binary name");
    assert!(
        version.starts_with(|c: char| c.is_ascii_digit()),
        "unexpected version: {}",
        version
    );
}
