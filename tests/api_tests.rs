//! API Integration Tests
//!
//! Drives the full router with in-process requests against an in-memory
//! database: every route's success and failure paths, the pagination
//! window math, the validation ordering for executions, and the uniform
//! error envelope.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use tower::ServiceExt;

use testtrack::api::server::HttpServer;
use testtrack::config::ServerConfig;
use testtrack::db::models::SQL_DATETIME_FORMAT;
use testtrack::db::Database;
use testtrack::repo::Repository;

// =============================================================================
// Helper Functions
// =============================================================================

fn empty_app() -> Router {
    let repo = Repository::new(Database::open_in_memory().unwrap());
    HttpServer::new(ServerConfig::default(), repo).router()
}

/// Router over a store seeded with one asset ("Device A", id 1) and two
/// test cases ("Login" id 1, "Checkout" id 2).
fn seeded_app() -> Router {
    let repo = Repository::new(Database::open_in_memory().unwrap());
    repo.create_asset("Device A").unwrap();
    repo.create_test_case("Login", Some("Checks the login flow"))
        .unwrap();
    repo.create_test_case("Checkout", None).unwrap();
    HttpServer::new(ServerConfig::default(), repo).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn assert_error_envelope(status: StatusCode, body: &Value) {
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], status.as_u16());
    assert!(body["message"].is_string());
    assert!(!body["message"].as_str().unwrap().is_empty());
}

// =============================================================================
// Root
// =============================================================================

#[tokio::test]
async fn test_index() {
    let app = empty_app();
    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Welcome to the test case management API");
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let app = empty_app();
    let (status, body) = send(&app, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

// =============================================================================
// Test Case Listing & Pagination
// =============================================================================

#[tokio::test]
async fn test_retrieve_tests() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/tests")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["test_cases"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_test_cases"], 2);
}

#[tokio::test]
async fn test_retrieve_tests_on_empty_store_is_404() {
    let app = empty_app();
    let (status, body) = send(&app, get("/tests")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
    assert_eq!(body["message"], "No data found in the database.");
}

#[tokio::test]
async fn test_pagination_window() {
    let app = seeded_app();
    // Third test case pushes the listing past one page.
    send(&app, json_request(Method::POST, "/tests", json!({"name": "Search"}))).await;

    let (status, body) = send(&app, get("/tests?page=1")).await;
    assert_eq!(status, StatusCode::OK);
    let page_one = body["test_cases"].as_array().unwrap();
    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0]["id"], 1);
    assert_eq!(page_one[1]["id"], 2);

    let (status, body) = send(&app, get("/tests?page=2")).await;
    assert_eq!(status, StatusCode::OK);
    let page_two = body["test_cases"].as_array().unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0]["id"], 3);
    assert_eq!(body["total_test_cases"], 3);
}

#[tokio::test]
async fn test_pagination_past_the_end_is_404() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/tests?page=1000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

#[tokio::test]
async fn test_pagination_garbage_page_falls_back_to_first() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/tests?page=abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["test_cases"][0]["id"], 1);
}

// =============================================================================
// Test Case Creation
// =============================================================================

#[tokio::test]
async fn test_create_new_test() {
    let app = empty_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/tests",
            json!({
                "name": "New Test Case",
                "description": "New Test Case Description"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["test_case"]["name"], "New Test Case");
    assert_eq!(body["total_test_cases"], 1);
}

#[tokio::test]
async fn test_400_create_new_test_without_name() {
    let app = empty_app();
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/tests", json!({"testing": "xxx"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(status, &body);
    assert_eq!(body["message"], "The request body must contain 'name' field.");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = empty_app();
    let (_, created) = send(
        &app,
        json_request(Method::POST, "/tests", json!({"name": "X", "description": "Y"})),
    )
    .await;
    let id = created["test_case"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/tests/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["test_case"],
        json!({"id": id, "name": "X", "description": "Y"})
    );
}

// =============================================================================
// Single Test Case
// =============================================================================

#[tokio::test]
async fn test_get_specific_test() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/tests/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["test_case"]["id"], 1);
    assert_eq!(body["test_case"]["name"], "Login");
}

#[tokio::test]
async fn test_get_nonexistent_test() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/tests/10000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

// =============================================================================
// Test Case Update
// =============================================================================

#[tokio::test]
async fn test_update_test() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(Method::PATCH, "/tests/1", json!({"name": "Updated Test Case"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["test_case"]["name"], "Updated Test Case");
    // Description is untouched when the body does not carry one.
    assert_eq!(body["test_case"]["description"], "Checks the login flow");
    assert_eq!(body["total_test_cases"], 2);
}

#[tokio::test]
async fn test_update_overwrites_description_when_supplied() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            "/tests/1",
            json!({"name": "Login", "description": "rewritten"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["test_case"]["description"], "rewritten");
}

#[tokio::test]
async fn test_update_test_without_name() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(Method::PATCH, "/tests/1", json!({"testing": "Updated"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(status, &body);
}

#[tokio::test]
async fn test_update_nonexistent_test() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(Method::PATCH, "/tests/10000", json!({"name": "Updated"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

// =============================================================================
// Test Case Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_test_then_delete_again() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        json_request(Method::DELETE, "/tests/2", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted_test_case_id"], 2);
    assert_eq!(body["total_test_cases"], 1);

    let (status, body) = send(
        &app,
        json_request(Method::DELETE, "/tests/2", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

#[tokio::test]
async fn test_get_deleted_test_is_404() {
    let app = seeded_app();
    send(&app, json_request(Method::DELETE, "/tests/2", json!({}))).await;

    let (status, _) = send(&app, get("/tests/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_404_delete_nonexistent_test() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(Method::DELETE, "/tests/10000", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(status, &body);
}

// =============================================================================
// Method Not Allowed
// =============================================================================

#[tokio::test]
async fn test_405_using_wrong_method_to_retrieve_tests() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/tests", json!({"name": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_error_envelope(status, &body);
}

#[tokio::test]
async fn test_405_creation_not_allowed_on_single_test() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/tests/45",
            json!({"name": "New Test Case", "description": "New Test Case Description"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_error_envelope(status, &body);
}

// =============================================================================
// Execution Creation
// =============================================================================

#[tokio::test]
async fn test_add_execution() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/executions",
            json!({
                "status": true,
                "details": "All assertions passed.",
                "asset_id": 1,
                "test_case_id": 1
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_executions"], 1);

    let execution = &body["execution"];
    assert_eq!(execution["test_case_id"], 1);
    assert_eq!(execution["asset_id"], 1);
    assert_eq!(execution["status"], true);
    assert_eq!(execution["details"], "All assertions passed.");

    let timestamp = execution["timestamp"].as_str().unwrap();
    assert!(NaiveDateTime::parse_from_str(timestamp, SQL_DATETIME_FORMAT).is_ok());
}

#[tokio::test]
async fn test_400_add_execution_with_missing_fields() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/executions",
            json!({"status": true, "asset_id": 1, "test_case_id": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(status, &body);
    assert_eq!(
        body["message"],
        "The request body must contain 'status', 'details', 'asset_id', and 'test_case_id' fields."
    );
}

#[tokio::test]
async fn test_400_add_execution_with_string_status() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/executions",
            json!({
                "status": "true",
                "details": "x",
                "asset_id": 1,
                "test_case_id": 1
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The status field must be a boolean.");
}

#[tokio::test]
async fn test_404_add_execution_with_unknown_asset() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/executions",
            json!({
                "status": true,
                "details": "x",
                "asset_id": 10000,
                "test_case_id": 1
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The asset was not found in the database.");

    // Nothing was inserted: the asset's listing still reports no data.
    let (status, _) = send(&app, get("/executions/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_404_add_execution_with_unknown_test_case() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/executions",
            json!({
                "status": true,
                "details": "x",
                "asset_id": 1,
                "test_case_id": 10000
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The test case was not found in the database.");
}

// =============================================================================
// Execution Listing
// =============================================================================

#[tokio::test]
async fn test_get_executions_for_asset() {
    let app = seeded_app();
    for (test_case_id, passed) in [(1, true), (2, false)] {
        send(
            &app,
            json_request(
                Method::POST,
                "/executions",
                json!({
                    "status": passed,
                    "details": "run details",
                    "asset_id": 1,
                    "test_case_id": test_case_id
                }),
            ),
        )
        .await;
    }

    let (status, body) = send(&app, get("/executions/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["asset"], json!({"id": 1, "name": "Device A"}));
    assert_eq!(body["total_executions"], 2);

    let executions = body["executions"].as_array().unwrap();
    assert_eq!(executions.len(), 2);
    assert_eq!(executions[0]["status"], true);
    assert_eq!(executions[0]["test_case"], json!({"id": 1, "name": "Login"}));
    assert_eq!(executions[1]["test_case"]["name"], "Checkout");

    let execution_date = executions[0]["execution_date"].as_str().unwrap();
    assert!(NaiveDateTime::parse_from_str(execution_date, SQL_DATETIME_FORMAT).is_ok());
}

#[tokio::test]
async fn test_404_get_executions_for_unknown_asset() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/executions/10000")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "The requested asset was not found in the database."
    );
}

#[tokio::test]
async fn test_404_get_executions_for_asset_without_runs() {
    let app = seeded_app();
    let (status, body) = send(&app, get("/executions/1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No data found in the database.");
}
