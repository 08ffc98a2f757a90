//! Test Case HTTP Routes
//!
//! CRUD endpoints for test cases with paginated listing. Each handler is a
//! linear pipeline: validate the body, hit the repository, shape the
//! envelope. Store failures on writes downgrade to 422, except delete,
//! which reports 500.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::pagination::{paginate, parse_page};
use super::request::{CreateTestCase, UpdateTestCase, MSG_NAME_REQUIRED};
use super::response::{
    TestCaseDeletedResponse, TestCaseListResponse, TestCaseResponse, TestCaseWithTotalResponse,
};
use super::AppState;

/// Create test case routes
pub fn test_case_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tests", get(get_tests_handler))
        .route("/tests", post(create_test_handler))
        .route("/tests/{test_case_id}", get(get_test_handler))
        .route("/tests/{test_case_id}", patch(update_test_handler))
        .route("/tests/{test_case_id}", delete(delete_test_handler))
        .with_state(state)
}

async fn get_tests_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<TestCaseListResponse>> {
    let selection = state.repo.list_test_cases().map_err(ApiError::internal)?;
    let current = paginate(&selection, parse_page(&params));

    if current.is_empty() {
        return Err(ApiError::no_data());
    }

    let total = state.repo.count_test_cases().map_err(ApiError::internal)?;
    Ok(Json(TestCaseListResponse::new(current.to_vec(), total)))
}

async fn create_test_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TestCaseWithTotalResponse>> {
    let Json(body) = body.map_err(|_| ApiError::bad_request(MSG_NAME_REQUIRED))?;
    let cmd = CreateTestCase::parse(&body)?;

    let test_case = state
        .repo
        .create_test_case(&cmd.name, cmd.description.as_deref())
        .map_err(ApiError::unprocessable)?;
    let total = state
        .repo
        .count_test_cases()
        .map_err(ApiError::unprocessable)?;

    Ok(Json(TestCaseWithTotalResponse::new(test_case, total)))
}

async fn get_test_handler(
    State(state): State<Arc<AppState>>,
    Path(test_case_id): Path<i64>,
) -> ApiResult<Json<TestCaseResponse>> {
    let test_case = state
        .repo
        .get_test_case(test_case_id)
        .map_err(ApiError::internal)?
        .ok_or_else(ApiError::test_case_not_found)?;

    Ok(Json(TestCaseResponse::new(test_case)))
}

async fn update_test_handler(
    State(state): State<Arc<AppState>>,
    Path(test_case_id): Path<i64>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TestCaseWithTotalResponse>> {
    let Json(body) = body.map_err(|_| ApiError::bad_request(MSG_NAME_REQUIRED))?;
    let cmd = UpdateTestCase::parse(&body)?;

    // Existence is checked up front so an unknown id stays a 404 rather
    // than a write failure.
    state
        .repo
        .get_test_case(test_case_id)
        .map_err(ApiError::internal)?
        .ok_or_else(ApiError::test_case_not_found)?;

    let test_case = state
        .repo
        .update_test_case(test_case_id, &cmd.name, cmd.description.as_deref())
        .map_err(ApiError::unprocessable)?
        .ok_or_else(ApiError::test_case_not_found)?;
    let total = state
        .repo
        .count_test_cases()
        .map_err(ApiError::unprocessable)?;

    Ok(Json(TestCaseWithTotalResponse::new(test_case, total)))
}

async fn delete_test_handler(
    State(state): State<Arc<AppState>>,
    Path(test_case_id): Path<i64>,
) -> ApiResult<Json<TestCaseDeletedResponse>> {
    state
        .repo
        .get_test_case(test_case_id)
        .map_err(ApiError::internal)?
        .ok_or_else(ApiError::test_case_not_found)?;

    let deleted = state
        .repo
        .delete_test_case(test_case_id)
        .map_err(ApiError::internal)?;
    if !deleted {
        return Err(ApiError::test_case_not_found());
    }

    let total = state.repo.count_test_cases().map_err(ApiError::internal)?;
    Ok(Json(TestCaseDeletedResponse::new(test_case_id, total)))
}
