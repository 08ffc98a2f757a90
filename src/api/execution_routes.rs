//! Execution HTTP Routes
//!
//! Listing of executions per asset (joined with their test cases) and the
//! add-execution endpoint. Referential checks run before the insert, asset
//! first, so an unknown reference is a 404 and the store stays unchanged.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::request::{CreateExecution, MSG_EXECUTION_FIELDS};
use super::response::{ExecutionCreatedResponse, ExecutionListResponse};
use super::AppState;

/// Create execution routes
pub fn execution_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/executions", post(add_execution_handler))
        .route("/executions/{asset_id}", get(get_executions_handler))
        .with_state(state)
}

async fn get_executions_handler(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<i64>,
) -> ApiResult<Json<ExecutionListResponse>> {
    let asset = state
        .repo
        .get_asset(asset_id)
        .map_err(ApiError::internal)?
        .ok_or_else(ApiError::asset_not_found)?;

    let executions = state
        .repo
        .list_executions_for_asset(asset_id)
        .map_err(ApiError::internal)?;
    if executions.is_empty() {
        return Err(ApiError::no_data());
    }

    Ok(Json(ExecutionListResponse::new(executions, asset)))
}

async fn add_execution_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ExecutionCreatedResponse>> {
    let Json(body) = body.map_err(|_| ApiError::bad_request(MSG_EXECUTION_FIELDS))?;
    let cmd = CreateExecution::parse(&body)?;

    state
        .repo
        .get_asset(cmd.asset_id)
        .map_err(ApiError::unprocessable)?
        .ok_or_else(ApiError::unknown_asset)?;
    state
        .repo
        .get_test_case(cmd.test_case_id)
        .map_err(ApiError::unprocessable)?
        .ok_or_else(ApiError::unknown_test_case)?;

    let execution = state
        .repo
        .create_execution(cmd.test_case_id, cmd.asset_id, cmd.status, &cmd.details)
        .map_err(ApiError::unprocessable)?;
    let total = state
        .repo
        .count_executions()
        .map_err(ApiError::unprocessable)?;

    Ok(Json(ExecutionCreatedResponse::new(execution, total)))
}
