//! # HTTP API
//!
//! Route layer for the test case management API: request validation,
//! pagination, response envelopes, and the server assembly.

pub mod errors;
pub mod execution_routes;
pub mod pagination;
pub mod request;
pub mod response;
pub mod server;
pub mod test_case_routes;

use crate::repo::Repository;

/// Shared state injected into every route handler at startup
pub struct AppState {
    pub repo: Repository,
}

impl AppState {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}
