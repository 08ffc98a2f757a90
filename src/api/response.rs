//! # Response Envelopes
//!
//! Success envelope types for every route. Field names are part of the
//! API contract and must not change.

use serde::Serialize;

use crate::db::models::{Asset, Execution, ExecutionSummary, TestCase};

/// Welcome envelope for the root route
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub success: bool,
    pub message: String,
}

impl WelcomeResponse {
    pub fn new() -> Self {
        Self {
            success: true,
            message: "Welcome to the test case management API".to_string(),
        }
    }
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Paginated test case listing
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseListResponse {
    pub success: bool,
    pub test_cases: Vec<TestCase>,
    pub total_test_cases: usize,
}

impl TestCaseListResponse {
    pub fn new(test_cases: Vec<TestCase>, total_test_cases: usize) -> Self {
        Self {
            success: true,
            test_cases,
            total_test_cases,
        }
    }
}

/// Single test case lookup
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseResponse {
    pub success: bool,
    pub test_case: TestCase,
}

impl TestCaseResponse {
    pub fn new(test_case: TestCase) -> Self {
        Self {
            success: true,
            test_case,
        }
    }
}

/// Created or updated test case together with the new total
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseWithTotalResponse {
    pub success: bool,
    pub test_case: TestCase,
    pub total_test_cases: usize,
}

impl TestCaseWithTotalResponse {
    pub fn new(test_case: TestCase, total_test_cases: usize) -> Self {
        Self {
            success: true,
            test_case,
            total_test_cases,
        }
    }
}

/// Deleted test case id together with the new total
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseDeletedResponse {
    pub success: bool,
    pub deleted_test_case_id: i64,
    pub total_test_cases: usize,
}

impl TestCaseDeletedResponse {
    pub fn new(deleted_test_case_id: i64, total_test_cases: usize) -> Self {
        Self {
            success: true,
            deleted_test_case_id,
            total_test_cases,
        }
    }
}

/// Executions recorded against one asset, joined with their test cases
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionListResponse {
    pub success: bool,
    pub executions: Vec<ExecutionSummary>,
    pub asset: Asset,
    pub total_executions: usize,
}

impl ExecutionListResponse {
    pub fn new(executions: Vec<ExecutionSummary>, asset: Asset) -> Self {
        let total_executions = executions.len();
        Self {
            success: true,
            executions,
            asset,
            total_executions,
        }
    }
}

/// Created execution together with the new total
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionCreatedResponse {
    pub success: bool,
    pub execution: Execution,
    pub total_executions: usize,
}

impl ExecutionCreatedResponse {
    pub fn new(execution: Execution, total_executions: usize) -> Self {
        Self {
            success: true,
            execution,
            total_executions,
        }
    }
}
