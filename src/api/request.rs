//! # Request Validation
//!
//! Typed write commands parsed from raw JSON bodies. Each write route
//! validates its body here before any repository call; key presence and
//! type rules produce 400 responses with the route's field message.

use serde_json::Value;

use super::errors::{ApiError, ApiResult};

pub const MSG_NAME_REQUIRED: &str = "The request body must contain 'name' field.";
pub const MSG_EXECUTION_FIELDS: &str =
    "The request body must contain 'status', 'details', 'asset_id', and 'test_case_id' fields.";
pub const MSG_STATUS_BOOLEAN: &str = "The status field must be a boolean.";
pub const MSG_IDS_INTEGER: &str = "The asset_id and test_case_id fields must be integers.";
pub const MSG_DETAILS_STRING: &str = "The details field must be a string.";

/// Placeholder stored when no execution details are supplied
pub const DEFAULT_EXECUTION_DETAILS: &str = "No details provided.";

/// Command for `POST /tests`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTestCase {
    pub name: String,
    pub description: Option<String>,
}

impl CreateTestCase {
    pub fn parse(body: &Value) -> ApiResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| ApiError::bad_request(MSG_NAME_REQUIRED))?;
        if !obj.contains_key("name") {
            return Err(ApiError::bad_request(MSG_NAME_REQUIRED));
        }
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::unprocessable("The 'name' field must be a string."))?;
        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Ok(Self {
            name: name.to_owned(),
            description,
        })
    }
}

/// Command for `PATCH /tests/{id}`
///
/// The description only overwrites the stored value when it is a non-empty
/// string; name is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTestCase {
    pub name: String,
    pub description: Option<String>,
}

impl UpdateTestCase {
    pub fn parse(body: &Value) -> ApiResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| ApiError::bad_request(MSG_NAME_REQUIRED))?;
        if !obj.contains_key("name") {
            return Err(ApiError::bad_request(MSG_NAME_REQUIRED));
        }
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::unprocessable("The 'name' field must be a string."))?;
        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Ok(Self {
            name: name.to_owned(),
            description,
        })
    }
}

/// Command for `POST /executions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExecution {
    pub test_case_id: i64,
    pub asset_id: i64,
    pub status: bool,
    pub details: String,
}

impl CreateExecution {
    pub fn parse(body: &Value) -> ApiResult<Self> {
        let obj = body
            .as_object()
            .ok_or_else(|| ApiError::bad_request(MSG_EXECUTION_FIELDS))?;
        for key in ["status", "details", "asset_id", "test_case_id"] {
            if !obj.contains_key(key) {
                return Err(ApiError::bad_request(MSG_EXECUTION_FIELDS));
            }
        }

        let status = obj
            .get("status")
            .and_then(Value::as_bool)
            .ok_or_else(|| ApiError::bad_request(MSG_STATUS_BOOLEAN))?;
        let asset_id = obj
            .get("asset_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| ApiError::bad_request(MSG_IDS_INTEGER))?;
        let test_case_id = obj
            .get("test_case_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| ApiError::bad_request(MSG_IDS_INTEGER))?;
        let details = match obj.get("details") {
            Some(Value::String(details)) => details.clone(),
            None | Some(Value::Null) => DEFAULT_EXECUTION_DETAILS.to_owned(),
            Some(_) => return Err(ApiError::bad_request(MSG_DETAILS_STRING)),
        };

        Ok(Self {
            test_case_id,
            asset_id,
            status,
            details,
        })
    }
}
