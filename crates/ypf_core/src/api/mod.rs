//! JSON API
//!
//! String-in/string-out entry points for embedding hosts (CLI, FFI, web
//! bridge). Every call returns an [`ApiResponse`] envelope, including on
//! failure.

pub mod analysis_json;

pub use analysis_json::{
    analyze_batch, analyze_batch_json, analyze_batch_json_with_catalog, analyze_player_json,
    analyze_player_json_with_catalog, get_position_catalog_json, AnalysisRequest,
    AnalysisResponse, BatchAnalysisRequest, BatchAnalysisResponse, BatchFailure, MAX_BATCH_SIZE,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AnalysisError;
use crate::SCHEMA_VERSION;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: u8,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl From<&AnalysisError> for ApiError {
    fn from(error: &AnalysisError) -> Self {
        let message = error.to_string();
        match error {
            AnalysisError::RatingOutOfRange { attribute, value } => {
                let details = HashMap::from([
                    ("attribute".to_string(), serde_json::json!(attribute.key())),
                    ("value".to_string(), serde_json::json!(value)),
                ]);
                Self::with_details(error.code(), &message, details)
            }
            AnalysisError::MissingAttribute(attribute) => {
                let details =
                    HashMap::from([("attribute".to_string(), serde_json::json!(attribute.key()))]);
                Self::with_details(error.code(), &message, details)
            }
            _ => Self::new(error.code(), &message),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        Self::from(&error)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize the envelope, falling back to `{}`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
