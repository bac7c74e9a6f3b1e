//! JSON API for position analysis
//!
//! Single-player and batch analysis requests, plus a read-only view of the
//! position catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

use super::{ApiError, ApiResponse};
use crate::attributes::AttributeVector;
use crate::catalog::PositionCatalog;
use crate::engine::{generate_report, AnalysisReport};
use crate::error::AnalysisError;
use crate::export::render_text_report;
use crate::player::PlayerIdentity;
use crate::SCHEMA_VERSION;

/// Maximum number of players in one batch request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Single-player analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub schema_version: Option<u8>,
    pub player: PlayerIdentity,
    /// Raw `q1..q15` ratings; checked by [`AnalysisRequest::validate`].
    pub attributes: BTreeMap<String, i64>,
}

/// Single-player analysis response
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse<'c> {
    pub player: PlayerIdentity,
    pub report: AnalysisReport<'c>,
    pub text_report: String,
}

/// Batch analysis request
///
/// Entries stay raw JSON until they are analyzed, so a malformed player is
/// reported in `failed_requests` instead of rejecting the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalysisRequest {
    pub schema_version: Option<u8>,
    pub players: Vec<Value>,
}

/// Batch analysis response
#[derive(Debug, Clone, Serialize)]
pub struct BatchAnalysisResponse<'c> {
    pub results: Vec<AnalysisResponse<'c>>,
    pub failed_requests: Vec<BatchFailure>,
    pub total_requested: usize,
    pub total_analyzed: usize,
    pub total_failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub player_name: Option<String>,
    pub error: ApiError,
}

impl AnalysisRequest {
    pub fn new(player: PlayerIdentity, vector: &AttributeVector) -> Self {
        Self {
            schema_version: Some(SCHEMA_VERSION),
            player,
            attributes: vector
                .iter()
                .map(|(id, value)| (id.key().to_string(), i64::from(value)))
                .collect(),
        }
    }

    /// Check schema, identity and ratings; returns the attribute vector.
    pub fn validate(&self) -> Result<AttributeVector, AnalysisError> {
        check_schema(self.schema_version)?;
        self.player.validate()?;
        AttributeVector::from_raw_ratings(&self.attributes)
    }
}

impl BatchAnalysisRequest {
    pub fn new(players: Vec<Value>) -> Self {
        Self { schema_version: Some(SCHEMA_VERSION), players }
    }
}

fn check_schema(version: Option<u8>) -> Result<(), AnalysisError> {
    match version {
        Some(found) if found != SCHEMA_VERSION => {
            Err(AnalysisError::UnsupportedSchema { found, expected: SCHEMA_VERSION })
        }
        _ => Ok(()),
    }
}

fn analyze_request<'c>(
    request: &AnalysisRequest,
    catalog: &'c PositionCatalog,
) -> Result<AnalysisResponse<'c>, AnalysisError> {
    let vector = request.validate()?;
    let report = generate_report(&vector, catalog);
    let text_report = render_text_report(&request.player, &report);
    Ok(AnalysisResponse { player: request.player.clone(), report, text_report })
}

fn analyze_entry<'c>(
    entry: &Value,
    catalog: &'c PositionCatalog,
) -> Result<AnalysisResponse<'c>, AnalysisError> {
    let request = AnalysisRequest::deserialize(entry)?;
    analyze_request(&request, catalog)
}

/// Analyze one player against the active catalog.
///
/// The active catalog is the one named by `YPF_CATALOG_PATH`, or the
/// embedded catalog when unset.
pub fn analyze_player_json(request_json: &str) -> String {
    match PositionCatalog::active() {
        Ok(catalog) => analyze_player_json_with_catalog(request_json, catalog),
        Err(e) => {
            error!("Failed to load position catalog: {}", e);
            let error = ApiError::from(AnalysisError::from(e));
            ApiResponse::<AnalysisResponse<'_>>::error(error).to_json()
        }
    }
}

pub fn analyze_player_json_with_catalog(request_json: &str, catalog: &PositionCatalog) -> String {
    info!("Processing position analysis request");

    let request: AnalysisRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse AnalysisRequest: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return ApiResponse::<AnalysisResponse<'_>>::error(error).to_json();
        }
    };

    match analyze_request(&request, catalog) {
        Ok(response_data) => {
            info!(
                "Analyzed player: {} (primary: {})",
                response_data.player.name,
                response_data.report.primary.map_or("none", |p| p.name())
            );
            ApiResponse::success(response_data).to_json()
        }
        Err(e) => {
            warn!("Analysis request validation failed: {}", e);
            ApiResponse::<AnalysisResponse<'_>>::error(ApiError::from(&e)).to_json()
        }
    }
}

/// Analyze every player of a batch, each entry on its own.
///
/// Only request-level problems (schema, size) fail the call; a player that
/// cannot be parsed or validated lands in `failed_requests` with its index.
pub fn analyze_batch<'c>(
    request: &BatchAnalysisRequest,
    catalog: &'c PositionCatalog,
) -> Result<BatchAnalysisResponse<'c>, ApiError> {
    if let Err(e) = check_schema(request.schema_version) {
        warn!("Batch request rejected: {}", e);
        return Err(ApiError::from(&e));
    }

    if request.players.len() > MAX_BATCH_SIZE {
        return Err(ApiError::new(
            "BATCH_SIZE_EXCEEDED",
            &format!("Maximum batch size is {} players", MAX_BATCH_SIZE),
        ));
    }

    if request.players.is_empty() {
        return Err(ApiError::new("EMPTY_BATCH", "Batch request cannot be empty"));
    }

    let mut results = Vec::new();
    let mut failed_requests = Vec::new();

    for (index, entry) in request.players.iter().enumerate() {
        match analyze_entry(entry, catalog) {
            Ok(result) => {
                debug!("Analyzed player in batch: {} (index: {})", result.player.name, index);
                results.push(result);
            }
            Err(e) => {
                warn!("Failed to analyze player at index {}: {}", index, e);
                failed_requests.push(BatchFailure {
                    index,
                    player_name: entry
                        .pointer("/player/name")
                        .and_then(Value::as_str)
                        .map(String::from),
                    error: ApiError::from(&e),
                });
            }
        }
    }

    let response = BatchAnalysisResponse {
        total_requested: request.players.len(),
        total_analyzed: results.len(),
        total_failed: failed_requests.len(),
        results,
        failed_requests,
    };

    info!(
        "Batch analysis completed: {}/{} players analyzed",
        response.total_analyzed, response.total_requested
    );

    Ok(response)
}

/// Analyze a batch of players against the active catalog.
pub fn analyze_batch_json(request_json: &str) -> String {
    match PositionCatalog::active() {
        Ok(catalog) => analyze_batch_json_with_catalog(request_json, catalog),
        Err(e) => {
            error!("Failed to load position catalog: {}", e);
            let error = ApiError::from(AnalysisError::from(e));
            ApiResponse::<BatchAnalysisResponse<'_>>::error(error).to_json()
        }
    }
}

pub fn analyze_batch_json_with_catalog(request_json: &str, catalog: &PositionCatalog) -> String {
    info!("Processing batch analysis request");

    let request: BatchAnalysisRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse BatchAnalysisRequest: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return ApiResponse::<BatchAnalysisResponse<'_>>::error(error).to_json();
        }
    };

    match analyze_batch(&request, catalog) {
        Ok(response_data) => ApiResponse::success(response_data).to_json(),
        Err(error) => ApiResponse::<BatchAnalysisResponse<'_>>::error(error).to_json(),
    }
}

/// The active position catalog as JSON.
pub fn get_position_catalog_json() -> String {
    match PositionCatalog::active() {
        Ok(catalog) => ApiResponse::success(catalog).to_json(),
        Err(e) => {
            error!("Failed to load position catalog: {}", e);
            ApiResponse::<&PositionCatalog>::error(ApiError::from(AnalysisError::from(e)))
                .to_json()
        }
    }
}
