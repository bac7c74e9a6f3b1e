use thiserror::Error;

use crate::attributes::AttributeId;
use crate::catalog::PositionId;

/// Catalog authoring defects, detected when a catalog is loaded.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unsupported catalog schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Catalog contains no positions")]
    EmptyCatalog,

    #[error("Position {0:?} is defined more than once")]
    DuplicatePosition(PositionId),

    #[error("Position {0:?} has an empty primary gate")]
    EmptyPrimary(PositionId),

    #[error("Position {0:?} has no weights (total weight must be > 0)")]
    EmptyWeights(PositionId),

    #[error("Position {position:?} has invalid weight {weight} for {attribute}")]
    InvalidWeight { position: PositionId, attribute: AttributeId, weight: f64 },

    #[error("Position {position:?} lists {attribute} twice in its {table} table")]
    DuplicateAttribute { position: PositionId, attribute: AttributeId, table: &'static str },
}

/// Errors raised while accepting analysis input.
///
/// The engine computations themselves never fail; these come from the
/// input boundary (JSON, CLI) and from catalog loading.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing attribute rating: {0}")]
    MissingAttribute(AttributeId),

    #[error("Unknown attribute id: {0}")]
    UnknownAttribute(String),

    #[error("Invalid rating for {attribute}: {value}. Must be between 1 and 5")]
    RatingOutOfRange { attribute: AttributeId, value: i64 },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid age: {0}. Must be between 6 and 18")]
    InvalidAge(u8),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AnalysisError {
    /// Stable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::MissingAttribute(_) => "MISSING_ATTRIBUTE",
            AnalysisError::UnknownAttribute(_) => "UNKNOWN_ATTRIBUTE",
            AnalysisError::RatingOutOfRange { .. } => "RATING_OUT_OF_RANGE",
            AnalysisError::InvalidName(_) => "INVALID_NAME",
            AnalysisError::InvalidAge(_) => "INVALID_AGE",
            AnalysisError::UnsupportedSchema { .. } => "UNSUPPORTED_SCHEMA",
            AnalysisError::Json(_) => "INVALID_JSON",
            AnalysisError::Catalog(_) => "CATALOG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
