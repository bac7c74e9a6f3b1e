//! Position rule catalog
//!
//! The default catalog is compiled into the binary from `data/positions.yaml`
//! and parsed once on first use. An alternative catalog can be loaded from a
//! YAML file, either explicitly or through `YPF_CATALOG_PATH`.
//!
//! Every catalog is validated on load; a catalog that would make scoring or
//! confidence undefined (no weights, no primary gate) is rejected there rather
//! than at analysis time.

mod rules;

pub use rules::{PositionId, PositionRule, TrainingPhase};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::attributes::AttributeId;
use crate::error::CatalogError;

/// Env var naming a YAML catalog that replaces the embedded one.
pub const CATALOG_PATH_ENV: &str = "YPF_CATALOG_PATH";

/// Catalog file format version understood by this build.
pub const CATALOG_SCHEMA_VERSION: u8 = 1;

/// Embedded position catalog (compile-time).
pub const POSITIONS_YAML: &str = include_str!("../../data/positions.yaml");

static EMBEDDED_CATALOG: OnceLock<PositionCatalog> = OnceLock::new();
static ACTIVE_CATALOG: OnceCell<PositionCatalog> = OnceCell::new();

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_schema_version")]
    schema_version: u8,
    positions: Vec<PositionRule>,
}

fn default_schema_version() -> u8 {
    CATALOG_SCHEMA_VERSION
}

/// Immutable, ordered set of position rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCatalog {
    positions: Vec<PositionRule>,
}

impl PositionCatalog {
    /// Build a catalog from rules, validating them.
    pub fn new(positions: Vec<PositionRule>) -> Result<Self, CatalogError> {
        let catalog = Self { positions };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        debug!(schema_version = file.schema_version, "parsed position catalog");
        if file.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::UnsupportedSchema {
                found: file.schema_version,
                expected: CATALOG_SCHEMA_VERSION,
            });
        }
        Self::new(file.positions)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), positions = catalog.len(), "loaded position catalog");
        Ok(catalog)
    }

    /// Parse the embedded catalog without caching.
    pub fn try_embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(POSITIONS_YAML)
    }

    /// Embedded catalog, parsed on first call and cached.
    ///
    /// # Panics
    ///
    /// Panics if the embedded YAML is invalid. The data is compiled in and
    /// covered by tests, so a normal build never hits this.
    pub fn embedded() -> &'static PositionCatalog {
        EMBEDDED_CATALOG
            .get_or_init(|| Self::try_embedded().expect("Failed to load embedded positions.yaml"))
    }

    /// Catalog selected by `YPF_CATALOG_PATH`, or `None` when unset/blank.
    pub fn from_env() -> Result<Option<Self>, CatalogError> {
        Self::from_override(env::var(CATALOG_PATH_ENV).ok().as_deref())
    }

    fn from_override(value: Option<&str>) -> Result<Option<Self>, CatalogError> {
        match value.map(str::trim) {
            Some(path) if !path.is_empty() => Self::from_path(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Catalog used by the JSON API and CLI.
    ///
    /// Resolution order:
    /// 1) `YPF_CATALOG_PATH` if set
    /// 2) the embedded catalog
    ///
    /// The result is cached for the life of the process; a failed load is not
    /// cached and is retried on the next call.
    pub fn active() -> Result<&'static PositionCatalog, CatalogError> {
        ACTIVE_CATALOG.get_or_try_init(|| match Self::from_env()? {
            Some(catalog) => Ok(catalog),
            None => Ok(Self::embedded().clone()),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionRule> {
        self.positions.iter()
    }

    pub fn get(&self, id: PositionId) -> Option<&PositionRule> {
        self.positions.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.positions.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for rule in &self.positions {
            if !seen.insert(rule.id) {
                return Err(CatalogError::DuplicatePosition(rule.id));
            }
            if rule.primary.is_empty() {
                return Err(CatalogError::EmptyPrimary(rule.id));
            }
            if rule.weights.is_empty() {
                return Err(CatalogError::EmptyWeights(rule.id));
            }

            check_unique(rule.id, "primary", rule.primary.iter().map(|(a, _)| *a))?;
            check_unique(rule.id, "secondary", rule.secondary.iter().map(|(a, _)| *a))?;
            check_unique(rule.id, "weights", rule.weights.iter().map(|(a, _)| *a))?;

            for &(attribute, weight) in &rule.weights {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(CatalogError::InvalidWeight { position: rule.id, attribute, weight });
                }
            }
            if rule.total_weight() <= 0.0 {
                return Err(CatalogError::EmptyWeights(rule.id));
            }
        }
        Ok(())
    }
}

fn check_unique(
    position: PositionId,
    table: &'static str,
    attributes: impl Iterator<Item = AttributeId>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute) {
            return Err(CatalogError::DuplicateAttribute { position, attribute, table });
        }
    }
    Ok(())
}
