//! Caller-supplied identity metadata.
//!
//! The engine never reads these fields; they travel with a request so the
//! report can be labelled and exported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalysisError;

pub const MIN_AGE: u8 = 6;
pub const MAX_AGE: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Laki-laki",
            Gender::Female => "Perempuan",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    /// Age in years.
    pub age: u8,
    #[serde(default)]
    pub gender: Gender,
    /// When the ratings were taken. Defaults to the time of parsing.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl PlayerIdentity {
    pub fn new(name: impl Into<String>, age: u8, gender: Gender, timestamp: DateTime<Utc>) -> Self {
        Self { name: name.into(), age, gender, timestamp }
    }

    /// Input-form rules: non-blank name, age 6..=18. Name length is not capped.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.name.trim().is_empty() {
            return Err(AnalysisError::InvalidName("Name cannot be empty".to_string()));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(AnalysisError::InvalidAge(self.age));
        }
        Ok(())
    }
}
