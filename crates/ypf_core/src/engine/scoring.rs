//! Per-position scoring: weighted score, primary gate, confidence, tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::{AttributeId, AttributeVector};
use crate::catalog::PositionRule;

/// Maps the 1..=5 rating scale onto 0..=100.
pub const SCORE_SCALE: f64 = 20.0;

/// Share of confidence carried by the primary gate.
pub const PRIMARY_SHARE: f64 = 0.7;
/// Share of confidence carried by the secondary set.
pub const SECONDARY_SHARE: f64 = 0.3;

pub const HIGHLY_RECOMMENDED_MIN: u8 = 80;
pub const RECOMMENDED_MIN: u8 = 60;

/// Weighted mean of the rule's weighted attributes, scaled to 0..=100.
///
/// Weights are normalized by their sum. A rule with zero total weight scores
/// 0; catalogs reject such rules at load time, so this only applies to rules
/// built by hand.
pub fn weighted_score(vector: &AttributeVector, rule: &PositionRule) -> f64 {
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for &(attribute, weight) in &rule.weights {
        total_score += weight * f64::from(vector[attribute]);
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }
    (total_score / total_weight) * SCORE_SCALE
}

/// True iff every primary minimum is met.
pub fn meets_primary_gate(vector: &AttributeVector, rule: &PositionRule) -> bool {
    rule.primary.iter().all(|&(attribute, min)| vector[attribute] >= min)
}

/// Percentage blend of primary (70%) and secondary (30%) threshold
/// satisfaction. An empty threshold set counts as fully satisfied.
pub fn confidence(vector: &AttributeVector, rule: &PositionRule) -> u8 {
    let primary_met = satisfied_fraction(vector, &rule.primary);
    let secondary_met = satisfied_fraction(vector, &rule.secondary);

    let blended = primary_met * PRIMARY_SHARE + secondary_met * SECONDARY_SHARE;
    (blended * 100.0).round() as u8
}

fn satisfied_fraction(vector: &AttributeVector, thresholds: &[(AttributeId, u8)]) -> f64 {
    if thresholds.is_empty() {
        return 1.0;
    }
    let met = thresholds.iter().filter(|&&(attribute, min)| vector[attribute] >= min).count();
    met as f64 / thresholds.len() as f64
}

/// Recommendation label derived from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationTier {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Consider Alternative")]
    ConsiderAlternative,
}

impl RecommendationTier {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= HIGHLY_RECOMMENDED_MIN {
            RecommendationTier::HighlyRecommended
        } else if confidence >= RECOMMENDED_MIN {
            RecommendationTier::Recommended
        } else {
            RecommendationTier::ConsiderAlternative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::HighlyRecommended => "Highly Recommended",
            RecommendationTier::Recommended => "Recommended",
            RecommendationTier::ConsiderAlternative => "Consider Alternative",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
