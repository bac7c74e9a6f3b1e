//! Gate-then-score evaluation of every catalog position and ranking of the
//! eligible ones.

use serde::Serialize;
use tracing::debug;

use super::scoring::{confidence, meets_primary_gate, weighted_score, RecommendationTier};
use crate::attributes::AttributeVector;
use crate::catalog::{PositionCatalog, PositionId, PositionRule};

/// Number of runner-up matches reported next to the primary one.
pub const MAX_ALTERNATIVES: usize = 2;

/// An eligible position for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionMatch<'c> {
    pub position: PositionId,
    /// Weighted score on 0..=100, rounded to one decimal place.
    pub score: f64,
    /// Confidence percentage, 0..=100.
    pub confidence: u8,
    pub recommendation: RecommendationTier,
    #[serde(rename = "rules")]
    pub rule: &'c PositionRule,
}

impl PositionMatch<'_> {
    pub fn name(&self) -> &'static str {
        self.position.name()
    }
}

/// Ranked result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis<'c> {
    pub primary: Option<PositionMatch<'c>>,
    pub alternatives: Vec<PositionMatch<'c>>,
    pub all_results: Vec<PositionMatch<'c>>,
}

/// Evaluate one position. `None` when its primary gate fails.
pub fn evaluate<'c>(vector: &AttributeVector, rule: &'c PositionRule) -> Option<PositionMatch<'c>> {
    if !meets_primary_gate(vector, rule) {
        debug!(position = ?rule.id, "primary gate not met");
        return None;
    }

    let score = round_to_tenth(weighted_score(vector, rule));
    let confidence = confidence(vector, rule);
    debug!(position = ?rule.id, score, confidence, "primary gate met");

    Some(PositionMatch {
        position: rule.id,
        score,
        confidence,
        recommendation: RecommendationTier::from_confidence(confidence),
        rule,
    })
}

/// Gate every position, score the survivors, rank by score descending.
///
/// Equal scores keep catalog declaration order (stable sort).
pub fn analyze<'c>(vector: &AttributeVector, catalog: &'c PositionCatalog) -> Analysis<'c> {
    let mut all_results: Vec<_> = catalog.iter().filter_map(|rule| evaluate(vector, rule)).collect();
    all_results.sort_by(|a, b| b.score.total_cmp(&a.score));

    let primary = all_results.first().copied();
    let alternatives = all_results.iter().skip(1).take(MAX_ALTERNATIVES).copied().collect();

    Analysis { primary, alternatives, all_results }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
