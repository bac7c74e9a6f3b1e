//! Recommendation engine
//!
//! Single-pass gate-then-score evaluation over the position catalog:
//! 1. primary gate: every primary minimum must hold, otherwise the position
//!    is dropped
//! 2. weighted score (0-100) and confidence (70% primary / 30% secondary)
//! 3. stable sort by score; catalog order breaks ties
//!
//! The profile, strengths, weaknesses and development areas depend only on
//! the attribute vector. No state is kept between calls.

pub mod profile;
pub mod ranking;
pub mod report;
pub mod scoring;

pub use profile::{
    generate_player_profile, identify_strengths, identify_weaknesses, suggest_development_areas,
    AttributeRating, PlayerProfile, ProfileAxis,
};
pub use ranking::{analyze, evaluate, Analysis, PositionMatch, MAX_ALTERNATIVES};
pub use report::{generate_report, AnalysisReport};
pub use scoring::{confidence, meets_primary_gate, weighted_score, RecommendationTier};

use crate::attributes::AttributeVector;
use crate::catalog::PositionCatalog;

/// Engine bound to one catalog.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'c> {
    catalog: &'c PositionCatalog,
}

impl RecommendationEngine<'static> {
    /// Engine over the embedded catalog.
    pub fn embedded() -> Self {
        Self::new(PositionCatalog::embedded())
    }
}

impl Default for RecommendationEngine<'static> {
    fn default() -> Self {
        Self::embedded()
    }
}

impl<'c> RecommendationEngine<'c> {
    pub fn new(catalog: &'c PositionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c PositionCatalog {
        self.catalog
    }

    pub fn analyze(&self, vector: &AttributeVector) -> Analysis<'c> {
        analyze(vector, self.catalog)
    }

    pub fn generate_report(&self, vector: &AttributeVector) -> AnalysisReport<'c> {
        generate_report(vector, self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeId;
    use crate::catalog::{PositionId, PositionRule};

    #[test]
    fn test_engine_uses_its_catalog() {
        let keeper_only = PositionCatalog::new(vec![PositionRule {
            id: PositionId::Goalkeeper,
            primary: vec![(AttributeId::Q11, 1)],
            secondary: vec![],
            weights: vec![(AttributeId::Q11, 2.0)],
            description: "any".to_string(),
            key_attributes: vec![],
            weaknesses: vec![],
            training_program: vec![],
            development_path: String::new(),
        }])
        .unwrap();

        let engine = RecommendationEngine::new(&keeper_only);
        let report = engine.generate_report(&AttributeVector::midpoint());
        let primary = report.primary.unwrap();
        assert_eq!(primary.position, PositionId::Goalkeeper);
        assert_eq!(primary.score, 60.0);
        assert_eq!(primary.confidence, 100);
        assert_eq!(report.all_results.len(), 1);
    }

    #[test]
    fn test_default_engine_matches_free_functions() {
        let engine = RecommendationEngine::default();
        let vector = AttributeVector::uniform(4).with(AttributeId::Q11, 1);
        assert_eq!(engine.analyze(&vector), analyze(&vector, PositionCatalog::embedded()));
        assert_eq!(engine.catalog().len(), 8);
    }
}
