//! # ypf_core - Youth Football Position Recommendation Engine
//!
//! Rule-based recommendation of a playing position for youth players from a
//! coach's 1-5 ratings of fifteen attributes.
//!
//! ## Features
//! - Data-driven position catalog (embedded YAML, overridable by path)
//! - Gate-then-score ranking with confidence and recommendation tiers
//! - Position-independent 5-axis profile, strengths and weaknesses
//! - Plain-text report export and a JSON API for host integration
//!
//! Every analysis is a pure function of the attribute vector and the
//! catalog: same input, same report.

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod attributes;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod export;
pub mod player;

pub use api::{
    analyze_batch, analyze_batch_json, analyze_player_json, analyze_player_json_with_catalog,
    AnalysisRequest, ApiError, ApiResponse,
};
pub use attributes::{AttributeId, AttributeVector};
pub use catalog::{PositionCatalog, PositionId, PositionRule, TrainingPhase};
pub use engine::{
    generate_report, AnalysisReport, PlayerProfile, PositionMatch, RecommendationEngine,
    RecommendationTier,
};
pub use error::{AnalysisError, CatalogError, Result};
pub use export::{render_position_details, render_text_report, report_file_name};
pub use player::{Gender, PlayerIdentity};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the JSON request/response schema.
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod proptests {
    use crate::attributes::{ATTRIBUTE_COUNT, MAX_RATING, MIN_RATING};
    use crate::engine::{
        analyze, confidence, generate_player_profile, identify_strengths, identify_weaknesses,
        meets_primary_gate, suggest_development_areas, weighted_score, MAX_ALTERNATIVES,
    };
    use crate::{generate_report, AttributeVector, PositionCatalog, PositionId};
    use proptest::prelude::*;

    fn any_vector() -> impl Strategy<Value = AttributeVector> {
        prop::array::uniform15(MIN_RATING..=MAX_RATING).prop_map(AttributeVector::new)
    }

    proptest! {
        #[test]
        fn prop_report_is_deterministic(vector in any_vector()) {
            let catalog = PositionCatalog::embedded();
            prop_assert_eq!(generate_report(&vector, catalog), generate_report(&vector, catalog));
        }

        #[test]
        fn prop_results_are_exactly_the_gated_positions(vector in any_vector()) {
            let catalog = PositionCatalog::embedded();
            let analysis = analyze(&vector, catalog);

            let mut eligible: Vec<PositionId> = catalog
                .iter()
                .filter(|rule| meets_primary_gate(&vector, rule))
                .map(|rule| rule.id)
                .collect();
            let mut got: Vec<PositionId> = analysis.all_results.iter().map(|m| m.position).collect();
            eligible.sort();
            got.sort();
            prop_assert_eq!(got, eligible);
        }

        #[test]
        fn prop_scores_and_confidence_in_range(vector in any_vector()) {
            for rule in PositionCatalog::embedded().iter() {
                // 1..=5 ratings map onto 20..=100, up to float error.
                let score = weighted_score(&vector, rule);
                prop_assert!((20.0 - 1e-9..=100.0 + 1e-9).contains(&score));
                prop_assert!(confidence(&vector, rule) <= 100);
            }
        }

        #[test]
        fn prop_ranking_is_sorted_and_split(vector in any_vector()) {
            let analysis = analyze(&vector, PositionCatalog::embedded());

            for pair in analysis.all_results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            prop_assert_eq!(analysis.primary, analysis.all_results.first().copied());
            let expected_alts = analysis.all_results.len().saturating_sub(1).min(MAX_ALTERNATIVES);
            prop_assert_eq!(analysis.alternatives.len(), expected_alts);
            let runners_up: Vec<_> =
                analysis.all_results.iter().skip(1).take(expected_alts).copied().collect();
            prop_assert_eq!(analysis.alternatives, runners_up);
        }

        #[test]
        fn prop_strengths_and_weaknesses_are_disjoint(vector in any_vector()) {
            let strengths = identify_strengths(&vector);
            let weaknesses = identify_weaknesses(&vector);
            let neutral = vector.iter().filter(|(_, v)| *v == 3).count();

            prop_assert_eq!(strengths.len() + weaknesses.len() + neutral, ATTRIBUTE_COUNT);
            prop_assert!(strengths.iter().all(|s| weaknesses.iter().all(|w| w.id != s.id)));
        }

        #[test]
        fn prop_development_areas_match_profile(vector in any_vector()) {
            let profile = generate_player_profile(&vector);
            let areas = suggest_development_areas(&profile);

            let below = profile.axes().iter().filter(|(_, v)| *v < 60).count();
            prop_assert_eq!(areas.len(), below);
            prop_assert_eq!(areas, suggest_development_areas(&profile));
            prop_assert!(profile.axes().iter().all(|(_, v)| (20..=100).contains(v)));
        }
    }
}
