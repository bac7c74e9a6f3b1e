use serde::Serialize;

use super::profile::{
    generate_player_profile, identify_strengths, identify_weaknesses, suggest_development_areas,
    AttributeRating, PlayerProfile,
};
use super::ranking::{analyze, PositionMatch};
use crate::attributes::AttributeVector;
use crate::catalog::{PositionCatalog, TrainingPhase};

/// Full result of one analysis. A pure function of the input vector and the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport<'c> {
    pub primary: Option<PositionMatch<'c>>,
    pub alternatives: Vec<PositionMatch<'c>>,
    pub all_results: Vec<PositionMatch<'c>>,
    pub player_profile: PlayerProfile,
    pub strengths: Vec<AttributeRating>,
    pub weaknesses: Vec<AttributeRating>,
    pub development_areas: Vec<&'static str>,
}

impl<'c> AnalysisReport<'c> {
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Eight-week programme of the primary position, empty without one.
    pub fn training_program(&self) -> &'c [TrainingPhase] {
        match self.primary {
            Some(primary) => primary.rule.training_program.as_slice(),
            None => &[],
        }
    }
}

pub fn generate_report<'c>(vector: &AttributeVector, catalog: &'c PositionCatalog) -> AnalysisReport<'c> {
    let analysis = analyze(vector, catalog);
    let player_profile = generate_player_profile(vector);

    AnalysisReport {
        primary: analysis.primary,
        alternatives: analysis.alternatives,
        all_results: analysis.all_results,
        player_profile,
        strengths: identify_strengths(vector),
        weaknesses: identify_weaknesses(vector),
        development_areas: suggest_development_areas(&player_profile),
    }
}
