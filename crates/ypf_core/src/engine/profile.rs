//! Position-independent summaries: 5-axis profile, strengths, weaknesses and
//! development areas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::{AttributeId, AttributeVector};
use crate::engine::scoring::SCORE_SCALE;

/// Ratings at or above this are strengths.
pub const STRENGTH_MIN: u8 = 4;
/// Ratings at or below this are weaknesses.
pub const WEAKNESS_MAX: u8 = 2;
/// Axes below this value get a development recommendation.
pub const DEVELOPMENT_THRESHOLD: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileAxis {
    Attacking,
    Defending,
    Physical,
    Technical,
    Mental,
}

impl ProfileAxis {
    /// Radar-chart order.
    pub const ALL: [ProfileAxis; 5] = [
        ProfileAxis::Attacking,
        ProfileAxis::Defending,
        ProfileAxis::Physical,
        ProfileAxis::Technical,
        ProfileAxis::Mental,
    ];

    /// Order in which development areas are reported.
    pub const DEVELOPMENT_PRIORITY: [ProfileAxis; 5] = [
        ProfileAxis::Technical,
        ProfileAxis::Physical,
        ProfileAxis::Mental,
        ProfileAxis::Attacking,
        ProfileAxis::Defending,
    ];

    /// Attributes averaged into this axis.
    pub fn attributes(&self) -> &'static [AttributeId] {
        use AttributeId::*;
        match self {
            ProfileAxis::Attacking => &[Q1, Q2, Q3, Q14],
            ProfileAxis::Defending => &[Q8, Q9, Q15],
            ProfileAxis::Physical => &[Q1, Q5, Q9, Q10],
            ProfileAxis::Technical => &[Q2, Q4, Q6],
            ProfileAxis::Mental => &[Q7, Q12, Q13],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileAxis::Attacking => "Attacking",
            ProfileAxis::Defending => "Defending",
            ProfileAxis::Physical => "Physical",
            ProfileAxis::Technical => "Technical",
            ProfileAxis::Mental => "Mental",
        }
    }

    /// Advice emitted when this axis is below [`DEVELOPMENT_THRESHOLD`].
    pub fn development_advice(&self) -> &'static str {
        match self {
            ProfileAxis::Technical => {
                "Technical Skills - Focus on ball control, dribbling, and passing"
            }
            ProfileAxis::Physical => "Physical Attributes - Improve speed, agility, and stamina",
            ProfileAxis::Mental => "Mental Aspects - Develop vision, emotional control, and teamwork",
            ProfileAxis::Attacking => {
                "Attacking Play - Work on shooting, dribbling, and offensive positioning"
            }
            ProfileAxis::Defending => {
                "Defensive Skills - Enhance tackling, marking, and anticipation"
            }
        }
    }
}

impl fmt::Display for ProfileAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-axis summary, each axis on 0..=100 for in-range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub attacking: u32,
    pub defending: u32,
    pub physical: u32,
    pub technical: u32,
    pub mental: u32,
}

impl PlayerProfile {
    pub fn get(&self, axis: ProfileAxis) -> u32 {
        match axis {
            ProfileAxis::Attacking => self.attacking,
            ProfileAxis::Defending => self.defending,
            ProfileAxis::Physical => self.physical,
            ProfileAxis::Technical => self.technical,
            ProfileAxis::Mental => self.mental,
        }
    }

    /// (axis, value) pairs in radar-chart order.
    pub fn axes(&self) -> [(ProfileAxis, u32); 5] {
        ProfileAxis::ALL.map(|axis| (axis, self.get(axis)))
    }
}

/// A labelled raw rating, as listed under strengths or weaknesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeRating {
    pub id: AttributeId,
    /// Display label.
    pub attribute: &'static str,
    pub value: u8,
}

impl AttributeRating {
    fn new(id: AttributeId, value: u8) -> Self {
        Self { id, attribute: id.label(), value }
    }
}

pub fn generate_player_profile(vector: &AttributeVector) -> PlayerProfile {
    let axis = |axis: ProfileAxis| axis_value(vector, axis.attributes());
    PlayerProfile {
        attacking: axis(ProfileAxis::Attacking),
        defending: axis(ProfileAxis::Defending),
        physical: axis(ProfileAxis::Physical),
        technical: axis(ProfileAxis::Technical),
        mental: axis(ProfileAxis::Mental),
    }
}

fn axis_value(vector: &AttributeVector, attributes: &[AttributeId]) -> u32 {
    let sum: u32 = attributes.iter().map(|id| u32::from(vector[*id])).sum();
    (f64::from(sum) / attributes.len() as f64 * SCORE_SCALE).round() as u32
}

/// Ratings >= 4, highest first (ties in attribute order).
pub fn identify_strengths(vector: &AttributeVector) -> Vec<AttributeRating> {
    let mut strengths: Vec<_> = vector
        .iter()
        .filter(|(_, value)| *value >= STRENGTH_MIN)
        .map(|(id, value)| AttributeRating::new(id, value))
        .collect();
    strengths.sort_by(|a, b| b.value.cmp(&a.value));
    strengths
}

/// Ratings <= 2, lowest first (ties in attribute order).
pub fn identify_weaknesses(vector: &AttributeVector) -> Vec<AttributeRating> {
    let mut weaknesses: Vec<_> = vector
        .iter()
        .filter(|(_, value)| *value <= WEAKNESS_MAX)
        .map(|(id, value)| AttributeRating::new(id, value))
        .collect();
    weaknesses.sort_by(|a, b| a.value.cmp(&b.value));
    weaknesses
}

/// One advice line per axis below 60, in development-priority order.
pub fn suggest_development_areas(profile: &PlayerProfile) -> Vec<&'static str> {
    ProfileAxis::DEVELOPMENT_PRIORITY
        .iter()
        .filter(|axis| profile.get(**axis) < DEVELOPMENT_THRESHOLD)
        .map(|axis| axis.development_advice())
        .collect()
}
