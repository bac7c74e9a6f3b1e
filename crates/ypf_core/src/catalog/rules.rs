//! Position rule records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::AttributeId;

/// Candidate playing position, in catalog declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionId {
    RightWinger,
    LeftWinger,
    Striker,
    CenterMidfielder,
    DefensiveMidfielder,
    CenterBack,
    Fullback,
    Goalkeeper,
}

impl PositionId {
    pub const ALL: [PositionId; 8] = [
        PositionId::RightWinger,
        PositionId::LeftWinger,
        PositionId::Striker,
        PositionId::CenterMidfielder,
        PositionId::DefensiveMidfielder,
        PositionId::CenterBack,
        PositionId::Fullback,
        PositionId::Goalkeeper,
    ];

    /// Display name used on result cards and in exports.
    pub fn name(&self) -> &'static str {
        match self {
            PositionId::RightWinger => "Right Winger (RW)",
            PositionId::LeftWinger => "Left Winger (LW)",
            PositionId::Striker => "Striker (ST)",
            PositionId::CenterMidfielder => "Center Midfielder (CM)",
            PositionId::DefensiveMidfielder => "Defensive Midfielder (DM)",
            PositionId::CenterBack => "Center Back (CB)",
            PositionId::Fullback => "Fullback (LB/RB)",
            PositionId::Goalkeeper => "Goalkeeper (GK)",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PositionId::RightWinger => "RW",
            PositionId::LeftWinger => "LW",
            PositionId::Striker => "ST",
            PositionId::CenterMidfielder => "CM",
            PositionId::DefensiveMidfielder => "DM",
            PositionId::CenterBack => "CB",
            PositionId::Fullback => "LB/RB",
            PositionId::Goalkeeper => "GK",
        }
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One two-week block of the eight-week training programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// Week range label, e.g. `"1-2"`.
    pub weeks: String,
    pub focus: String,
    pub drills: Vec<String>,
}

/// Static rule entry for one position.
///
/// `primary`, `secondary` and `weights` keep their authoring order; the
/// weighted score accumulates in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRule {
    pub id: PositionId,
    /// Minimum ratings that gate eligibility.
    #[serde(with = "ordered_map")]
    pub primary: Vec<(AttributeId, u8)>,
    /// Minimum ratings that only refine confidence. May be empty.
    #[serde(default, with = "ordered_map")]
    pub secondary: Vec<(AttributeId, u8)>,
    /// Non-negative scoring weights, normalized at use.
    #[serde(with = "ordered_map")]
    pub weights: Vec<(AttributeId, f64)>,
    pub description: String,
    #[serde(default)]
    pub key_attributes: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub training_program: Vec<TrainingPhase>,
    #[serde(default)]
    pub development_path: String,
}

impl PositionRule {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    /// Every attribute referenced by any of the three tables.
    pub fn referenced_attributes(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.primary
            .iter()
            .map(|(a, _)| *a)
            .chain(self.secondary.iter().map(|(a, _)| *a))
            .chain(self.weights.iter().map(|(a, _)| *a))
    }
}

/// (De)serializes a `Vec<(K, V)>` as a map, keeping entry order.
mod ordered_map {
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, K, V>(pairs: &Vec<(K, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        K: Serialize,
        V: Serialize,
    {
        serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D, K, V>(deserializer: D) -> Result<Vec<(K, V)>, D::Error>
    where
        D: Deserializer<'de>,
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }

    struct PairsVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of attribute ids to values")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }
}
