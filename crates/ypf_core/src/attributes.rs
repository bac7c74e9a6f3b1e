//! The 15 rated skill attributes and the attribute vector fed to the engine.
//!
//! Ratings use a 1..=5 scale (1 = weak, 5 = excellent). The vector always
//! carries all 15 ratings; range checking is opt-in through
//! [`AttributeVector::validate`], the engine itself computes on whatever it
//! is given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use crate::error::AnalysisError;

pub const ATTRIBUTE_COUNT: usize = 15;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MIDPOINT_RATING: u8 = 3;

/// Attribute identifier, `q1`..`q15` in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
    Q14,
    Q15,
}

impl AttributeId {
    pub const ALL: [AttributeId; ATTRIBUTE_COUNT] = [
        AttributeId::Q1,
        AttributeId::Q2,
        AttributeId::Q3,
        AttributeId::Q4,
        AttributeId::Q5,
        AttributeId::Q6,
        AttributeId::Q7,
        AttributeId::Q8,
        AttributeId::Q9,
        AttributeId::Q10,
        AttributeId::Q11,
        AttributeId::Q12,
        AttributeId::Q13,
        AttributeId::Q14,
        AttributeId::Q15,
    ];

    /// Zero-based slot in an [`AttributeVector`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire id (`"q1"`..`"q15"`).
    pub fn key(self) -> &'static str {
        match self {
            AttributeId::Q1 => "q1",
            AttributeId::Q2 => "q2",
            AttributeId::Q3 => "q3",
            AttributeId::Q4 => "q4",
            AttributeId::Q5 => "q5",
            AttributeId::Q6 => "q6",
            AttributeId::Q7 => "q7",
            AttributeId::Q8 => "q8",
            AttributeId::Q9 => "q9",
            AttributeId::Q10 => "q10",
            AttributeId::Q11 => "q11",
            AttributeId::Q12 => "q12",
            AttributeId::Q13 => "q13",
            AttributeId::Q14 => "q14",
            AttributeId::Q15 => "q15",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// Report label (Indonesian), as shown in strengths/weaknesses and exports.
    pub fn label(self) -> &'static str {
        match self {
            AttributeId::Q1 => "Kecepatan",
            AttributeId::Q2 => "Dribbling",
            AttributeId::Q3 => "Shooting",
            AttributeId::Q4 => "Kontrol Bola",
            AttributeId::Q5 => "Kelincahan",
            AttributeId::Q6 => "Passing",
            AttributeId::Q7 => "Vision",
            AttributeId::Q8 => "Kekuatan Bertahan",
            AttributeId::Q9 => "Duel Fisik",
            AttributeId::Q10 => "Stamina",
            AttributeId::Q11 => "Refleks",
            AttributeId::Q12 => "Kontrol Emosi",
            AttributeId::Q13 => "Kerja Sama Tim",
            AttributeId::Q14 => "Kekuatan Tendangan",
            AttributeId::Q15 => "Antisipasi Bola",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            AttributeId::Q1 => "Speed",
            AttributeId::Q2 => "Dribbling",
            AttributeId::Q3 => "Shooting",
            AttributeId::Q4 => "Ball Control",
            AttributeId::Q5 => "Agility",
            AttributeId::Q6 => "Passing",
            AttributeId::Q7 => "Vision",
            AttributeId::Q8 => "Defensive Strength",
            AttributeId::Q9 => "Physical Duels",
            AttributeId::Q10 => "Stamina",
            AttributeId::Q11 => "Reflexes",
            AttributeId::Q12 => "Emotional Control",
            AttributeId::Q13 => "Teamwork",
            AttributeId::Q14 => "Shot Power",
            AttributeId::Q15 => "Ball Anticipation",
        }
    }

    /// Input-form hint text.
    pub fn description(self) -> &'static str {
        match self {
            AttributeId::Q1 => "Sprint speed dan akselerasi",
            AttributeId::Q2 => "Kontrol bola saat bergerak",
            AttributeId::Q3 => "Akurasi dan kekuatan tembakan",
            AttributeId::Q4 => "First touch dan ball control",
            AttributeId::Q5 => "Agility dan perubahan arah",
            AttributeId::Q6 => "Akurasi dan range passing",
            AttributeId::Q7 => "Pemahaman permainan dan awareness",
            AttributeId::Q8 => "Defensive positioning dan tackling",
            AttributeId::Q9 => "Kekuatan dalam duels",
            AttributeId::Q10 => "Endurance dan fitness",
            AttributeId::Q11 => "Reaction time dan quick response",
            AttributeId::Q12 => "Composure dan mental strength",
            AttributeId::Q13 => "Teamwork dan communication",
            AttributeId::Q14 => "Shot power",
            AttributeId::Q15 => "Reading the game dan interception",
        }
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One rating per attribute.
///
/// Serialized as a `{"q1": 4, ..., "q15": 3}` map. Deserialization requires
/// every key and rejects unknown ones; it does not range-check the ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>", into = "BTreeMap<AttributeId, u8>")]
pub struct AttributeVector {
    ratings: [u8; ATTRIBUTE_COUNT],
}

impl AttributeVector {
    pub fn new(ratings: [u8; ATTRIBUTE_COUNT]) -> Self {
        Self { ratings }
    }

    /// Every attribute at the same rating.
    pub fn uniform(rating: u8) -> Self {
        Self { ratings: [rating; ATTRIBUTE_COUNT] }
    }

    /// Starting point of the input form: every attribute at 3.
    pub fn midpoint() -> Self {
        Self::uniform(MIDPOINT_RATING)
    }

    pub fn get(&self, id: AttributeId) -> u8 {
        self.ratings[id.index()]
    }

    pub fn set(&mut self, id: AttributeId, rating: u8) {
        self.ratings[id.index()] = rating;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, id: AttributeId, rating: u8) -> Self {
        self.set(id, rating);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, u8)> + '_ {
        AttributeId::ALL.iter().map(move |id| (*id, self.get(*id)))
    }

    /// Build a vector from raw `q1..q15` ratings as they arrive over the wire.
    ///
    /// Unknown keys are reported first, then missing ones, then the first
    /// rating outside 1..=5 (with its original value, however large).
    pub fn from_raw_ratings(raw: &BTreeMap<String, i64>) -> Result<Self, AnalysisError> {
        let raw = ratings_by_key(raw)?;
        let mut ratings = [0u8; ATTRIBUTE_COUNT];
        for id in AttributeId::ALL {
            let value = raw[id.index()];
            ratings[id.index()] = u8::try_from(value)
                .ok()
                .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
                .ok_or(AnalysisError::RatingOutOfRange { attribute: id, value })?;
        }
        Ok(Self { ratings })
    }

    /// Check every rating is within 1..=5. Reports the first offender.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self.iter().find(|(_, value)| !(MIN_RATING..=MAX_RATING).contains(value)) {
            Some((attribute, value)) => {
                Err(AnalysisError::RatingOutOfRange { attribute, value: i64::from(value) })
            }
            None => Ok(()),
        }
    }
}

impl Default for AttributeVector {
    fn default() -> Self {
        Self::midpoint()
    }
}

impl Index<AttributeId> for AttributeVector {
    type Output = u8;

    fn index(&self, id: AttributeId) -> &u8 {
        &self.ratings[id.index()]
    }
}

impl TryFrom<BTreeMap<String, u8>> for AttributeVector {
    type Error = AnalysisError;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        Ok(Self { ratings: ratings_by_key(&map)? })
    }
}

/// Order a `q1..q15` keyed map into slot order, rejecting unknown and missing keys.
fn ratings_by_key<T: Copy + Default>(
    map: &BTreeMap<String, T>,
) -> Result<[T; ATTRIBUTE_COUNT], AnalysisError> {
    if let Some(unknown) = map.keys().find(|key| AttributeId::from_key(key).is_none()) {
        return Err(AnalysisError::UnknownAttribute(unknown.clone()));
    }

    let mut ratings = [T::default(); ATTRIBUTE_COUNT];
    for id in AttributeId::ALL {
        ratings[id.index()] = *map.get(id.key()).ok_or(AnalysisError::MissingAttribute(id))?;
    }
    Ok(ratings)
}

impl From<AttributeVector> for BTreeMap<AttributeId, u8> {
    fn from(vector: AttributeVector) -> Self {
        vector.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_keys() {
        for (i, id) in AttributeId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(AttributeId::from_index(i), Some(*id));
            assert_eq!(AttributeId::from_key(id.key()), Some(*id));
            assert_eq!(id.key(), format!("q{}", i + 1));
        }
        assert_eq!(AttributeId::from_key("q16"), None);
        assert_eq!(AttributeId::from_index(ATTRIBUTE_COUNT), None);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = AttributeId::ALL.iter().map(|id| id.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), ATTRIBUTE_COUNT);
    }

    #[test]
    fn test_midpoint_is_default() {
        let vector = AttributeVector::default();
        assert!(vector.iter().all(|(_, v)| v == 3));
        assert_eq!(vector, AttributeVector::midpoint());
    }

    #[test]
    fn test_with_and_index() {
        let vector = AttributeVector::uniform(1).with(AttributeId::Q7, 5);
        assert_eq!(vector[AttributeId::Q7], 5);
        assert_eq!(vector.get(AttributeId::Q6), 1);
    }

    #[test]
    fn test_validate_reports_out_of_range() {
        assert!(AttributeVector::uniform(5).validate().is_ok());

        let err = AttributeVector::uniform(3).with(AttributeId::Q4, 0).validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::RatingOutOfRange { attribute: AttributeId::Q4, value: 0 }
        ));

        let err = AttributeVector::uniform(3).with(AttributeId::Q15, 6).validate().unwrap_err();
        assert!(matches!(err, AnalysisError::RatingOutOfRange { value: 6, .. }));
    }

    #[test]
    fn test_from_raw_ratings_keeps_wide_values() {
        let mut raw: BTreeMap<String, i64> =
            AttributeId::ALL.iter().map(|id| (id.key().to_string(), 4)).collect();
        assert_eq!(AttributeVector::from_raw_ratings(&raw).unwrap(), AttributeVector::uniform(4));

        raw.insert("q1".to_string(), 300);
        let err = AttributeVector::from_raw_ratings(&raw).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::RatingOutOfRange { attribute: AttributeId::Q1, value: 300 }
        ));

        raw.insert("q1".to_string(), -1);
        let err = AttributeVector::from_raw_ratings(&raw).unwrap_err();
        assert!(matches!(err, AnalysisError::RatingOutOfRange { value: -1, .. }));

        raw.remove("q12");
        let err = AttributeVector::from_raw_ratings(&raw).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingAttribute(AttributeId::Q12)));
    }

    #[test]
    fn test_json_map_round_trip() {
        let vector = AttributeVector::new([5, 4, 3, 2, 1, 5, 4, 3, 2, 1, 5, 4, 3, 2, 1]);
        let json = serde_json::to_string(&vector).unwrap();
        assert!(json.starts_with("{\"q1\":5,\"q2\":4"));
        assert!(json.contains("\"q15\":1"));

        let parsed: AttributeVector = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vector);
    }

    #[test]
    fn test_json_rejects_missing_and_unknown_keys() {
        let mut map: BTreeMap<String, u8> =
            AttributeId::ALL.iter().map(|id| (id.key().to_string(), 3)).collect();
        map.remove("q9");
        let err = AttributeVector::try_from(map.clone()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingAttribute(AttributeId::Q9)));

        map.insert("q9".to_string(), 3);
        map.insert("speed".to_string(), 3);
        let err = AttributeVector::try_from(map).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownAttribute(ref key) if key == "speed"));

        let json = r#"{"q1": 3}"#;
        assert!(serde_json::from_str::<AttributeVector>(json).is_err());
    }
}
