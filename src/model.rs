pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trait name -> score. Whole numbers serialize as JSON integers.
pub type ScoreMap = BTreeMap<String, f64>;

/// Archetype name -> skew weight.
pub type SkewMap = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,

    #[serde(default, with = "score_map")]
    pub scores: ScoreMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skew: SkewMap,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Answer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            scores: ScoreMap::new(),
            skew: SkewMap::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_score(mut self, trait_name: &str, score: f64) -> Self {
        self.scores.insert(trait_name.to_string(), score);
        self
    }

    pub fn with_skew(mut self, archetype: &str, weight: i64) -> Self {
        self.skew.insert(archetype.to_string(), weight);
        self
    }

    /// Score for `trait_name`, or 0 when the answer does not mention it.
    #[inline]
    pub fn score(&self, trait_name: &str) -> f64 {
        self.scores.get(trait_name).copied().unwrap_or(0.0)
    }

    /// True only when the trait is explicitly listed. Balancing means are
    /// taken over these answers alone.
    #[inline]
    pub fn defines(&self, trait_name: &str) -> bool {
        self.scores.contains_key(trait_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub answers: Vec<Answer>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Question {
    pub fn new(prompt: &str, answers: Vec<Answer>) -> Self {
        Self {
            prompt: prompt.to_string(),
            answers,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "score_map")]
    pub fingerprint: ScoreMap,
}

impl Archetype {
    pub fn new(name: &str, description: &str, fingerprint: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            fingerprint: fingerprint
                .iter()
                .map(|(t, v)| (t.to_string(), *v))
                .collect(),
        }
    }

    /// Authored fingerprint value, `None` when the trait is not listed.
    /// Callers map `None` to the neutral point of the fingerprint scale.
    #[inline]
    pub fn fingerprint_value(&self, trait_name: &str) -> Option<f64> {
        self.fingerprint.get(trait_name).copied()
    }
}

/// Display metadata for a trait, keyed by trait name in `traits.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitInfo {
    pub label: Option<String>,
    pub description: String,
}

pub type TraitCatalog = BTreeMap<String, TraitInfo>;

/// Label for a trait, falling back to the trait name itself.
pub fn trait_label<'a>(catalog: &'a TraitCatalog, trait_name: &'a str) -> &'a str {
    catalog
        .get(trait_name)
        .and_then(|info| info.label.as_deref())
        .unwrap_or(trait_name)
}

mod score_map {
    use super::ScoreMap;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(map: &ScoreMap, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (k, v) in map {
            if v.fract() == 0.0 && v.abs() < 1e15 {
                out.serialize_entry(k, &(*v as i64))?;
            } else {
                out.serialize_entry(k, v)?;
            }
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ScoreMap, D::Error> {
        ScoreMap::deserialize(deserializer)
    }
}
