use super::range::ScoreRange;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub name: String,
    /// Distance (lower is better) or similarity (higher is better),
    /// depending on the metric that produced the ranking.
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchOutcome {
    /// No archetypes to rank.
    Empty,
    Single {
        primary: String,
        secondaries: Vec<String>,
    },
    /// The top two archetypes scored within the tie ratio of each other.
    Hybrid {
        primary: (String, String),
        secondaries: Vec<String>,
    },
}

impl MatchOutcome {
    pub fn is_hybrid(&self) -> bool {
        matches!(self, Self::Hybrid { .. })
    }

    pub fn primary_label(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Single { primary, .. } => primary.clone(),
            Self::Hybrid { primary, .. } => format!("{} / {}", primary.0, primary.1),
        }
    }

    pub fn secondaries(&self) -> &[String] {
        match self {
            Self::Empty => &[],
            Self::Single { secondaries, .. } | Self::Hybrid { secondaries, .. } => secondaries,
        }
    }
}

/// Everything a renderer needs after a quiz or a shared link is scored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Normalized, un-skewed trait values on -100..100.
    pub profile: BTreeMap<String, f64>,
    pub raw: BTreeMap<String, f64>,
    pub ranges: BTreeMap<String, ScoreRange>,
    pub ranking: Vec<RankedMatch>,
    pub outcome: MatchOutcome,
    /// Shareable encoding of the raw totals.
    pub code: String,
}
