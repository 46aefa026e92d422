use super::types::{MatchOutcome, RankedMatch};
use crate::config::{FingerprintScale, MatchParams, Metric};
use crate::model::Archetype;
use crate::traits::{TraitSet, TraitVector};
use std::cmp::Ordering;

/// An archetype's fingerprint on the comparison scale, indexed by `traits`.
/// Unlisted traits sit at the scale's neutral point, which is 0 here.
pub fn fingerprint_vector(
    archetype: &Archetype,
    traits: &TraitSet,
    scale: FingerprintScale,
) -> TraitVector {
    TraitVector::from_values(
        traits
            .iter()
            .map(|t| {
                archetype
                    .fingerprint_value(t)
                    .map(|v| scale.to_comparison(v))
                    .unwrap_or(0.0)
            })
            .collect(),
    )
}

/// Cosine similarity, defined as 0 when either vector has no magnitude.
pub fn cosine_similarity(a: &TraitVector, b: &TraitVector) -> f64 {
    let mag = a.magnitude() * b.magnitude();
    if mag == 0.0 {
        return 0.0;
    }
    a.dot(b) / mag
}

pub fn euclidean_distance(a: &TraitVector, b: &TraitVector) -> f64 {
    a.distance(b)
}

/// Scores every archetype against `user` and sorts best-first. Equal scores
/// keep the archetypes' declaration order.
pub fn rank(
    user: &TraitVector,
    archetypes: &[Archetype],
    fingerprints: &[TraitVector],
    metric: Metric,
) -> Vec<RankedMatch> {
    let mut ranking: Vec<RankedMatch> = archetypes
        .iter()
        .zip(fingerprints)
        .map(|(archetype, fp)| RankedMatch {
            name: archetype.name.clone(),
            score: match metric {
                Metric::Euclidean => euclidean_distance(user, fp),
                Metric::Cosine => cosine_similarity(user, fp),
            },
            description: archetype.description.clone(),
        })
        .collect();

    ranking.sort_by(|a, b| {
        let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
        match metric {
            Metric::Euclidean => ord,
            Metric::Cosine => ord.reverse(),
        }
    });
    ranking
}

/// True when `second` is close enough to a positive `top` to share first place.
#[inline]
pub fn is_tie(top: f64, second: f64, tie_ratio: f64) -> bool {
    top > 0.0 && second >= top * tie_ratio
}

/// Splits a sorted ranking into a primary (single or hybrid) and the
/// secondaries that follow it. Ties are only detected for cosine rankings.
pub fn classify(ranking: &[RankedMatch], params: &MatchParams) -> MatchOutcome {
    let names = |from: usize| -> Vec<String> {
        ranking
            .iter()
            .skip(from)
            .take(params.secondary_count)
            .map(|m| m.name.clone())
            .collect()
    };

    match ranking {
        [] => MatchOutcome::Empty,
        [top, second, ..]
            if params.metric == Metric::Cosine
                && is_tie(top.score, second.score, params.tie_ratio) =>
        {
            MatchOutcome::Hybrid {
                primary: (top.name.clone(), second.name.clone()),
                secondaries: names(2),
            }
        }
        [top, ..] => MatchOutcome::Single {
            primary: top.name.clone(),
            secondaries: names(1),
        },
    }
}
