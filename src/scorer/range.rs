use crate::consts::RANGE_DECIMALS;
use crate::model::Question;
use crate::traits::TraitSet;
use crate::util::round_to;
use serde::{Deserialize, Serialize};

/// Achievable raw total for one trait across the whole bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// No question moves this trait in either direction.
    #[inline]
    pub fn is_unrangeable(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

/// Sums, per trait, the lowest and highest score each question can give.
/// Answers that omit a trait count as 0 for that question's min and max.
pub fn calculate_ranges(questions: &[Question], traits: &TraitSet) -> Vec<ScoreRange> {
    let mut ranges = vec![ScoreRange::default(); traits.len()];

    for question in questions {
        if question.answers.is_empty() {
            continue;
        }
        for (idx, trait_name) in traits.iter().enumerate() {
            let (lo, hi) = question
                .answers
                .iter()
                .map(|a| a.score(trait_name))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                    (lo.min(s), hi.max(s))
                });
            ranges[idx].min += lo;
            ranges[idx].max += hi;
        }
    }

    for r in ranges.iter_mut() {
        r.min = round_to(r.min, RANGE_DECIMALS);
        r.max = round_to(r.max, RANGE_DECIMALS);
    }
    ranges
}
