use super::range::ScoreRange;
use crate::consts::{SCALE_MAX, SCALE_MIN, SCALE_NEUTRAL};
use crate::traits::TraitVector;
use crate::util::round_half_up;

/// Maps a raw total linearly onto -100..100 so that `min -> -100` and
/// `max -> 100`, rounded to the nearest integer. A range without width maps
/// to the neutral midpoint.
pub fn normalize_score(raw: f64, range: ScoreRange) -> f64 {
    let width = range.width();
    if width <= 0.0 {
        return SCALE_NEUTRAL;
    }
    round_half_up(SCALE_MIN + (SCALE_MAX - SCALE_MIN) * (raw - range.min) / width)
}

pub fn normalize_vector(raw: &TraitVector, ranges: &[ScoreRange]) -> TraitVector {
    TraitVector::from_values(
        ranges
            .iter()
            .enumerate()
            .map(|(idx, range)| normalize_score(raw.get(idx), *range))
            .collect(),
    )
}
