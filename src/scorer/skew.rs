use crate::model::{Archetype, SkewMap};
use crate::traits::TraitVector;
use tracing::warn;

/// Nudges `base` towards the archetypes named in `skew`. Each nonzero entry
/// adds that archetype's comparison-scale fingerprint times
/// `skew * skew_weight`. Returns a new vector; `base` stays the displayed
/// profile.
pub fn apply_skew(
    base: &TraitVector,
    skew: &SkewMap,
    archetypes: &[Archetype],
    fingerprints: &[TraitVector],
    skew_weight: f64,
) -> TraitVector {
    let mut skewed = base.clone();

    for (name, &value) in skew {
        if value == 0 {
            continue;
        }
        let Some(pos) = archetypes.iter().position(|a| &a.name == name) else {
            warn!("Skew targets unknown archetype '{}', ignoring", name);
            continue;
        };
        let factor = value as f64 * skew_weight;
        for (idx, fp) in fingerprints[pos].values().iter().enumerate() {
            skewed.add_at(idx, fp * factor);
        }
    }
    skewed
}
