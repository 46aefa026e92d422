pub mod matcher;
pub mod normalize;
pub mod range;
pub mod skew;
pub mod types;

pub use self::range::ScoreRange;
pub use self::types::{MatchOutcome, RankedMatch, ScoreReport};

use crate::codec::ScoreCodec;
use crate::config::{Config, MatchParams};
use crate::error::{TfResult, TraitForgeError};
use crate::model::{Archetype, Question, SkewMap};
use crate::session::QuizSession;
use crate::traits::{TraitSet, TraitVector};
use tracing::{debug, info};

/// Loaded question bank and archetypes plus everything derived from them.
/// Ranges and fingerprints are computed once and rebuilt only when the bank
/// is replaced.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    questions: Vec<Question>,
    archetypes: Vec<Archetype>,
    traits: TraitSet,
    ranges: Vec<ScoreRange>,
    fingerprints: Vec<TraitVector>,
    params: MatchParams,
    codec: ScoreCodec,
}

impl ScoringEngine {
    pub fn new(questions: Vec<Question>, archetypes: Vec<Archetype>, config: &Config) -> Self {
        let mut engine = Self {
            questions,
            archetypes,
            traits: TraitSet::default(),
            ranges: Vec::new(),
            fingerprints: Vec::new(),
            params: config.matching.clone(),
            codec: ScoreCodec::from(&config.codec),
        };
        engine.rebuild();
        engine
    }

    /// Swaps in a new question bank and recomputes everything derived from it.
    pub fn replace_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.traits = TraitSet::discover(&self.questions, &self.archetypes);
        self.ranges = range::calculate_ranges(&self.questions, &self.traits);
        self.fingerprints = self
            .archetypes
            .iter()
            .map(|a| matcher::fingerprint_vector(a, &self.traits, self.params.fingerprint_scale))
            .collect();

        info!(
            "🧭 Engine ready: {} questions, {} archetypes, {} traits",
            self.questions.len(),
            self.archetypes.len(),
            self.traits.len()
        );
        for (name, r) in self.traits.iter().zip(&self.ranges) {
            debug!("Range {}: [{}, {}]", name, r.min, r.max);
        }
    }

    pub fn traits(&self) -> &TraitSet {
        &self.traits
    }

    pub fn ranges(&self) -> &[ScoreRange] {
        &self.ranges
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    pub fn codec(&self) -> ScoreCodec {
        self.codec
    }

    /// Starts a fresh session over this engine's bank. `seed` fixes the
    /// question order; `None` shuffles randomly.
    pub fn start_session(&self, seed: Option<u64>) -> QuizSession {
        QuizSession::new(self.questions.len(), self.traits.clone(), seed)
    }

    pub fn normalize(&self, raw: &TraitVector) -> TraitVector {
        normalize::normalize_vector(raw, &self.ranges)
    }

    /// Ranks archetypes against a normalized vector, after nudging it by
    /// `skew` when any is supplied.
    pub fn rank(&self, normalized: &TraitVector, skew: &SkewMap) -> Vec<RankedMatch> {
        let user = if skew.values().any(|&v| v != 0) {
            skew::apply_skew(
                normalized,
                skew,
                &self.archetypes,
                &self.fingerprints,
                self.params.skew_weight,
            )
        } else {
            normalized.clone()
        };
        matcher::rank(&user, &self.archetypes, &self.fingerprints, self.params.metric)
    }

    pub fn classify(&self, ranking: &[RankedMatch]) -> MatchOutcome {
        matcher::classify(ranking, &self.params)
    }

    /// Full pipeline: normalize, match (skewed), classify and encode.
    pub fn evaluate(&self, raw: &TraitVector, skew: &SkewMap) -> TfResult<ScoreReport> {
        if raw.len() != self.traits.len() {
            return Err(TraitForgeError::FieldCount {
                expected: self.traits.len(),
                found: raw.len(),
            });
        }

        let normalized = self.normalize(raw);
        let ranking = self.rank(&normalized, skew);
        let outcome = self.classify(&ranking);
        let code = self.encode(raw)?;

        debug!("Outcome: {:?}", outcome);

        Ok(ScoreReport {
            profile: normalized.to_map(&self.traits),
            raw: raw.to_map(&self.traits),
            ranges: self
                .traits
                .names()
                .iter()
                .cloned()
                .zip(self.ranges.iter().copied())
                .collect(),
            ranking,
            outcome,
            code,
        })
    }

    pub fn evaluate_session(&self, session: &QuizSession) -> TfResult<ScoreReport> {
        self.evaluate(session.scores(), session.skew())
    }

    /// Scores a shared code. Shared links carry no skew.
    pub fn evaluate_code(&self, code: &str) -> TfResult<ScoreReport> {
        let raw = self.decode(code)?;
        self.evaluate(&raw, &SkewMap::new())
    }

    pub fn encode(&self, raw: &TraitVector) -> TfResult<String> {
        self.codec.encode(raw, &self.traits)
    }

    pub fn decode(&self, code: &str) -> TfResult<TraitVector> {
        self.codec.decode(code, &self.traits)
    }
}
