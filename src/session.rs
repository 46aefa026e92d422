use crate::error::{TfResult, TraitForgeError};
use crate::model::{Answer, Question, SkewMap};
use crate::traits::{TraitSet, TraitVector};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// One user's pass through the bank: the question order, the raw trait
/// totals and the accumulated skew. Owned by a single caller.
#[derive(Debug, Clone)]
pub struct QuizSession {
    traits: TraitSet,
    order: Vec<usize>,
    position: usize,
    scores: TraitVector,
    skew: SkewMap,
    // None keeps bank order across restarts
    rng: Option<fastrand::Rng>,
}

impl QuizSession {
    pub fn new(question_count: usize, traits: TraitSet, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        let mut session = Self {
            scores: traits.zeros(),
            traits,
            order: (0..question_count).collect(),
            position: 0,
            skew: SkewMap::new(),
            rng: Some(rng),
        };
        session.shuffle();
        session
    }

    /// Same as [`QuizSession::new`] but asks the questions in bank order.
    pub fn in_order(question_count: usize, traits: TraitSet) -> Self {
        Self {
            scores: traits.zeros(),
            traits,
            order: (0..question_count).collect(),
            position: 0,
            skew: SkewMap::new(),
            rng: None,
        }
    }

    fn shuffle(&mut self) {
        if let Some(rng) = self.rng.as_mut() {
            rng.shuffle(&mut self.order);
        }
    }

    /// Clears the totals and reshuffles for another attempt. Sessions built
    /// with [`QuizSession::in_order`] stay in bank order.
    pub fn restart(&mut self) {
        self.scores = self.traits.zeros();
        self.skew.clear();
        self.position = 0;
        self.order.sort_unstable();
        self.shuffle();
    }

    /// Bank indices in the order this session asks them.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Bank index of the question awaiting an answer.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.position).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.order.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.position,
            total: self.order.len(),
        }
    }

    /// Records the answer at `answer_idx` of the current question and moves on.
    pub fn select_answer(&mut self, bank: &[Question], answer_idx: usize) -> TfResult<()> {
        let q_idx = self.current().ok_or_else(|| {
            TraitForgeError::Validation("Session already complete".to_string())
        })?;
        let question = bank.get(q_idx).ok_or_else(|| {
            TraitForgeError::Validation(format!(
                "Question {} is outside a bank of {}",
                q_idx,
                bank.len()
            ))
        })?;
        let answer = question.answers.get(answer_idx).ok_or_else(|| {
            TraitForgeError::Validation(format!(
                "Answer {} does not exist for '{}' ({} answers)",
                answer_idx,
                question.prompt,
                question.answers.len()
            ))
        })?;

        self.apply(answer);
        self.position += 1;
        Ok(())
    }

    /// Adds an answer's scores and skew to the running totals without moving
    /// through the question order.
    pub fn apply(&mut self, answer: &Answer) {
        for (trait_name, score) in &answer.scores {
            match self.traits.index_of(trait_name) {
                Some(idx) => self.scores.add_at(idx, *score),
                None => debug!("Ignoring score for unknown trait '{}'", trait_name),
            }
        }
        for (archetype, weight) in &answer.skew {
            *self.skew.entry(archetype.clone()).or_default() += weight;
        }
    }

    pub fn traits(&self) -> &TraitSet {
        &self.traits
    }

    pub fn scores(&self) -> &TraitVector {
        &self.scores
    }

    pub fn skew(&self) -> &SkewMap {
        &self.skew
    }
}
