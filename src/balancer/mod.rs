pub mod audit;

use crate::config::BalanceParams;
use crate::error::TfResult;
use crate::model::Question;
use crate::traits::TraitSet;
use crate::util::{mean, population_std_dev, round_half_up, round_to};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use self::audit::{audit, BalanceAudit, QuestionMeans};

/// What the global rescale pass did to one trait.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitScaling {
    pub trait_name: String,
    pub samples: usize,
    pub std_dev: f64,
    /// `None` when the trait was left at its centered values.
    pub factor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceReport {
    pub scaling: Vec<TraitScaling>,
}

pub struct Balancer {
    params: BalanceParams,
}

impl Balancer {
    /// Fails on a non-positive target spread or a negative clamp limit.
    pub fn new(params: BalanceParams) -> TfResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Runs centering, rescaling and re-centering over a copy of the bank.
    pub fn balance(
        &self,
        questions: &[Question],
        traits: &TraitSet,
    ) -> (Vec<Question>, BalanceReport) {
        let mut bank = questions.to_vec();

        center(&mut bank, traits, self.params.center_decimals);
        let scaling = self.rescale(&mut bank, traits);
        center(&mut bank, traits, self.params.final_decimals);

        let scaled = scaling.iter().filter(|s| s.factor.is_some()).count();
        info!(
            "⚖️  Balanced {} questions: {}/{} traits rescaled",
            bank.len(),
            scaled,
            traits.len()
        );

        (bank, BalanceReport { scaling })
    }

    /// Scales every trait's scores towards the target spread, then rounds and
    /// clamps them to integers.
    pub fn rescale(&self, bank: &mut [Question], traits: &TraitSet) -> Vec<TraitScaling> {
        let limit = self.params.clamp_limit as f64;

        traits
            .iter()
            .map(|trait_name| {
                let all: Vec<f64> = bank
                    .iter()
                    .flat_map(|q| q.answers.iter())
                    .filter_map(|a| a.scores.get(trait_name).copied())
                    .collect();

                let std_dev = population_std_dev(&all).unwrap_or(0.0);
                let mut scaling = TraitScaling {
                    trait_name: trait_name.to_string(),
                    samples: all.len(),
                    std_dev,
                    factor: None,
                };

                if all.is_empty() {
                    warn!("Trait '{}' is not scored by any answer, skipping", trait_name);
                    return scaling;
                }
                if std_dev <= 0.0 {
                    debug!("Trait '{}' has no spread, leaving centered scores", trait_name);
                    return scaling;
                }

                let factor = self.params.target_std_dev / std_dev;
                debug!(
                    "Trait '{}': n={} sd={:.3} factor={:.3}",
                    trait_name,
                    all.len(),
                    std_dev,
                    factor
                );

                for answer in bank.iter_mut().flat_map(|q| q.answers.iter_mut()) {
                    if let Some(score) = answer.scores.get_mut(trait_name) {
                        *score = round_half_up(*score * factor).clamp(-limit, limit);
                    }
                }
                scaling.factor = Some(factor);
                scaling
            })
            .collect()
    }
}

/// Subtracts, per question and trait, the mean over the answers that define
/// the trait. Answers omitting the trait are left untouched.
pub fn center(bank: &mut [Question], traits: &TraitSet, decimals: u32) {
    for question in bank.iter_mut() {
        for trait_name in traits.iter() {
            let defined: Vec<f64> = question
                .answers
                .iter()
                .filter_map(|a| a.scores.get(trait_name).copied())
                .collect();

            let Some(m) = mean(&defined) else {
                continue;
            };

            for answer in question.answers.iter_mut() {
                if let Some(score) = answer.scores.get_mut(trait_name) {
                    *score = round_to(*score - m, decimals);
                }
            }
        }
    }
}
