use crate::consts::AUDIT_MEAN_DECIMALS;
use crate::model::Question;
use crate::scorer::range::{calculate_ranges, ScoreRange};
use crate::traits::TraitSet;
use crate::util::{mean, round_to};
use serde::Serialize;
use std::collections::BTreeMap;

const PROMPT_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct TraitRangeRow {
    pub trait_name: String,
    pub range: ScoreRange,
    pub width: f64,
}

/// Means over defining answers, per trait, for one question. Should be ~0
/// after balancing.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionMeans {
    pub label: String,
    pub means: BTreeMap<String, f64>,
}

impl QuestionMeans {
    pub fn max_abs(&self) -> f64 {
        self.means.values().fold(0.0, |acc, m| acc.max(m.abs()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceAudit {
    pub ranges: Vec<TraitRangeRow>,
    pub questions: Vec<QuestionMeans>,
    pub unrangeable: Vec<String>,
}

impl BalanceAudit {
    /// Questions whose worst per-trait mean exceeds `tolerance`.
    pub fn unbalanced(&self, tolerance: f64) -> Vec<&QuestionMeans> {
        self.questions
            .iter()
            .filter(|q| q.max_abs() > tolerance)
            .collect()
    }

    /// Writes the range table as CSV.
    pub fn write_ranges_csv<W: std::io::Write>(&self, writer: W) -> crate::error::TfResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["trait", "min", "max", "width"])?;
        for row in &self.ranges {
            wtr.write_record([
                row.trait_name.clone(),
                row.range.min.to_string(),
                row.range.max.to_string(),
                row.width.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn question_label(index: usize, prompt: &str) -> String {
    let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    format!("Q{}: {}...", index + 1, preview)
}

/// Range and per-question mean report for a bank.
pub fn audit(questions: &[Question], traits: &TraitSet) -> BalanceAudit {
    let ranges: Vec<TraitRangeRow> = traits
        .iter()
        .zip(calculate_ranges(questions, traits))
        .map(|(name, range)| TraitRangeRow {
            trait_name: name.to_string(),
            range,
            width: round_to(range.width(), 2),
        })
        .collect();

    let unrangeable = ranges
        .iter()
        .filter(|r| r.range.is_unrangeable())
        .map(|r| r.trait_name.clone())
        .collect();

    let question_rows = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let means = traits
                .iter()
                .map(|t| {
                    let defined: Vec<f64> = q
                        .answers
                        .iter()
                        .filter_map(|a| a.scores.get(t).copied())
                        .collect();
                    let m = mean(&defined)
                        .map(|m| round_to(m, AUDIT_MEAN_DECIMALS))
                        .unwrap_or(0.0);
                    (t.to_string(), m)
                })
                .collect();
            QuestionMeans {
                label: question_label(i, &q.prompt),
                means,
            }
        })
        .collect();

    BalanceAudit {
        ranges,
        questions: question_rows,
        unrangeable,
    }
}
