use super::DataPaths;
use crate::reports;
use clap::Args;
use traitforge::config::Config;
use traitforge::error::{TfResult, TraitForgeError};
use traitforge::model::loader::{load_archetypes_from_file, load_questions_from_file};
use traitforge::scorer::ScoringEngine;
use traitforge::session::QuizSession;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Comma-separated answer indices, one per question in asking order
    #[arg(short = 'A', long, conflicts_with = "code")]
    pub answers: Option<String>,

    /// Shared result code to decode and score
    #[arg(short = 'C', long)]
    pub code: Option<String>,

    /// Shuffle the asking order with this seed
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Print the report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn parse_answers(s: &str) -> TfResult<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<usize>().map_err(|_| {
                TraitForgeError::Validation(format!("'{}' is not an answer index", p))
            })
        })
        .collect()
}

pub fn run(args: ScoreArgs, paths: &DataPaths, config: &Config) -> TfResult<()> {
    let questions = load_questions_from_file(&paths.questions)?;
    let archetypes = load_archetypes_from_file(&paths.archetypes)?;
    let catalog = paths.catalog()?;
    let engine = ScoringEngine::new(questions, archetypes, config);

    let report = match (&args.answers, &args.code) {
        (_, Some(code)) => {
            info!("🔗 Scoring shared code '{}'", code);
            engine.evaluate_code(code)?
        }
        (Some(list), None) => {
            let picks = parse_answers(list)?;
            let mut session = match args.seed {
                Some(seed) => engine.start_session(Some(seed)),
                None => QuizSession::in_order(engine.questions().len(), engine.traits().clone()),
            };
            if picks.len() != session.order().len() {
                return Err(TraitForgeError::Validation(format!(
                    "Expected {} answers, got {}",
                    session.order().len(),
                    picks.len()
                )));
            }
            for pick in picks {
                session.select_answer(engine.questions(), pick)?;
            }
            engine.evaluate_session(&session)?
        }
        (None, None) => {
            return Err(TraitForgeError::Validation(
                "Provide --answers or --code".to_string(),
            ))
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n🧬 === TRAIT PROFILE === 🧬");
    reports::print_profile_report(&report, &catalog);
    reports::print_ranking_report(&report, engine.params().metric);
    reports::print_outcome(&report);
    Ok(())
}
