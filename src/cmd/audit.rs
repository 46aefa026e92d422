use super::{offline_traits, DataPaths};
use crate::reports;
use clap::Args;
use std::fs::File;
use traitforge::balancer;
use traitforge::config::Config;
use traitforge::error::{TfResult, TraitForgeError};
use traitforge::model::loader::load_questions_from_file;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[command(flatten)]
    pub config: Config,

    /// Largest per-question mean still considered balanced
    #[arg(long, default_value_t = 0.05)]
    pub tolerance: f64,

    /// Also write the range table to this CSV file
    #[arg(long)]
    pub csv: Option<String>,

    /// Fail when any question exceeds the tolerance
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

pub fn run(args: AuditArgs, paths: &DataPaths) -> TfResult<()> {
    let questions = load_questions_from_file(&paths.questions)?;
    let catalog = paths.catalog()?;
    let traits = offline_traits(&questions, &catalog);

    let audit = balancer::audit(&questions, &traits);

    println!("\n🔎 === BANK AUDIT: {} questions === 🔎", questions.len());
    reports::print_range_report(&audit, &catalog);
    reports::print_means_report(&audit, args.tolerance);

    for name in &audit.unrangeable {
        warn!("Trait '{}' cannot be ranged: no question moves it", name);
    }

    if let Some(path) = &args.csv {
        audit.write_ranges_csv(File::create(path)?)?;
        info!("💾 Wrote range table to {}", path);
    }

    let unbalanced = audit.unbalanced(args.tolerance);
    println!(
        "{} of {} questions exceed a mean of {}",
        unbalanced.len(),
        audit.questions.len(),
        args.tolerance
    );

    if args.strict && !unbalanced.is_empty() {
        return Err(TraitForgeError::Validation(format!(
            "{} questions are not balanced",
            unbalanced.len()
        )));
    }
    Ok(())
}
