use super::{offline_traits, DataPaths};
use crate::reports;
use clap::Args;
use traitforge::balancer::{self, Balancer};
use traitforge::config::Config;
use traitforge::error::TfResult;
use traitforge::model::loader::{load_questions_from_file, save_questions};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BalanceArgs {
    #[command(flatten)]
    pub config: Config,

    /// Write here instead of overwriting the question file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the result without writing anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

pub fn run(args: BalanceArgs, paths: &DataPaths, config: &Config) -> TfResult<()> {
    let questions = load_questions_from_file(&paths.questions)?;
    let catalog = paths.catalog()?;
    let traits = offline_traits(&questions, &catalog);

    println!("\n⚖️  === BALANCING {} QUESTIONS === ⚖️", questions.len());

    let balancer = Balancer::new(config.balance.clone())?;
    let (balanced, report) = balancer.balance(&questions, &traits);

    reports::print_scaling_report(&report, &catalog, config.balance.target_std_dev);

    let audit = balancer::audit(&balanced, &traits);
    let worst = audit
        .questions
        .iter()
        .map(|q| q.max_abs())
        .fold(0.0f64, f64::max);
    println!("Largest remaining per-question mean: {:.3}", worst);

    if args.dry_run {
        println!("Dry run, nothing written.");
        return Ok(());
    }

    let target = args.output.as_deref().unwrap_or(&paths.questions);
    save_questions(target, &balanced)?;
    info!("💾 Wrote balanced bank to {}", target);
    println!("Successfully re-balanced {}", target);
    Ok(())
}
