use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use traitforge::config::Config;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/questions.json")]
    questions: String,

    #[arg(global = true, short, long, default_value = "data/archetypes.json")]
    archetypes: String,

    /// Optional trait metadata (labels, descriptions)
    #[arg(global = true, short, long)]
    traits: Option<String>,

    /// JSON file with balance/matching/codec settings
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Center, rescale and re-center the question bank
    Balance(cmd::balance::BalanceArgs),
    /// Report score ranges and per-question trait means
    Audit(cmd::audit::AuditArgs),
    /// Score an answer sequence or a shared result code
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Balance(args) => (&args.config, "balance"),
        Commands::Audit(args) => (&args.config, "audit"),
        Commands::Score(args) => (&args.config, "score"),
    };
    let sub_matches = matches.subcommand_matches(sub_name).unwrap_or(&matches);

    let config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading Config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ Failed to load config '{}': {}", path, e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => {
            warn!("⚠️  No config file given. Using defaults and flags.");
            cli_config.clone()
        }
    };

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    let paths = cmd::DataPaths {
        questions: cli.questions.clone(),
        archetypes: cli.archetypes.clone(),
        traits: cli.traits.clone(),
    };

    let result = match cli.command {
        Commands::Balance(args) => cmd::balance::run(args, &paths, &config),
        Commands::Audit(args) => cmd::audit::run(args, &paths),
        Commands::Score(args) => cmd::score::run(args, &paths, &config),
    };

    if let Err(e) = result {
        error!("\n❌ FATAL: {}", e);
        process::exit(1);
    }
}
