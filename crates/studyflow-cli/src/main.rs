use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyflow", version, about = "Studyflow adaptive study planner")]
struct Cli {
    /// JSON fixture with user data and content (defaults to the built-in sample)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Log planning decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole planning pipeline
    Plan(commands::plan::PlanArgs),
    /// Rank content by priority
    Prioritize,
    /// Pack prioritized content into sessions
    Sessions {
        /// Target session length in minutes
        #[arg(long)]
        target: Option<u32>,
    },
    /// Interleaved study order across subjects
    Sequence,
    /// Balanced mix of weak, strong and new content
    Mix,
    /// Multi-day study schedule
    Schedule(commands::schedule::ScheduleArgs),
    /// Detect the study pattern from completion history
    Pattern,
    /// Recommend a break length
    BreakTime(commands::breaks::BreakArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data = cli.data.as_deref();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(data, args),
        Commands::Prioritize => commands::content::prioritize(data),
        Commands::Sessions { target } => commands::content::sessions(data, target),
        Commands::Sequence => commands::content::sequence(data),
        Commands::Mix => commands::content::mix(data),
        Commands::Schedule(args) => commands::schedule::run(data, args),
        Commands::Pattern => commands::content::pattern(data),
        Commands::BreakTime(args) => commands::breaks::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
