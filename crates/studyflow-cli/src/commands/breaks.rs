use clap::Args;
use studyflow_core::calculate_optimal_break_time;
use studyflow_core::scheduler::{validate_break_inputs, DEFAULT_DIFFICULTY, DEFAULT_FATIGUE_LEVEL};

use super::CommandResult;

#[derive(Args)]
pub struct BreakArgs {
    /// Session length in minutes
    duration: u32,

    /// Fatigue level (0-10)
    #[arg(long, default_value_t = DEFAULT_FATIGUE_LEVEL)]
    fatigue: i32,

    /// Content difficulty (1-5)
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: i32,
}

pub fn run(args: BreakArgs) -> CommandResult {
    validate_break_inputs(args.fatigue, args.difficulty)?;

    let minutes = calculate_optimal_break_time(args.duration, args.fatigue, args.difficulty);
    println!("{minutes}");
    Ok(())
}
