use std::path::{Path, PathBuf};

use clap::Args;
use studyflow_core::{Config, Feedback, PlannerOptions, StudyPlanner, SystemClock};

use super::{load_provider, print_json, CommandResult};

#[derive(Args)]
pub struct PlanArgs {
    /// JSON feedback to revise the plan's schedule with
    #[arg(long)]
    feedback: Option<PathBuf>,
}

pub fn run(data: Option<&Path>, args: PlanArgs) -> CommandResult {
    let provider = load_provider(data)?;
    let options = PlannerOptions::from_config(&Config::load_or_default());

    let planner = StudyPlanner::new(provider, SystemClock).with_options(options);
    let mut plan = planner.plan()?;

    if let Some(path) = args.feedback {
        let feedback: Feedback = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        plan = planner.revise(plan, &feedback);
    }

    print_json(&plan)
}
