use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use studyflow_core::{
    AdaptiveScheduler, Clock, Config, Feedback, PriorityCalculator, SystemClock, UserDataProvider,
};

use super::{load_provider, print_json, CommandResult};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Number of days to schedule
    #[arg(long)]
    days: Option<u32>,

    /// First day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start: Option<String>,

    /// JSON feedback to apply to the generated schedule
    #[arg(long)]
    feedback: Option<PathBuf>,
}

pub fn run(data: Option<&Path>, args: ScheduleArgs) -> CommandResult {
    let provider = load_provider(data)?;
    let config = Config::load_or_default();
    let mut user = provider.user_data()?;
    config.apply_to(&mut user);

    let now = SystemClock.now();
    let start = match args.start.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| format!("invalid start date '{raw}': {e}"))?
            .and_hms_opt(0, 0, 0)
            .map(|d| d.and_utc())
            .ok_or_else(|| format!("invalid start date '{raw}'"))?,
        None => now,
    };
    let days = args.days.unwrap_or(config.study.days_to_schedule);

    let content = provider.content()?;
    let ranked = PriorityCalculator::new(now).prioritize(&content, Some(&user.performance));
    let scheduler = AdaptiveScheduler::new();
    let mut schedule = scheduler.generate_schedule(Some(&user), &ranked, start, days);

    if let Some(path) = args.feedback {
        let feedback: Feedback = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        schedule = scheduler.adjust_for_feedback(schedule, Some(&feedback), now);
    }

    print_json(&schedule)
}
