//! Commands exposing the individual planning components.

use std::path::Path;

use studyflow_core::{
    detect_study_pattern, generate_balanced_mix, recommend_sequence, Clock, Config,
    PriorityCalculator, SessionGrouper, SystemClock, UserDataProvider,
};

use super::{load_provider, print_json, CommandResult};

pub fn prioritize(data: Option<&Path>) -> CommandResult {
    let provider = load_provider(data)?;
    let user = provider.user_data()?;
    let content = provider.content()?;

    let ranked =
        PriorityCalculator::new(SystemClock.now()).prioritize(&content, Some(&user.performance));
    print_json(&ranked)
}

pub fn sessions(data: Option<&Path>, target: Option<u32>) -> CommandResult {
    let provider = load_provider(data)?;
    let user = provider.user_data()?;
    let content = provider.content()?;
    let target = target.unwrap_or_else(|| Config::load_or_default().study.session_target);

    let ranked =
        PriorityCalculator::new(SystemClock.now()).prioritize(&content, Some(&user.performance));
    print_json(&SessionGrouper::new(target).group(&ranked))
}

pub fn sequence(data: Option<&Path>) -> CommandResult {
    let provider = load_provider(data)?;
    print_json(&recommend_sequence(&provider.content()?))
}

pub fn mix(data: Option<&Path>) -> CommandResult {
    let provider = load_provider(data)?;
    let user = provider.user_data()?;
    print_json(&generate_balanced_mix(&provider.content()?, &user.performance))
}

pub fn pattern(data: Option<&Path>) -> CommandResult {
    let provider = load_provider(data)?;
    print_json(&detect_study_pattern(&provider.user_data()?.habits))
}
