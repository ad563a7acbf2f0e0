pub mod breaks;
pub mod config;
pub mod content;
pub mod plan;
pub mod schedule;

use std::path::Path;

use serde::Serialize;
use studyflow_core::{Clock, MockUserDataProvider, SystemClock};
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Provider for `--data`, or the built-in sample dated from now.
pub fn load_provider(
    data: Option<&Path>,
) -> Result<MockUserDataProvider, Box<dyn std::error::Error>> {
    match data {
        Some(path) => {
            debug!(path = %path.display(), "using fixture file");
            Ok(MockUserDataProvider::from_json_path(path)?)
        }
        None => {
            debug!("using built-in sample data");
            Ok(MockUserDataProvider::sample(SystemClock.now()))
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
