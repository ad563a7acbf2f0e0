//! Break length recommendation.

use super::round_half_up;
use crate::error::{Result, ValidationError};

/// Fatigue assumed when the caller has no reading (scale 0-10).
pub const DEFAULT_FATIGUE_LEVEL: i32 = 5;
/// Difficulty assumed when the caller has no reading (scale 1-5).
pub const DEFAULT_DIFFICULTY: i32 = 3;

const MIN_BREAK: f64 = 5.0;
const MAX_BREAK: f64 = 20.0;

/// Recommend a break length in minutes for a session.
///
/// Starts from a fifth of the session (at least 5 minutes), then adds half a
/// minute per fatigue point above 5 and per difficulty point above 3. The
/// result is clamped to 5-20 minutes.
pub fn calculate_optimal_break_time(
    session_duration: u32,
    fatigue_level: i32,
    difficulty: i32,
) -> u32 {
    let base = round_half_up(f64::from(session_duration) / 5.0).max(MIN_BREAK);
    let fatigue_delta = f64::from(fatigue_level) - f64::from(DEFAULT_FATIGUE_LEVEL);
    let difficulty_delta = f64::from(difficulty) - f64::from(DEFAULT_DIFFICULTY);
    let adjusted = round_half_up(base + fatigue_delta * 0.5 + difficulty_delta * 0.5);
    adjusted.clamp(MIN_BREAK, MAX_BREAK) as u32
}

fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::OutOfRange {
        field: field.to_string(),
        min: i64::from(min),
        max: i64::from(max),
        value: i64::from(value),
    })
}

/// Check user-entered readings before asking for a break length.
///
/// # Errors
/// Returns [`crate::CoreError::Validation`] when fatigue is outside 0-10 or
/// difficulty outside 1-5.
pub fn validate_break_inputs(fatigue_level: i32, difficulty: i32) -> Result<()> {
    check_range("fatigue", fatigue_level, 0, 10)?;
    check_range("difficulty", difficulty, 1, 5)?;
    Ok(())
}
