//! User profile types: performance, habits and study preferences.
//!
//! Every field carries a serde default so partially populated payloads from a
//! data provider deserialize cleanly. Absent nested values read as absent,
//! never as an error.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Consistency assumed when habits carry none.
pub const DEFAULT_CONSISTENCY: f64 = 0.5;
/// Average score assumed when performance carries none.
pub const DEFAULT_AVERAGE_SCORE: f64 = 70.0;

/// How the user performs across subjects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPerformance {
    /// 0-100
    #[serde(default)]
    pub average_score: Option<f64>,
    /// 0-1
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub weak_areas: BTreeSet<String>,
    #[serde(default)]
    pub strong_areas: BTreeSet<String>,
}

impl UserPerformance {
    pub fn is_weak(&self, subject: Option<&str>) -> bool {
        subject.is_some_and(|s| self.weak_areas.contains(s))
    }

    pub fn is_strong(&self, subject: Option<&str>) -> bool {
        subject.is_some_and(|s| self.strong_areas.contains(s))
    }

    pub fn average_score_or_default(&self) -> f64 {
        self.average_score.unwrap_or(DEFAULT_AVERAGE_SCORE)
    }

    pub fn with_weak_area(mut self, subject: impl Into<String>) -> Self {
        self.weak_areas.insert(subject.into());
        self
    }

    pub fn with_strong_area(mut self, subject: impl Into<String>) -> Self {
        self.strong_areas.insert(subject.into());
        self
    }

    pub fn with_average_score(mut self, score: f64) -> Self {
        self.average_score = Some(score);
        self
    }
}

/// One day of study activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub sessions_completed: u32,
    /// Minutes studied that day
    #[serde(default)]
    pub total_duration: u32,
}

/// Observed study habits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHabits {
    /// Period label -> affinity. Insertion order breaks ties.
    #[serde(default)]
    pub preferred_study_time: IndexMap<String, f64>,
    #[serde(default)]
    pub average_session_length: Option<u32>,
    /// 0-1
    #[serde(default)]
    pub consistency_score: Option<f64>,
    #[serde(default)]
    pub completion_history: Vec<CompletionRecord>,
}

impl UserHabits {
    pub fn consistency_or_default(&self) -> f64 {
        self.consistency_score.unwrap_or(DEFAULT_CONSISTENCY)
    }

    /// Label with the highest affinity; the earliest entry wins ties.
    pub fn best_study_period(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (period, score) in &self.preferred_study_time {
            match best {
                Some((_, top)) if *score <= top => {}
                _ => best = Some((period.as_str(), *score)),
            }
        }
        best.map(|(period, _)| period)
    }
}

fn default_study_duration() -> u32 {
    25
}
fn default_break_duration() -> u32 {
    5
}

/// Scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Base session length in minutes (default 25)
    #[serde(default = "default_study_duration")]
    pub study_duration: u32,
    /// Base break length in minutes (default 5)
    #[serde(default = "default_break_duration")]
    pub break_duration: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            study_duration: default_study_duration(),
            break_duration: default_break_duration(),
        }
    }
}

/// Accessibility flags, carried through for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub large_text: bool,
    #[serde(default)]
    pub screen_reader: bool,
}

fn default_true() -> bool {
    true
}
fn default_frequency() -> String {
    "daily".into()
}

/// Reminder configuration, carried through for the notification layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default = "default_true")]
    pub smart_timing: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: default_frequency(),
            smart_timing: true,
        }
    }
}

/// Everything a data provider knows about the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub performance: UserPerformance,
    #[serde(default)]
    pub habits: UserHabits,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    #[serde(default)]
    pub reminder_settings: ReminderSettings,
}
