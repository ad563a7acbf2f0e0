//! Study pattern detection from completion history.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profile::UserHabits;

/// Broad shape of a user's study rhythm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyPattern {
    /// Several short sessions a day
    FrequentShort,
    /// About one long session a day
    DailyLong,
    /// Occasional marathon sessions
    InfrequentIntensive,
    Irregular,
    /// No history to judge from
    Unknown,
}

impl StudyPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrequentShort => "frequent-short",
            Self::DailyLong => "daily-long",
            Self::InfrequentIntensive => "infrequent-intensive",
            Self::Irregular => "irregular",
            Self::Unknown => "unknown",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::FrequentShort => {
                "You study in short, frequent bursts. \
                 Group related topics so each burst builds on the last."
            }
            Self::DailyLong => {
                "You keep a steady daily routine with long sessions. \
                 Add short breaks every 25 minutes to stay sharp."
            }
            Self::InfrequentIntensive => {
                "You study in long, infrequent sessions. \
                 Spreading the same time over more days improves retention."
            }
            Self::Irregular => {
                "Your study times vary a lot. \
                 A fixed daily slot, even a short one, will help build a habit."
            }
            Self::Unknown => {
                "Not enough study history yet. \
                 Complete a few sessions to get a personalized recommendation."
            }
        }
    }
}

impl fmt::Display for StudyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected pattern with the averages it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub pattern: StudyPattern,
    pub recommendation: String,
    /// Mean sessions per recorded day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_sessions: Option<f64>,
    /// Mean minutes per session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_duration: Option<f64>,
}

impl PatternReport {
    fn new(
        pattern: StudyPattern,
        average_sessions: Option<f64>,
        average_duration: Option<f64>,
    ) -> Self {
        Self {
            pattern,
            recommendation: pattern.recommendation().to_string(),
            average_sessions,
            average_duration,
        }
    }
}

/// Classify the user's completion history
///
/// Tiers are checked in order:
/// 1. frequent-short: 2.5+ sessions a day
/// 2. daily-long: 1+ sessions a day averaging 45+ minutes
/// 3. infrequent-intensive: under one session a day averaging 60+ minutes
/// 4. irregular: anything else
pub fn detect_study_pattern(habits: &UserHabits) -> PatternReport {
    let history = &habits.completion_history;
    if history.is_empty() {
        return PatternReport::new(StudyPattern::Unknown, None, None);
    }

    let days = history.len() as f64;
    let total_sessions: u64 = history.iter().map(|r| u64::from(r.sessions_completed)).sum();
    let total_minutes: u64 = history.iter().map(|r| u64::from(r.total_duration)).sum();

    let average_sessions = total_sessions as f64 / days;
    let average_duration = if total_sessions == 0 {
        0.0
    } else {
        total_minutes as f64 / total_sessions as f64
    };

    let pattern = if average_sessions >= 2.5 {
        StudyPattern::FrequentShort
    } else if average_sessions >= 1.0 && average_duration >= 45.0 {
        StudyPattern::DailyLong
    } else if average_sessions < 1.0 && average_duration >= 60.0 {
        StudyPattern::InfrequentIntensive
    } else {
        StudyPattern::Irregular
    };

    PatternReport::new(pattern, Some(average_sessions), Some(average_duration))
}
