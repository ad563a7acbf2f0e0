//! End-to-end study plan assembly.
//!
//! [`StudyPlanner`] pulls data from a provider and runs every planning
//! component against one reading of the clock. Callers re-run it whenever
//! the underlying data changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::content::ContentItem;
use crate::error::Result;
use crate::grouping::{Session, SessionGrouper, DEFAULT_TARGET_DURATION};
use crate::mix::generate_balanced_mix;
use crate::prioritizer::PriorityCalculator;
use crate::profile::{AccessibilitySettings, Preferences, ReminderSettings};
use crate::provider::UserDataProvider;
use crate::scheduler::{
    detect_study_pattern, AdaptiveScheduler, Feedback, PatternReport, StudySession,
    DEFAULT_DAYS_TO_SCHEDULE,
};
use crate::sequencer::recommend_sequence;
use crate::storage::Config;

/// Knobs for a planning run
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Session packing target in minutes (default 25)
    pub session_target: u32,
    /// Schedule horizon in days (default 7)
    pub days_to_schedule: u32,
    /// Keys set here replace the provider's values; unset keys keep them
    pub overrides: Config,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            session_target: DEFAULT_TARGET_DURATION,
            days_to_schedule: DEFAULT_DAYS_TO_SCHEDULE,
            overrides: Config::default(),
        }
    }
}

impl PlannerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            session_target: config.study.session_target,
            days_to_schedule: config.study.days_to_schedule,
            overrides: config.clone(),
        }
    }
}

/// Output of one planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub generated_at: DateTime<Utc>,
    /// Preferences the schedule was built with
    pub preferences: Preferences,
    pub reminder_settings: ReminderSettings,
    pub accessibility: AccessibilitySettings,
    pub prioritized: Vec<ContentItem>,
    pub sessions: Vec<Session>,
    pub sequence: Vec<ContentItem>,
    pub mix: Vec<ContentItem>,
    pub schedule: Vec<StudySession>,
    pub pattern: PatternReport,
}

pub struct StudyPlanner<P, C> {
    provider: P,
    clock: C,
    options: PlannerOptions,
    scheduler: AdaptiveScheduler,
}

impl<P: UserDataProvider, C: Clock> StudyPlanner<P, C> {
    pub fn new(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            options: PlannerOptions::default(),
            scheduler: AdaptiveScheduler::new(),
        }
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a full plan.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::DataUnavailable`] if the provider fails.
    pub fn plan(&self) -> Result<StudyPlan> {
        let now = self.clock.now();
        let mut user = self.provider.user_data()?;
        self.options.overrides.apply_to(&mut user);
        let content = self.provider.content()?;

        let prioritized =
            PriorityCalculator::new(now).prioritize(&content, Some(&user.performance));
        let sessions = SessionGrouper::new(self.options.session_target).group(&prioritized);
        let sequence = recommend_sequence(&content);
        let mix = generate_balanced_mix(&content, &user.performance);
        let schedule = self.scheduler.generate_schedule(
            Some(&user),
            &prioritized,
            now,
            self.options.days_to_schedule,
        );
        let pattern = detect_study_pattern(&user.habits);

        info!(
            items = content.len(),
            sessions = sessions.len(),
            scheduled_days = schedule.len(),
            pattern = %pattern.pattern,
            "built study plan"
        );

        Ok(StudyPlan {
            generated_at: now,
            preferences: user.preferences,
            reminder_settings: user.reminder_settings,
            accessibility: user.accessibility,
            prioritized,
            sessions,
            sequence,
            mix,
            schedule,
            pattern,
        })
    }

    /// Revise a plan's schedule from feedback, evaluated at the current time.
    pub fn revise(&self, plan: StudyPlan, feedback: &Feedback) -> StudyPlan {
        let now = self.clock.now();
        let schedule = self.scheduler.adjust_for_feedback(plan.schedule, Some(feedback), now);
        StudyPlan { schedule, ..plan }
    }
}
