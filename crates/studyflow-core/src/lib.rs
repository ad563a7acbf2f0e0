//! # Studyflow Core Library
//!
//! This library provides the planning heuristics behind the Studyflow adaptive
//! learning app. Everything here is a pure function of in-memory data plus an
//! injected clock; the `studyflow` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Prioritizer**: Scores and ranks content from user performance
//! - **Session Grouper**: Packs ranked content into bounded sessions
//! - **Sequencer**: Dependency-aware, subject-interleaved ordering
//! - **Study Mix**: Weighted sample across weak, strong and new content
//! - **Scheduler**: Multi-day calendar with feedback-driven revision
//!
//! ## Key Components
//!
//! - [`PriorityCalculator`]: Six-factor priority scoring
//! - [`SessionGrouper`]: Session packing
//! - [`AdaptiveScheduler`]: Schedule generation and adjustment
//! - [`StudyPlanner`]: Runs the whole pipeline against a [`UserDataProvider`]
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod content;
pub mod error;
pub mod grouping;
pub mod mix;
pub mod planner;
pub mod prioritizer;
pub mod profile;
pub mod provider;
pub mod scheduler;
pub mod sequencer;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{ContentCategory, ContentItem, PriorityTier};
pub use error::{ConfigError, CoreError, ValidationError};
pub use grouping::{group_into_sessions, Session, SessionGrouper};
pub use mix::{generate_balanced_mix, MixRatio};
pub use planner::{PlannerOptions, StudyPlan, StudyPlanner};
pub use prioritizer::{prioritize, PriorityCalculator, PriorityConfig, PriorityWeights};
pub use profile::{
    AccessibilitySettings, CompletionRecord, Preferences, ReminderSettings, UserData, UserHabits,
    UserPerformance,
};
pub use provider::{Fixture, MockUserDataProvider, UserDataProvider};
pub use scheduler::{
    calculate_optimal_break_time, detect_study_pattern, AdaptiveScheduler, Feedback,
    PatternReport, SchedulerConfig, StudyPattern, StudyPeriod, StudySession,
};
pub use sequencer::recommend_sequence;
pub use storage::Config;
