//! Adaptive multi-day study scheduler.
//!
//! This module builds a calendar of study sessions from content, habits and
//! preferences:
//! - Picks the daily start hour from the user's best study period
//! - Puts weak-area and harder content first
//! - Sizes the daily load from the user's consistency
//! - Stretches or shortens sessions by difficulty and average score
//! - Revises an existing schedule from performance feedback

mod breaks;
mod pattern;

pub use breaks::{
    calculate_optimal_break_time, validate_break_inputs, DEFAULT_DIFFICULTY, DEFAULT_FATIGUE_LEVEL,
};
pub use pattern::{detect_study_pattern, PatternReport, StudyPattern};

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::content::ContentItem;
use crate::profile::{UserData, DEFAULT_AVERAGE_SCORE};

/// Schedule horizon used when the caller has no preference.
pub const DEFAULT_DAYS_TO_SCHEDULE: u32 = 7;

/// Round with halves going up, matching how scores are rounded everywhere in
/// planning.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Named part of the day a user prefers to study in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl StudyPeriod {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }

    /// Clock window as `(start_hour, end_hour)`
    pub fn window(&self) -> (u32, u32) {
        match self {
            Self::Morning => (9, 11),
            Self::Afternoon => (14, 16),
            Self::Evening => (19, 21),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// One scheduled day of study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Start time; minutes and seconds are always zero
    pub date: DateTime<Utc>,
    pub items: Vec<ContentItem>,
    /// Minutes
    pub duration: u32,
    /// Minutes
    pub break_duration: u32,
    #[serde(default)]
    pub completed: bool,
}

/// Performance signal reported after studying
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub struggled_items: Vec<ContentItem>,
    #[serde(default)]
    pub average_score: Option<f64>,
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Upper bound on items per day (default 3)
    pub max_items_per_day: usize,
    /// Duration change per difficulty point above 3 (default 0.1)
    pub difficulty_factor: f64,
    /// Duration change per score point below the reference (default 0.005)
    pub score_factor: f64,
    /// Struggled items pushed into the next session (default 2)
    pub max_struggled_items: usize,
    /// Minutes added to the next session for struggled items (default 10)
    pub struggle_extension: u32,
    /// Feedback score above which sessions shrink (default 85)
    pub mastery_threshold: f64,
    /// Minutes removed per session on mastery (default 5)
    pub mastery_reduction: u32,
    /// Floor for mastery-shortened sessions (default 15)
    pub min_session_duration: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_items_per_day: 3,
            difficulty_factor: 0.1,
            score_factor: 0.005,
            max_struggled_items: 2,
            struggle_extension: 10,
            mastery_threshold: 85.0,
            mastery_reduction: 5,
            min_session_duration: 15,
        }
    }
}

/// Adaptive scheduler for study sessions
pub struct AdaptiveScheduler {
    config: SchedulerConfig,
}

impl AdaptiveScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Generate a schedule over `days_to_schedule` consecutive days
    ///
    /// # Arguments
    /// * `user_data` - Performance, habits and preferences
    /// * `items` - Content to spread over the schedule
    /// * `start_date` - First day; only its calendar date is used
    /// * `days_to_schedule` - Number of sessions to produce
    ///
    /// # Returns
    /// One session per day, or nothing when user data or content is missing.
    /// Content repeats once every item has been scheduled.
    pub fn generate_schedule(
        &self,
        user_data: Option<&UserData>,
        items: &[ContentItem],
        start_date: DateTime<Utc>,
        days_to_schedule: u32,
    ) -> Vec<StudySession> {
        let Some(user_data) = user_data else {
            return Vec::new();
        };
        if items.is_empty() {
            return Vec::new();
        }

        let base_duration = user_data.preferences.study_duration;
        let base_break = user_data.preferences.break_duration;
        let average_score = user_data.performance.average_score_or_default();

        // 1. Daily start hour from the best study period
        let (start_hour, _) = self.best_study_period(user_data).window();

        // 2. Weak areas first, then hardest first
        let performance = &user_data.performance;
        let mut sorted: Vec<&ContentItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            let weak_a = performance.is_weak(a.subject.as_deref());
            let weak_b = performance.is_weak(b.subject.as_deref());
            weak_b
                .cmp(&weak_a)
                .then_with(|| b.difficulty.cmp(&a.difficulty))
        });

        // 3. Daily load
        let per_day = self.items_per_day(
            sorted.len(),
            days_to_schedule,
            user_data.habits.consistency_or_default(),
        );

        // 4. One session per calendar day
        let start_day = start_date.date_naive();
        let mut schedule = Vec::with_capacity(days_to_schedule as usize);

        for day in 0..days_to_schedule {
            let Some(date) = start_day
                .checked_add_days(Days::new(u64::from(day)))
                .and_then(|d| d.and_hms_opt(start_hour, 0, 0))
                .map(|d| d.and_utc())
            else {
                warn!(day, "schedule date out of range, stopping");
                break;
            };

            let offset = (day as usize * per_day) % sorted.len();
            let day_items: Vec<ContentItem> = (0..per_day)
                .map(|k| sorted[(offset + k) % sorted.len()].clone())
                .collect();

            let duration = self.adjusted_duration(base_duration, &day_items, average_score);

            schedule.push(StudySession {
                date,
                items: day_items,
                duration,
                break_duration: base_break,
                completed: false,
            });
        }

        info!(
            sessions = schedule.len(),
            items_per_day = per_day,
            start_hour,
            "generated study schedule"
        );
        schedule
    }

    /// Revise a schedule from feedback
    ///
    /// Two independent adjustments:
    /// - Struggled items: the first session after `now` gets up to
    ///   `max_struggled_items` of them prepended and `struggle_extension`
    ///   extra minutes.
    /// - Score above `mastery_threshold`: every session after the first
    ///   shrinks by `mastery_reduction`, never below `min_session_duration`.
    pub fn adjust_for_feedback(
        &self,
        mut schedule: Vec<StudySession>,
        feedback: Option<&Feedback>,
        now: DateTime<Utc>,
    ) -> Vec<StudySession> {
        let Some(feedback) = feedback else {
            return schedule;
        };

        if !feedback.struggled_items.is_empty() {
            if let Some(next) = schedule.iter_mut().find(|s| s.date > now) {
                let mut items: Vec<ContentItem> = feedback
                    .struggled_items
                    .iter()
                    .take(self.config.max_struggled_items)
                    .cloned()
                    .collect();
                debug!(
                    added = items.len(),
                    date = %next.date,
                    "queued struggled items for review"
                );
                items.append(&mut next.items);
                next.items = items;
                next.duration = next.duration.saturating_add(self.config.struggle_extension);
            }
        }

        if feedback
            .average_score
            .is_some_and(|score| score > self.config.mastery_threshold)
        {
            for session in schedule.iter_mut().skip(1) {
                session.duration = session
                    .duration
                    .saturating_sub(self.config.mastery_reduction)
                    .max(self.config.min_session_duration);
            }
        }

        info!(sessions = schedule.len(), "adjusted schedule for feedback");
        schedule
    }

    /// Highest-affinity period, evening when no preference is recorded
    fn best_study_period(&self, user_data: &UserData) -> StudyPeriod {
        match user_data.habits.best_study_period() {
            None => StudyPeriod::Evening,
            Some(label) => StudyPeriod::from_label(label).unwrap_or_else(|| {
                warn!(period = label, "unmapped study period, using evening window");
                StudyPeriod::Evening
            }),
        }
    }

    /// `clamp(ceil(count / (days * consistency)), 1, max_items_per_day)`
    pub fn items_per_day(&self, item_count: usize, days: u32, consistency: f64) -> usize {
        let raw = (item_count as f64 / (f64::from(days) * consistency)).ceil();
        if raw.is_nan() {
            return 1;
        }
        raw.clamp(1.0, self.config.max_items_per_day.max(1) as f64) as usize
    }

    /// Base duration scaled by the day's average difficulty and the user's
    /// average score
    fn adjusted_duration(&self, base: u32, items: &[ContentItem], average_score: f64) -> u32 {
        let avg_difficulty = if items.is_empty() {
            3.0
        } else {
            items.iter().map(|i| f64::from(i.difficulty)).sum::<f64>() / items.len() as f64
        };

        let difficulty_scale = 1.0 + (avg_difficulty - 3.0) * self.config.difficulty_factor;
        let score_scale = 1.0 + (DEFAULT_AVERAGE_SCORE - average_score) * self.config.score_factor;

        round_half_up(f64::from(base) * difficulty_scale * score_scale).max(0.0) as u32
    }
}

impl Default for AdaptiveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{UserHabits, UserPerformance};
    use chrono::{Datelike, Duration, TimeZone, Timelike};
    use proptest::prelude::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 29, 7, 45, 12).unwrap()
    }

    fn user(score: Option<f64>, consistency: Option<f64>) -> UserData {
        UserData {
            performance: UserPerformance {
                average_score: score,
                weak_areas: ["calculus".to_string()].into(),
                ..Default::default()
            },
            habits: UserHabits {
                consistency_score: consistency,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn content() -> Vec<ContentItem> {
        vec![
            ContentItem::new("hist", "history", 2),
            ContentItem::new("calc-easy", "calculus", 2),
            ContentItem::new("phys", "physics", 5),
            ContentItem::new("calc-hard", "calculus", 4),
        ]
    }

    fn session(date: DateTime<Utc>, duration: u32) -> StudySession {
        StudySession {
            date,
            items: vec![ContentItem::new("s", "math", 3)],
            duration,
            break_duration: 5,
            completed: false,
        }
    }

    fn schedule_for(data: &UserData, items: &[ContentItem], days: u32) -> Vec<StudySession> {
        AdaptiveScheduler::new().generate_schedule(Some(data), items, start(), days)
    }

    fn adjust(
        schedule: Vec<StudySession>,
        feedback: &Feedback,
        now: DateTime<Utc>,
    ) -> Vec<StudySession> {
        AdaptiveScheduler::new().adjust_for_feedback(schedule, Some(feedback), now)
    }

    fn struggled(ids: &[&str], score: Option<f64>) -> Feedback {
        Feedback {
            struggled_items: ids
                .iter()
                .map(|id| ContentItem::new(*id, "math", 4))
                .collect(),
            average_score: score,
        }
    }

    #[test]
    fn test_missing_inputs_yield_empty_schedule() {
        let scheduler = AdaptiveScheduler::new();
        assert!(scheduler
            .generate_schedule(None, &content(), start(), 7)
            .is_empty());
        assert!(scheduler
            .generate_schedule(Some(&user(None, None)), &[], start(), 7)
            .is_empty());
    }

    #[test]
    fn test_one_session_per_day_at_evening_by_default() {
        let schedule = schedule_for(&user(None, None), &content(), 7);

        assert_eq!(schedule.len(), 7);
        for (day, session) in schedule.iter().enumerate() {
            let expected_day = (start() + Duration::days(day as i64)).date_naive();
            assert_eq!(session.date.hour(), 19);
            assert_eq!(session.date.minute(), 0);
            assert_eq!(session.date.second(), 0);
            assert_eq!(session.date.date_naive(), expected_day);
            assert_eq!(session.break_duration, 5);
            assert!(!session.completed);
        }
    }

    #[test]
    fn test_dates_cross_month_boundary() {
        let schedule = schedule_for(&user(None, None), &content(), 5);
        let days: Vec<_> = schedule
            .iter()
            .map(|s| (s.date.month(), s.date.day()))
            .collect();
        assert_eq!(days, [(1, 29), (1, 30), (1, 31), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_weak_then_hard_ordering_with_wraparound() {
        // 4 items / (7 * 0.5) = 1.14 -> 2 per day
        let schedule = schedule_for(&user(None, None), &content(), 7);

        let ids = |i: usize| -> Vec<&str> {
            schedule[i].items.iter().map(|c| c.id.as_str()).collect()
        };
        assert_eq!(ids(0), ["calc-hard", "calc-easy"]);
        assert_eq!(ids(1), ["phys", "hist"]);
        assert_eq!(ids(2), ["calc-hard", "calc-easy"]);
    }

    #[test]
    fn test_preferred_period_sets_start_hour() {
        let mut data = user(None, None);
        data.habits
            .preferred_study_time
            .insert("morning".into(), 0.8);
        data.habits
            .preferred_study_time
            .insert("evening".into(), 0.4);
        let schedule = schedule_for(&data, &content(), 2);
        assert!(schedule.iter().all(|s| s.date.hour() == 9));

        data.habits
            .preferred_study_time
            .insert("afternoon".into(), 0.95);
        let schedule = schedule_for(&data, &content(), 2);
        assert!(schedule.iter().all(|s| s.date.hour() == 14));
    }

    #[test]
    fn test_unmapped_period_falls_back_to_evening() {
        let mut data = user(None, None);
        data.habits
            .preferred_study_time
            .insert("night".into(), 1.0);
        let schedule = schedule_for(&data, &content(), 1);
        assert_eq!(schedule[0].date.hour(), 19);
    }

    #[test]
    fn test_duration_scales_with_difficulty_and_score() {
        let items = vec![ContentItem::new("a", "art", 5)];

        // 25 * 1.2 * 1.0 = 30
        let schedule = schedule_for(&user(None, None), &items, 1);
        assert_eq!(schedule[0].duration, 30);

        // 25 * 1.2 * (1 + 20 * 0.005) = 33
        let schedule = schedule_for(&user(Some(50.0), None), &items, 1);
        assert_eq!(schedule[0].duration, 33);

        // 25 * 1.2 * (1 - 20 * 0.005) = 27
        let schedule = schedule_for(&user(Some(90.0), None), &items, 1);
        assert_eq!(schedule[0].duration, 27);
    }

    #[test]
    fn test_preferences_override_base_durations() {
        let mut data = user(None, None);
        data.preferences.study_duration = 40;
        data.preferences.break_duration = 10;
        let items = vec![ContentItem::new("a", "art", 3)];
        let schedule = schedule_for(&data, &items, 2);
        assert!(schedule
            .iter()
            .all(|s| s.duration == 40 && s.break_duration == 10));
    }

    #[test]
    fn test_items_per_day_bounds() {
        let scheduler = AdaptiveScheduler::new();
        assert_eq!(scheduler.items_per_day(1, 7, 0.5), 1);
        assert_eq!(scheduler.items_per_day(4, 7, 0.5), 2);
        assert_eq!(scheduler.items_per_day(50, 7, 0.5), 3);
        assert_eq!(scheduler.items_per_day(5, 7, 0.0), 3);
        assert_eq!(scheduler.items_per_day(0, 0, 0.5), 1);
    }

    #[test]
    fn test_custom_config_caps_daily_load() {
        let scheduler = AdaptiveScheduler::with_config(SchedulerConfig {
            max_items_per_day: 1,
            ..Default::default()
        });
        let schedule = scheduler.generate_schedule(Some(&user(None, None)), &content(), start(), 2);
        assert!(schedule.iter().all(|s| s.items.len() == 1));
        assert_eq!(schedule[1].items[0].id, "calc-easy");
    }

    #[test]
    fn test_feedback_absent_is_noop() {
        let now = start();
        let schedule = vec![session(now + Duration::days(1), 25)];
        let adjusted = AdaptiveScheduler::new()
            .adjust_for_feedback(schedule.clone(), None, now);
        assert_eq!(adjusted, schedule);
    }

    #[test]
    fn test_feedback_on_empty_schedule() {
        let feedback = struggled(&["x1"], Some(95.0));
        assert!(adjust(Vec::new(), &feedback, start()).is_empty());
    }

    #[test]
    fn test_struggled_items_go_to_next_future_session() {
        let now = start();
        let schedule = vec![
            session(now - Duration::days(1), 25),
            session(now + Duration::hours(3), 25),
            session(now + Duration::days(1), 25),
        ];
        let feedback = struggled(&["x1", "x2", "x3"], None);

        let adjusted = adjust(schedule, &feedback, now);

        assert_eq!(adjusted[0].duration, 25);
        assert_eq!(adjusted[0].items.len(), 1);
        let ids: Vec<_> = adjusted[1].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["x1", "x2", "s"]);
        assert_eq!(adjusted[1].duration, 35);
        assert_eq!(adjusted[2].duration, 25);
        assert_eq!(adjusted[2].items.len(), 1);
    }

    #[test]
    fn test_struggled_items_without_future_session() {
        let now = start();
        let schedule = vec![session(now, 25)];
        let feedback = struggled(&["x1"], None);
        let adjusted = adjust(schedule.clone(), &feedback, now);
        assert_eq!(adjusted, schedule, "session at exactly now is not in the future");
    }

    #[test]
    fn test_mastery_still_applies_when_no_session_is_upcoming() {
        let now = start();
        let schedule = vec![
            session(now - Duration::days(2), 30),
            session(now - Duration::days(1), 30),
        ];
        let feedback = struggled(&["x1"], Some(90.0));

        let adjusted = adjust(schedule, &feedback, now);
        assert!(adjusted.iter().all(|s| s.items.len() == 1));
        assert_eq!(adjusted[0].duration, 30);
        assert_eq!(adjusted[1].duration, 25);
    }

    #[test]
    fn test_mastery_shrinks_all_but_first_session() {
        let now = start();
        let schedule = vec![
            session(now + Duration::days(1), 30),
            session(now + Duration::days(2), 30),
            session(now + Duration::days(3), 18),
            session(now + Duration::days(4), 12),
        ];
        let feedback = struggled(&[], Some(90.0));

        let adjusted = adjust(schedule, &feedback, now);
        let durations: Vec<_> = adjusted.iter().map(|s| s.duration).collect();
        assert_eq!(durations, [30, 25, 15, 15]);
    }

    #[test]
    fn test_both_adjustments_apply_together() {
        let now = start();
        let schedule = vec![
            session(now - Duration::days(1), 25),
            session(now + Duration::days(1), 25),
        ];
        let feedback = struggled(&["x1"], Some(86.0));

        let adjusted = adjust(schedule, &feedback, now);
        assert_eq!(adjusted[0].duration, 25);
        assert_eq!(adjusted[1].duration, 30, "25 + 10 - 5");
        assert_eq!(adjusted[1].items[0].id, "x1");
    }

    #[test]
    fn test_struggle_extension_saturates() {
        let now = start();
        let schedule = vec![session(now + Duration::days(1), u32::MAX - 3)];
        let adjusted = adjust(schedule, &struggled(&["x1"], None), now);
        assert_eq!(adjusted[0].duration, u32::MAX);
    }

    #[test]
    fn test_score_at_threshold_does_not_shrink() {
        let now = start();
        let schedule = vec![session(now, 30), session(now + Duration::days(1), 30)];
        let adjusted = adjust(schedule.clone(), &struggled(&[], Some(85.0)), now);
        assert_eq!(adjusted, schedule);
    }

    proptest! {
        #[test]
        fn prop_schedule_length_and_daily_load(
            item_count in 1usize..40,
            days in 1u32..30,
            consistency in 0.05f64..1.0,
        ) {
            let items: Vec<_> = (0..item_count)
                .map(|n| ContentItem::new(format!("i{n}"), "math", (n % 5 + 1) as u8))
                .collect();
            let schedule = schedule_for(&user(None, Some(consistency)), &items, days);

            prop_assert_eq!(schedule.len(), days as usize);
            let per_day = schedule[0].items.len();
            prop_assert!((1..=3).contains(&per_day));
            prop_assert!(schedule.iter().all(|s| s.items.len() == per_day));
        }
    }
}
