//! Content priority calculation module.
//!
//! Scores each item from a baseline of 5 using six additive factors:
//! - Weak-area subject (+3) and strong-area subject (-2), checked independently
//! - Difficulty above 3 (up to +2)
//! - Due-date urgency (up to +3)
//! - Previously struggled (+2)
//! - Never studied (+1)
//!
//! The score maps onto a [`PriorityTier`] and items are ranked by score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ContentItem, PriorityTier};
use crate::profile::UserPerformance;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Point values for each scoring factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Starting score (default 5, the bottom of "medium")
    pub baseline: i32,
    /// Added when the subject is a weak area (default 3)
    pub weak_area_bonus: i32,
    /// Subtracted when the subject is a strong area (default 2)
    pub strong_area_penalty: i32,
    /// Upper bound on the difficulty factor (default 2)
    pub max_difficulty_bonus: i32,
    /// Added when the item was struggled with before (default 2)
    pub struggled_bonus: i32,
    /// Added when the item was never studied (default 1)
    pub unstudied_bonus: i32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            baseline: 5,
            weak_area_bonus: 3,
            strong_area_penalty: 2,
            max_difficulty_bonus: 2,
            struggled_bonus: 2,
            unstudied_bonus: 1,
        }
    }
}

/// Priority calculation configuration
#[derive(Debug, Clone)]
pub struct PriorityConfig {
    /// Point values for each factor
    pub weights: PriorityWeights,
    /// Current time for due-date calculations
    pub current_time: DateTime<Utc>,
}

impl PriorityConfig {
    pub fn at(current_time: DateTime<Utc>) -> Self {
        Self {
            weights: PriorityWeights::default(),
            current_time,
        }
    }
}

/// Priority calculator for content items
pub struct PriorityCalculator {
    config: PriorityConfig,
}

impl PriorityCalculator {
    /// Create a calculator evaluating due dates against `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            config: PriorityConfig::at(now),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// Calculate the integer priority score for one item
    pub fn calculate_score(&self, item: &ContentItem, performance: &UserPerformance) -> i32 {
        let weights = &self.config.weights;
        let subject = item.subject.as_deref();
        let mut score = weights.baseline;

        if performance.is_weak(subject) {
            score += weights.weak_area_bonus;
        }
        if performance.is_strong(subject) {
            score -= weights.strong_area_penalty;
        }

        score += (i32::from(item.difficulty) - 3).clamp(0, weights.max_difficulty_bonus);
        score += self.calculate_urgency(item);

        if item.previously_struggled {
            score += weights.struggled_bonus;
        }
        if item.last_studied.is_none() {
            score += weights.unstudied_bonus;
        }

        score
    }

    /// Due-date urgency factor
    ///
    /// - Due in under 1 day (or overdue): 3
    /// - Under 3 days: 2
    /// - Under 7 days: 1
    /// - Later or no due date: 0
    fn calculate_urgency(&self, item: &ContentItem) -> i32 {
        let Some(due) = item.due_date else {
            return 0;
        };

        let seconds = due
            .signed_duration_since(self.config.current_time)
            .num_seconds() as f64;
        let days_until_due = (seconds / SECONDS_PER_DAY).max(0.0);

        if days_until_due < 1.0 {
            3
        } else if days_until_due < 3.0 {
            2
        } else if days_until_due < 7.0 {
            1
        } else {
            0
        }
    }

    /// Score, tier and rank items, highest score first.
    ///
    /// Returns copies carrying `priority_score` and `priority`. Equal scores
    /// keep their input order. Without performance data nothing is ranked.
    pub fn prioritize(
        &self,
        items: &[ContentItem],
        performance: Option<&UserPerformance>,
    ) -> Vec<ContentItem> {
        let Some(performance) = performance else {
            return Vec::new();
        };

        let mut ranked: Vec<ContentItem> = items
            .iter()
            .map(|item| {
                let score = self.calculate_score(item, performance);
                let mut scored = item.clone();
                scored.priority_score = Some(score);
                scored.priority = Some(PriorityTier::from_score(score));
                scored
            })
            .collect();

        // Vec::sort_by is stable
        ranked.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

        debug!(items = ranked.len(), "prioritized content");
        ranked
    }
}

/// Convenience function to prioritize with default weights
pub fn prioritize(
    items: &[ContentItem],
    performance: Option<&UserPerformance>,
    now: DateTime<Utc>,
) -> Vec<ContentItem> {
    PriorityCalculator::new(now).prioritize(items, performance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn studied(item: ContentItem) -> ContentItem {
        item.with_last_studied(now() - Duration::days(2))
    }

    #[test]
    fn test_all_factors_stack() {
        let item = ContentItem::new("c1", "calculus", 5)
            .with_due_date(now() + Duration::hours(12))
            .with_struggled(true);
        let perf = UserPerformance::default().with_weak_area("calculus");

        let calculator = PriorityCalculator::new(now());
        let score = calculator.calculate_score(&item, &perf);

        assert_eq!(score, 16, "5 + 3 + 2 + 3 + 2 + 1");
        assert_eq!(PriorityTier::from_score(score), PriorityTier::Critical);
    }

    #[test]
    fn test_weak_and_strong_both_apply() {
        let item = studied(ContentItem::new("c1", "physics", 3));
        let perf = UserPerformance::default()
            .with_weak_area("physics")
            .with_strong_area("physics");

        let score = PriorityCalculator::new(now()).calculate_score(&item, &perf);
        assert_eq!(score, 6);
    }

    #[test]
    fn test_difficulty_factor_bounds() {
        let perf = UserPerformance::default();
        let calculator = PriorityCalculator::new(now());

        let easy = studied(ContentItem::new("e", "art", 1));
        let hard = studied(ContentItem::new("h", "art", 4));
        let hardest = studied(ContentItem::new("x", "art", 5));

        assert_eq!(calculator.calculate_score(&easy, &perf), 5);
        assert_eq!(calculator.calculate_score(&hard, &perf), 6);
        assert_eq!(calculator.calculate_score(&hardest, &perf), 7);
    }

    #[test]
    fn test_urgency_bands() {
        let perf = UserPerformance::default();
        let calculator = PriorityCalculator::new(now());
        let due_in = |hours: i64| {
            studied(ContentItem::new("d", "art", 3)).with_due_date(now() + Duration::hours(hours))
        };

        assert_eq!(calculator.calculate_score(&due_in(-30), &perf), 8, "overdue");
        assert_eq!(calculator.calculate_score(&due_in(23), &perf), 8);
        assert_eq!(calculator.calculate_score(&due_in(24), &perf), 7);
        assert_eq!(calculator.calculate_score(&due_in(71), &perf), 7);
        assert_eq!(calculator.calculate_score(&due_in(72), &perf), 6);
        assert_eq!(calculator.calculate_score(&due_in(167), &perf), 6);
        assert_eq!(calculator.calculate_score(&due_in(168), &perf), 5);
    }

    #[test]
    fn test_prioritize_without_performance_is_empty() {
        let items = vec![ContentItem::new("a", "art", 3)];
        assert!(prioritize(&items, None, now()).is_empty());
        assert!(prioritize(&[], Some(&UserPerformance::default()), now()).is_empty());
    }

    #[test]
    fn test_prioritize_sorts_descending_and_stable() {
        let perf = UserPerformance::default().with_weak_area("math");
        let items = vec![
            studied(ContentItem::new("first-medium", "art", 3)),
            studied(ContentItem::new("weak", "math", 3)),
            studied(ContentItem::new("second-medium", "music", 3)),
        ];

        let ranked = prioritize(&items, Some(&perf), now());
        let ids: Vec<_> = ranked.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, ["weak", "first-medium", "second-medium"]);
        assert_eq!(ranked[0].priority, Some(PriorityTier::High));
        assert_eq!(ranked[1].priority_score, Some(5));
        assert_eq!(ranked[1].priority, Some(PriorityTier::Medium));
    }

    #[test]
    fn test_prioritize_does_not_touch_input() {
        let items = vec![ContentItem::new("a", "art", 3)];
        let _ = prioritize(&items, Some(&UserPerformance::default()), now());
        assert!(items[0].priority_score.is_none());
    }

    #[test]
    fn test_prioritize_is_idempotent() {
        let perf = UserPerformance::default()
            .with_weak_area("math")
            .with_strong_area("art");
        let items = vec![
            ContentItem::new("a", "art", 5),
            studied(ContentItem::new("b", "math", 2)),
            ContentItem::new("c", "bio", 4).with_struggled(true),
            studied(ContentItem::new("d", "art", 1)),
        ];

        let once = prioritize(&items, Some(&perf), now());
        let twice = prioritize(&once, Some(&perf), now());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_low_and_optional_tiers() {
        let perf = UserPerformance::default().with_strong_area("art");
        let ranked = prioritize(&[studied(ContentItem::new("a", "art", 2))], Some(&perf), now());
        assert_eq!(ranked[0].priority_score, Some(3));
        assert_eq!(ranked[0].priority, Some(PriorityTier::Low));

        let custom = PriorityCalculator::with_config(PriorityConfig {
            weights: PriorityWeights {
                strong_area_penalty: 4,
                ..Default::default()
            },
            current_time: now(),
        });
        let ranked = custom.prioritize(&[studied(ContentItem::new("a", "art", 2))], Some(&perf));
        assert_eq!(ranked[0].priority, Some(PriorityTier::Optional));
    }
}
