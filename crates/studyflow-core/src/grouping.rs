//! Packing of a prioritized item sequence into bounded study sessions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ContentItem, PriorityTier};

/// Default session length target in minutes.
pub const DEFAULT_TARGET_DURATION: u32 = 25;

/// A block of consecutive items studied in one sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub items: Vec<ContentItem>,
    /// Sum of item durations in minutes
    pub estimated_duration: u32,
    pub priority: PriorityTier,
}

impl Session {
    fn from_items(items: Vec<ContentItem>, estimated_duration: u32) -> Self {
        let priority = highest_priority(&items);
        Self {
            items,
            estimated_duration,
            priority,
        }
    }
}

/// Tier of the highest-ranked item. Items without a tier rank as optional;
/// a session where no item carries a tier is `Low`.
fn highest_priority(items: &[ContentItem]) -> PriorityTier {
    items
        .iter()
        .filter_map(|item| item.priority)
        .max_by_key(|tier| tier.rank())
        .unwrap_or(PriorityTier::Low)
}

/// Groups items into sessions of roughly `target_duration` minutes.
#[derive(Debug, Clone)]
pub struct SessionGrouper {
    target_duration: u32,
}

impl SessionGrouper {
    pub fn new(target_duration: u32) -> Self {
        Self { target_duration }
    }

    /// Walk the items in order, closing the current session whenever the next
    /// item would push it past the target. A session always takes at least
    /// one item, so an item longer than the target sits alone.
    ///
    /// A session's running total never exceeds the target once it holds two
    /// items, so only the lookahead sum needs widening.
    pub fn group(&self, items: &[ContentItem]) -> Vec<Session> {
        let mut sessions = Vec::new();
        let mut current: Vec<ContentItem> = Vec::new();
        let mut current_duration = 0u32;

        for item in items {
            let duration = item.duration_minutes();

            let projected = u64::from(current_duration) + u64::from(duration);
            if !current.is_empty() && projected > u64::from(self.target_duration) {
                sessions.push(Session::from_items(
                    std::mem::take(&mut current),
                    current_duration,
                ));
                current_duration = 0;
            }

            current.push(item.clone());
            current_duration = current_duration.saturating_add(duration);
        }

        if !current.is_empty() {
            sessions.push(Session::from_items(current, current_duration));
        }

        debug!(
            items = items.len(),
            sessions = sessions.len(),
            target = self.target_duration,
            "grouped items into sessions"
        );
        sessions
    }
}

impl Default for SessionGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_DURATION)
    }
}

/// Convenience function to group with an explicit target
pub fn group_into_sessions(items: &[ContentItem], target_duration: u32) -> Vec<Session> {
    SessionGrouper::new(target_duration).group(items)
}
