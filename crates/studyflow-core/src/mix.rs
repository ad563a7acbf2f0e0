//! Balanced study-mix selection across weak, strong and new content.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ContentCategory, ContentItem};
use crate::profile::UserPerformance;

/// Upper bound on the number of items in one mix.
pub const MAX_MIX_ITEMS: usize = 10;

/// Share of the mix per category, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRatio {
    pub weak: u32,
    pub strong: u32,
    pub new: u32,
}

impl MixRatio {
    /// Ratio for a given average score.
    ///
    /// - below 60: 70/15/15, leaning on weak areas
    /// - above 85: 40/20/40, leaning on new material
    /// - otherwise: 60/20/20
    pub fn for_score(average_score: Option<f64>) -> Self {
        match average_score {
            Some(score) if score < 60.0 => Self {
                weak: 70,
                strong: 15,
                new: 15,
            },
            Some(score) if score > 85.0 => Self {
                weak: 40,
                strong: 20,
                new: 40,
            },
            _ => Self {
                weak: 60,
                strong: 20,
                new: 20,
            },
        }
    }
}

/// `round(total * percent / 100)`, halves rounding up.
fn share_of(total: usize, percent: u32) -> usize {
    (total * percent as usize + 50) / 100
}

fn tagged(items: &[&ContentItem], take: usize, category: ContentCategory) -> Vec<ContentItem> {
    items
        .iter()
        .take(take)
        .map(|item| {
            let mut item = (*item).clone();
            item.category = Some(category);
            item
        })
        .collect()
}

/// Select at most [`MAX_MIX_ITEMS`] items weighted by category.
///
/// Selection takes each bucket from the front. When the weak or strong bucket
/// runs short, the missing count moves to new content. The result can be
/// shorter than the target if new content also runs short.
pub fn generate_balanced_mix(
    items: &[ContentItem],
    performance: &UserPerformance,
) -> Vec<ContentItem> {
    let ratio = MixRatio::for_score(performance.average_score);

    let mut weak = Vec::new();
    let mut strong = Vec::new();
    let mut fresh = Vec::new();
    for item in items {
        let subject = item.subject.as_deref();
        if performance.is_weak(subject) {
            weak.push(item);
        } else if performance.is_strong(subject) {
            strong.push(item);
        } else {
            fresh.push(item);
        }
    }

    let total = items.len().min(MAX_MIX_ITEMS);
    let weak_target = share_of(total, ratio.weak);
    let strong_target = share_of(total, ratio.strong);
    let mut new_target = share_of(total, ratio.new);

    new_target += weak_target.saturating_sub(weak.len());
    new_target += strong_target.saturating_sub(strong.len());

    let mut mix = tagged(&weak, weak_target, ContentCategory::WeakArea);
    mix.extend(tagged(&strong, strong_target, ContentCategory::StrongArea));
    mix.extend(tagged(&fresh, new_target, ContentCategory::NewContent));

    debug!(
        available = items.len(),
        selected = mix.len(),
        weak_target,
        strong_target,
        new_target,
        "generated balanced mix"
    );
    mix
}
