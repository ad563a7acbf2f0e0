//! Cross-subject study ordering.
//!
//! Items are grouped by subject, ordered inside each subject by direct
//! prerequisites and then difficulty, and finally interleaved round-robin so
//! consecutive items come from different subjects.

use indexmap::IndexMap;
use std::cmp::Ordering;
use tracing::debug;

use crate::content::ContentItem;

/// Pairwise order inside a subject.
///
/// Only direct `depends_on` links are seen; chains through a third item are
/// not followed.
fn compare_within_subject(a: &ContentItem, b: &ContentItem) -> Ordering {
    if a.depends_on_id(&b.id) {
        Ordering::Greater
    } else if b.depends_on_id(&a.id) {
        Ordering::Less
    } else {
        a.difficulty.cmp(&b.difficulty)
    }
}

/// Stable insertion sort.
///
/// The comparator above is not a total order once dependencies cross
/// difficulty, which `slice::sort_by` is allowed to reject. Insertion sort
/// only ever compares neighbours and never panics.
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Recommend a study order across subjects.
pub fn recommend_sequence(items: &[ContentItem]) -> Vec<ContentItem> {
    let mut by_subject: IndexMap<&str, Vec<ContentItem>> = IndexMap::new();
    for item in items {
        by_subject
            .entry(item.subject_or_default())
            .or_default()
            .push(item.clone());
    }

    for group in by_subject.values_mut() {
        insertion_sort_by(group, compare_within_subject);
    }

    let longest = by_subject.values().map(Vec::len).max().unwrap_or(0);
    let mut sequence = Vec::with_capacity(items.len());
    for index in 0..longest {
        for group in by_subject.values() {
            if let Some(item) = group.get(index) {
                sequence.push(item.clone());
            }
        }
    }

    debug!(
        items = sequence.len(),
        subjects = by_subject.len(),
        "sequenced content"
    );
    sequence
}
