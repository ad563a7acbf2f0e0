//! Content item types shared by every planning component.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes assumed for an item that carries no duration estimate.
pub const DEFAULT_ITEM_DURATION: u32 = 10;

/// Subject used when an item has none.
pub const DEFAULT_SUBJECT: &str = "general";

/// Priority tier derived from a priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
    Optional,
}

impl PriorityTier {
    /// Map a score onto its tier.
    ///
    /// - `>= 10`: critical
    /// - `>= 8`: high
    /// - `>= 5`: medium
    /// - `>= 3`: low
    /// - otherwise: optional
    pub fn from_score(score: i32) -> Self {
        if score >= 10 {
            Self::Critical
        } else if score >= 8 {
            Self::High
        } else if score >= 5 {
            Self::Medium
        } else if score >= 3 {
            Self::Low
        } else {
            Self::Optional
        }
    }

    /// Ordering rank, critical highest.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Optional => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket an item was drawn from by the study-mix generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentCategory {
    WeakArea,
    StrongArea,
    NewContent,
}

impl ContentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeakArea => "weak-area",
            Self::StrongArea => "strong-area",
            Self::NewContent => "new-content",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_difficulty() -> u8 {
    3
}

/// A unit of study material.
///
/// `priority_score`, `priority` and `category` are computed fields. They are
/// filled in on the copies returned by the prioritizer and the mix generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    /// 1-5
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Minutes
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub previously_struggled: bool,
    #[serde(default)]
    pub last_studied: Option<DateTime<Utc>>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ContentCategory>,
}

impl ContentItem {
    /// Create an item with a subject and difficulty; everything else unset.
    pub fn new(id: impl Into<String>, subject: impl Into<String>, difficulty: u8) -> Self {
        Self {
            id: id.into(),
            subject: Some(subject.into()),
            difficulty,
            due_date: None,
            estimated_duration: None,
            previously_struggled: false,
            last_studied: None,
            depends_on: Vec::new(),
            priority_score: None,
            priority: None,
            category: None,
        }
    }

    /// Duration in minutes, falling back to [`DEFAULT_ITEM_DURATION`].
    pub fn duration_minutes(&self) -> u32 {
        self.estimated_duration.unwrap_or(DEFAULT_ITEM_DURATION)
    }

    /// Subject, falling back to [`DEFAULT_SUBJECT`].
    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }

    /// Whether this item lists `other_id` among its direct prerequisites.
    pub fn depends_on_id(&self, other_id: &str) -> bool {
        self.depends_on.iter().any(|d| d == other_id)
    }

    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    pub fn with_struggled(mut self, struggled: bool) -> Self {
        self.previously_struggled = struggled;
        self
    }

    pub fn with_last_studied(mut self, at: DateTime<Utc>) -> Self {
        self.last_studied = Some(at);
        self
    }

    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }
}
