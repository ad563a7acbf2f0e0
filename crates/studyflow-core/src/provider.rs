//! User data providers.
//!
//! The planning core only needs user data and content to be available at call
//! time. [`MockUserDataProvider`] serves a built-in fixture or a JSON file.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::content::ContentItem;
use crate::error::{CoreError, Result};
use crate::profile::{
    AccessibilitySettings, CompletionRecord, Preferences, ReminderSettings, UserData, UserHabits,
    UserPerformance,
};

/// Source of user data and study content.
pub trait UserDataProvider {
    /// # Errors
    /// Returns [`CoreError::DataUnavailable`] when no data can be produced.
    fn user_data(&self) -> Result<UserData>;

    /// # Errors
    /// Returns [`CoreError::DataUnavailable`] when no content can be produced.
    fn content(&self) -> Result<Vec<ContentItem>>;
}

/// File layout accepted by [`MockUserDataProvider::from_json_path`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub user: UserData,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// In-memory provider backed by a fixture.
#[derive(Debug, Clone)]
pub struct MockUserDataProvider {
    fixture: Fixture,
    fail: bool,
}

impl MockUserDataProvider {
    /// Provider serving the built-in sample learner, dated relative to `now`.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self::from_fixture(sample_fixture(now))
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self {
            fixture,
            fail: false,
        }
    }

    /// Load a fixture from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid fixture JSON.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&raw)?;
        debug!(
            path = %path.display(),
            items = fixture.content.len(),
            "loaded fixture"
        );
        Ok(Self::from_fixture(fixture))
    }

    /// Make every call fail, simulating an unreachable data source.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn check_available(&self) -> Result<()> {
        if self.fail {
            Err(CoreError::DataUnavailable("data source unreachable".into()))
        } else {
            Ok(())
        }
    }
}

impl UserDataProvider for MockUserDataProvider {
    fn user_data(&self) -> Result<UserData> {
        self.check_available()?;
        Ok(self.fixture.user.clone())
    }

    fn content(&self) -> Result<Vec<ContentItem>> {
        self.check_available()?;
        Ok(self.fixture.content.clone())
    }
}

fn sample_fixture(now: DateTime<Utc>) -> Fixture {
    let performance = UserPerformance {
        average_score: Some(72.0),
        completion_rate: Some(0.8),
        weak_areas: ["calculus", "physics"].into_iter().map(String::from).collect(),
        strong_areas: ["history", "literature"].into_iter().map(String::from).collect(),
    };

    let mut preferred_study_time = IndexMap::new();
    preferred_study_time.insert("morning".to_string(), 0.6);
    preferred_study_time.insert("afternoon".to_string(), 0.4);
    preferred_study_time.insert("evening".to_string(), 0.8);

    let completion_history = [(2, 50), (1, 30), (3, 75), (0, 0), (2, 45), (1, 25), (2, 60)]
        .into_iter()
        .enumerate()
        .map(|(i, (sessions, minutes))| CompletionRecord {
            date: now - Duration::days(7 - i as i64),
            sessions_completed: sessions,
            total_duration: minutes,
        })
        .collect();

    let habits = UserHabits {
        preferred_study_time,
        average_session_length: Some(25),
        consistency_score: Some(0.7),
        completion_history,
    };

    let content = vec![
        ContentItem::new("calc-limits", "calculus", 3)
            .with_duration(15)
            .with_last_studied(now - Duration::days(3)),
        ContentItem::new("calc-derivatives", "calculus", 4)
            .with_duration(20)
            .with_due_date(now + Duration::hours(18))
            .with_struggled(true)
            .with_dependency("calc-limits"),
        ContentItem::new("calc-integrals", "calculus", 5)
            .with_duration(25)
            .with_dependency("calc-derivatives"),
        ContentItem::new("phys-kinematics", "physics", 3)
            .with_duration(15)
            .with_due_date(now + Duration::days(2)),
        ContentItem::new("phys-forces", "physics", 4)
            .with_dependency("phys-kinematics"),
        ContentItem::new("chem-bonding", "chemistry", 2)
            .with_duration(10)
            .with_last_studied(now - Duration::days(1)),
        ContentItem::new("chem-reactions", "chemistry", 3)
            .with_due_date(now + Duration::days(5)),
        ContentItem::new("hist-revolutions", "history", 2)
            .with_duration(15)
            .with_last_studied(now - Duration::days(10)),
        ContentItem::new("lit-poetry", "literature", 1)
            .with_duration(5)
            .with_last_studied(now - Duration::days(4)),
        ContentItem::new("bio-cells", "biology", 3).with_duration(15),
        ContentItem::new("bio-genetics", "biology", 4)
            .with_duration(20)
            .with_dependency("bio-cells"),
    ];

    Fixture {
        user: UserData {
            performance,
            habits,
            preferences: Preferences::default(),
            accessibility: AccessibilitySettings::default(),
            reminder_settings: ReminderSettings::default(),
        },
        content,
    }
}
