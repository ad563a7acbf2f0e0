//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Study and break lengths used by the scheduler
//! - Schedule horizon and session packing target
//! - Reminder settings for the notification layer
//! - Accessibility flags for the presentation layer
//!
//! Configuration is stored at `~/.config/studyflow/config.toml`.
//!
//! Study lengths, reminders and accessibility mirror fields of [`UserData`].
//! They are overlays: a key left out of the file keeps whatever the data
//! provider supplied, and only keys written to the file replace it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::grouping::DEFAULT_TARGET_DURATION;
use crate::profile::{AccessibilitySettings, Preferences, ReminderSettings, UserData};
use crate::scheduler::DEFAULT_DAYS_TO_SCHEDULE;

/// Study-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_duration: Option<u32>,
    #[serde(default = "default_days_to_schedule")]
    pub days_to_schedule: u32,
    #[serde(default = "default_session_target")]
    pub session_target: u32,
}

/// Reminder configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_timing: Option<bool>,
}

/// Accessibility configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_contrast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_reader: Option<bool>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyflow/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

// Default functions
fn default_days_to_schedule() -> u32 {
    DEFAULT_DAYS_TO_SCHEDULE
}
fn default_session_target() -> u32 {
    DEFAULT_TARGET_DURATION
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            study_duration: None,
            break_duration: None,
            days_to_schedule: default_days_to_schedule(),
            session_target: default_session_target(),
        }
    }
}

fn overlay<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Write `value` at `key` in `root`, typed after the same key in `shape`.
    ///
    /// `shape` holds every key, while `root` only holds keys that are set.
    fn set_json_value_by_path(
        root: &mut Value,
        shape: &Value,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        let mut shape = shape;
        while let Some(part) = parts.next() {
            shape = shape.get(part).ok_or_else(unknown)?;
            let obj = current.as_object_mut().ok_or_else(unknown)?;

            if parts.peek().is_none() {
                let new_value = match shape {
                    Value::Bool(_) => {
                        Value::Bool(value.parse::<bool>().map_err(|e| invalid(e.to_string()))?)
                    }
                    Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        Value::Number(n.into())
                    }
                    Value::Object(_) => return Err(unknown().into()),
                    _ => Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = obj
                .entry(part)
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
        }

        Err(unknown().into())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// This config with every unset overlay key filled from built-in defaults.
    pub fn effective(&self) -> Config {
        let preferences = self.apply_preferences(Preferences::default());
        let reminders = self.apply_reminders(ReminderSettings::default());
        let accessibility = self.apply_accessibility(AccessibilitySettings::default());

        Config {
            study: StudyConfig {
                study_duration: Some(preferences.study_duration),
                break_duration: Some(preferences.break_duration),
                ..self.study.clone()
            },
            reminders: RemindersConfig {
                enabled: Some(reminders.enabled),
                frequency: Some(reminders.frequency),
                smart_timing: Some(reminders.smart_timing),
            },
            accessibility: AccessibilityConfig {
                high_contrast: Some(accessibility.high_contrast),
                reduced_motion: Some(accessibility.reduced_motion),
                large_text: Some(accessibility.large_text),
                screen_reader: Some(accessibility.screen_reader),
            },
        }
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Unset overlay keys report their built-in default.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self.effective()).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let shape = serde_json::to_value(self.effective())?;
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, &shape, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Remove a key in memory, restoring its default or the provider's value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let shape = serde_json::to_value(self.effective())?;
        match Self::get_json_value_by_path(&shape, key) {
            Some(Value::Object(_)) | None => return Err(unknown().into()),
            Some(_) => {}
        }

        let mut json = serde_json::to_value(&*self)?;
        let (section, leaf) = key.rsplit_once('.').ok_or_else(unknown)?;
        if let Some(obj) = json.pointer_mut(&format!("/{}", section.replace('.', "/"))) {
            if let Some(obj) = obj.as_object_mut() {
                obj.remove(leaf);
            }
        }
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// `base` with the configured study and break lengths applied.
    pub fn apply_preferences(&self, mut base: Preferences) -> Preferences {
        overlay(&mut base.study_duration, &self.study.study_duration);
        overlay(&mut base.break_duration, &self.study.break_duration);
        base
    }

    /// `base` with the configured reminder keys applied.
    pub fn apply_reminders(&self, mut base: ReminderSettings) -> ReminderSettings {
        overlay(&mut base.enabled, &self.reminders.enabled);
        overlay(&mut base.frequency, &self.reminders.frequency);
        overlay(&mut base.smart_timing, &self.reminders.smart_timing);
        base
    }

    /// `base` with the configured accessibility flags applied.
    pub fn apply_accessibility(&self, mut base: AccessibilitySettings) -> AccessibilitySettings {
        let flags = &self.accessibility;
        overlay(&mut base.high_contrast, &flags.high_contrast);
        overlay(&mut base.reduced_motion, &flags.reduced_motion);
        overlay(&mut base.large_text, &flags.large_text);
        overlay(&mut base.screen_reader, &flags.screen_reader);
        base
    }

    /// Overlay every configured key onto provider data.
    pub fn apply_to(&self, user: &mut UserData) {
        user.preferences = self.apply_preferences(std::mem::take(&mut user.preferences));
        user.reminder_settings = self.apply_reminders(std::mem::take(&mut user.reminder_settings));
        user.accessibility = self.apply_accessibility(std::mem::take(&mut user.accessibility));
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(!toml_str.contains("study_duration"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.study.days_to_schedule, 7);
        assert_eq!(parsed.study.session_target, 25);
    }

    #[test]
    fn partial_file_sets_only_listed_keys() {
        let parsed: Config = toml::from_str("[study]\nstudy_duration = 40\n").unwrap();
        assert_eq!(parsed.study.study_duration, Some(40));
        assert_eq!(parsed.study.break_duration, None);
        assert_eq!(parsed.study.days_to_schedule, 7);
        assert_eq!(parsed.reminders, RemindersConfig::default());
        assert_eq!(parsed.accessibility.high_contrast, None);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("study.break_duration").as_deref(), Some("5"));
        assert_eq!(cfg.get("study.days_to_schedule").as_deref(), Some("7"));
        assert_eq!(cfg.get("reminders.smart_timing").as_deref(), Some("true"));
        assert_eq!(cfg.get("reminders.frequency").as_deref(), Some("daily"));
        assert_eq!(cfg.get("accessibility.large_text").as_deref(), Some("false"));
        assert!(cfg.get("study.missing_key").is_none());
        assert!(cfg.get("study").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("study.study_duration", "45").unwrap();
        cfg.set("accessibility.large_text", "true").unwrap();
        cfg.set("reminders.frequency", "weekly").unwrap();

        assert_eq!(cfg.study.study_duration, Some(45));
        assert_eq!(cfg.study.break_duration, None);
        assert_eq!(cfg.accessibility.large_text, Some(true));
        assert_eq!(cfg.accessibility.high_contrast, None);
        assert_eq!(cfg.reminders.frequency.as_deref(), Some("weekly"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("study.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));

        let err = cfg.set("study", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        let err = cfg.set("reminders.enabled", "not_a_bool").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));

        let err = cfg.set("study.break_duration", "-3").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unset_restores_default() {
        let mut cfg = Config::default();
        cfg.set("study.break_duration", "9").unwrap();
        cfg.set("study.session_target", "40").unwrap();

        cfg.unset("study.break_duration").unwrap();
        cfg.unset("study.session_target").unwrap();
        assert_eq!(cfg, Config::default());

        let err = cfg.unset("study.nope").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn overlay_keeps_provider_values_for_unset_keys() {
        let mut cfg = Config::default();
        cfg.set("study.break_duration", "7").unwrap();
        cfg.set("reminders.enabled", "false").unwrap();

        let mut user = UserData::default();
        user.preferences.study_duration = 40;
        user.preferences.break_duration = 10;
        user.reminder_settings.frequency = "weekly".into();
        user.accessibility.screen_reader = true;
        cfg.apply_to(&mut user);

        assert_eq!(user.preferences.study_duration, 40);
        assert_eq!(user.preferences.break_duration, 7);
        assert!(!user.reminder_settings.enabled);
        assert_eq!(user.reminder_settings.frequency, "weekly");
        assert!(user.accessibility.screen_reader);
    }

    #[test]
    fn default_config_is_a_no_op_overlay() {
        let mut user = UserData::default();
        user.preferences.study_duration = 50;
        let before = user.clone();
        Config::default().apply_to(&mut user);
        assert_eq!(user, before);
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("study.days_to_schedule", "14").unwrap();
        cfg.set("reminders.smart_timing", "false").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.study.days_to_schedule, 14);
        assert_eq!(loaded.study.study_duration, None);
    }

    #[test]
    fn load_from_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "study = [not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }
}
