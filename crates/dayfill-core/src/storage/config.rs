//! TOML-based application configuration.
//!
//! Stores the scheduling knobs:
//! - Workday window (start time, length) and breathing room
//! - Default task duration for sources that omit one
//! - Task ordering, capacity policy and look-ahead horizon
//!
//! Configuration is stored at `~/.config/dayfill/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::scheduler::{CapacityPolicy, SchedulerConfig, DEFAULT_TASK_DURATION};
use crate::task::TaskOrdering;
use crate::timeline::WorkdayWindow;

/// Workday window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkdayConfig {
    /// Local start time, `HH:MM`
    #[serde(default = "default_workday_start")]
    pub start: String,
    #[serde(default = "default_workday_minutes")]
    pub minutes: u32,
    #[serde(default = "default_breathing_room")]
    pub breathing_room: u32,
}

/// Task defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default = "default_task_duration")]
    pub default_duration: u32,
}

/// Scheduler behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    #[serde(default)]
    pub ordering: TaskOrdering,
    #[serde(default)]
    pub capacity_policy: CapacityPolicy,
    #[serde(default = "default_max_horizon_days")]
    pub max_horizon_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayfill/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workday: WorkdayConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub scheduler: SchedulingConfig,
}

// Default functions
fn default_workday_start() -> String {
    "09:00".into()
}
fn default_workday_minutes() -> u32 {
    720
}
fn default_breathing_room() -> u32 {
    30
}
fn default_task_duration() -> u32 {
    DEFAULT_TASK_DURATION as u32
}
fn default_max_horizon_days() -> u32 {
    365
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start: default_workday_start(),
            minutes: default_workday_minutes(),
            breathing_room: default_breathing_room(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_duration: default_task_duration(),
        }
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            ordering: TaskOrdering::default(),
            capacity_policy: CapacityPolicy::default(),
            max_horizon_days: default_max_horizon_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location, `<data_dir>/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dayfill"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from `path`, or return defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// The result must still deserialize and pass [`scheduler_config`](Self::scheduler_config)
    /// validation; otherwise `self` is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.scheduler_config()?;
        *self = updated;
        Ok(())
    }

    /// Validated scheduler settings.
    pub fn scheduler_config(&self) -> Result<SchedulerConfig, ConfigError> {
        let start = NaiveTime::parse_from_str(self.workday.start.trim(), "%H:%M").map_err(|_| {
            ConfigError::InvalidValue {
                key: "workday.start".to_string(),
                message: format!("'{}' is not a HH:MM time", self.workday.start),
            }
        })?;
        if self.workday.minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "workday.minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.tasks.default_duration == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tasks.default_duration".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.scheduler.max_horizon_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scheduler.max_horizon_days".to_string(),
                message: "must be positive".to_string(),
            });
        }

        Ok(SchedulerConfig {
            window: WorkdayWindow::new(start, i64::from(self.workday.minutes)),
            breathing_room: i64::from(self.workday.breathing_room),
            ordering: self.scheduler.ordering,
            capacity_policy: self.scheduler.capacity_policy,
            max_horizon_days: self.scheduler.max_horizon_days,
        })
    }

    pub fn default_task_duration(&self) -> i64 {
        i64::from(self.tasks.default_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.workday.minutes, 720);
        assert_eq!(parsed.scheduler.ordering, TaskOrdering::DueDate);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let parsed: Config = toml::from_str("[workday]\nbreathing_room = 15\n").unwrap();
        assert_eq!(parsed.workday.breathing_room, 15);
        assert_eq!(parsed.workday.start, "09:00");
        assert_eq!(parsed.tasks.default_duration, 60);
        assert_eq!(parsed.scheduler.max_horizon_days, 365);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("workday.start").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("workday.minutes").as_deref(), Some("720"));
        assert_eq!(cfg.get("scheduler.capacity_policy").as_deref(), Some("advisory"));
        assert!(cfg.get("workday.missing_key").is_none());
    }

    #[test]
    fn set_updates_numbers_and_enums() {
        let mut cfg = Config::default();
        cfg.set("workday.breathing_room", "10").unwrap();
        cfg.set("scheduler.ordering", "priority").unwrap();
        assert_eq!(cfg.workday.breathing_room, 10);
        assert_eq!(cfg.scheduler.ordering, TaskOrdering::Priority);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.set("workday.lunch", "12:00"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("workday", "x"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.set("workday.minutes", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("scheduler.capacity_policy", "whatever"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("workday.start", "9 o'clock"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.workday.start, "09:00");
    }

    #[test]
    fn scheduler_config_converts_units() {
        let mut cfg = Config::default();
        cfg.workday.start = "08:30".to_string();
        cfg.scheduler.capacity_policy = CapacityPolicy::Strict;

        let sc = cfg.scheduler_config().unwrap();
        assert_eq!(sc.window.start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(sc.window.minutes, 720);
        assert_eq!(sc.breathing_room, 30);
        assert_eq!(sc.capacity_policy, CapacityPolicy::Strict);
    }

    #[test]
    fn zero_workday_is_rejected() {
        let mut cfg = Config::default();
        cfg.workday.minutes = 0;
        assert!(cfg.scheduler_config().is_err());
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap().workday.minutes, 720);

        let mut cfg = Config::default();
        cfg.workday.minutes = 480;
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().workday.minutes, 480);

        std::fs::write(&path, "workday = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }
}
