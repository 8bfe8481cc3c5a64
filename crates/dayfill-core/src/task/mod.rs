//! Task types: the unit of work handed to the scheduler.
//!
//! A task carries what the source asked for (`requested_due`) and, once the
//! scheduler has placed it, where it landed (`assigned_start`). The two are
//! kept apart so that a placement can always be checked against its deadline.

mod ordering;

pub use ordering::TaskOrdering;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Longest task the scheduler accepts (one week, in minutes).
pub const MAX_TASK_DURATION: i64 = 7 * 24 * 60;

/// Priority given to tasks whose source does not set one.
pub const DEFAULT_PRIORITY: u8 = 1;

/// Due date of a task, either a whole day or a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Due {
    /// Due some time on this day (no time of day given).
    On(NaiveDate),
    /// Due at this exact local time.
    At(NaiveDateTime),
}

impl Due {
    /// Calendar date of the due date.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::On(date) => *date,
            Self::At(at) => at.date(),
        }
    }

    /// Instant used for ordering. A date-only due sorts at the start of its day.
    pub fn sort_instant(&self) -> NaiveDateTime {
        match self {
            Self::On(date) => date.and_time(NaiveTime::MIN),
            Self::At(at) => *at,
        }
    }

    /// Latest start that still meets the due date.
    /// A date-only due is met by anything starting on that day.
    pub fn deadline(&self) -> NaiveDateTime {
        match self {
            Self::On(date) => date.and_time(NaiveTime::MIN) + Duration::days(1),
            Self::At(at) => *at,
        }
    }

    /// Time of day, if one was given.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::On(_) => None,
            Self::At(at) => Some(at.time()),
        }
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

impl FromStr for Due {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for format in DATETIME_FORMATS {
            if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::At(at));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::On)
            .map_err(|_| format!("invalid due date '{s}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM)"))
    }
}

impl fmt::Display for Due {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::At(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl Serialize for Due {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Due {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl From<NaiveDate> for Due {
    fn from(date: NaiveDate) -> Self {
        Self::On(date)
    }
}

impl From<NaiveDateTime> for Due {
    fn from(at: NaiveDateTime) -> Self {
        Self::At(at)
    }
}

/// A unit of work to be placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Higher is more urgent. Only consulted by [`TaskOrdering::Priority`].
    #[serde(default = "default_priority")]
    pub priority: u8,
    pub duration_minutes: i64,
    #[serde(default)]
    pub project: Option<String>,
    /// Due date as requested by the source. Never overwritten.
    #[serde(default)]
    pub requested_due: Option<Due>,
    /// Start time chosen by the scheduler.
    #[serde(default)]
    pub assigned_start: Option<NaiveDateTime>,
}

impl Task {
    /// Create a task; its id defaults to its name.
    pub fn new(name: impl Into<String>, duration_minutes: i64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            priority: DEFAULT_PRIORITY,
            duration_minutes,
            project: None,
            requested_due: None,
            assigned_start: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, due: impl Into<Due>) -> Self {
        self.requested_due = Some(due.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Whether the duration lies in `1..=MAX_TASK_DURATION`.
    pub fn has_valid_duration(&self) -> bool {
        (1..=MAX_TASK_DURATION).contains(&self.duration_minutes)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// End of the assigned slot, if placed.
    pub fn assigned_end(&self) -> Option<NaiveDateTime> {
        self.assigned_start.map(|start| start + self.duration())
    }

    pub fn is_placed(&self) -> bool {
        self.assigned_start.is_some()
    }

    /// Whether the assigned start misses the requested due date.
    pub fn is_late(&self) -> bool {
        match (self.assigned_start, self.requested_due) {
            (Some(start), Some(due)) => start > due.deadline(),
            _ => false,
        }
    }
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}
