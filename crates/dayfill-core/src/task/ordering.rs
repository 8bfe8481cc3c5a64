//! Processing order of candidate tasks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Task;

/// Order in which the scheduler considers tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrdering {
    /// Earliest due date first, undated tasks last, shorter tasks first on ties.
    #[default]
    DueDate,
    /// Highest priority first, then by due date.
    Priority,
}

impl TaskOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
            Self::Priority => "priority",
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => by_due_date(a, b),
            Self::Priority => b.priority.cmp(&a.priority).then_with(|| by_due_date(a, b)),
        }
    }

    /// Stable sort, so input order breaks remaining ties.
    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

fn by_due_date(a: &Task, b: &Task) -> Ordering {
    let due_a = a.requested_due.map(|d| d.sort_instant());
    let due_b = b.requested_due.map(|d| d.sort_instant());

    let due = match (due_a, due_b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    due.then_with(|| a.duration_minutes.cmp(&b.duration_minutes))
}

impl FromStr for TaskOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "due_date" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(format!("unknown ordering '{other}' (expected due_date or priority)")),
        }
    }
}

impl fmt::Display for TaskOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
