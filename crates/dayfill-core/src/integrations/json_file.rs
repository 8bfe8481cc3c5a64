//! Task source reading a JSON task file.
//!
//! The file holds the candidate tasks and the commitments already on the
//! calendar:
//!
//! ```json
//! {
//!   "tasks": [
//!     { "name": "Call client", "due": "2026-10-20", "priority": 4, "project": "work" },
//!     { "name": "Write report", "duration": 90 }
//!   ],
//!   "committed": [
//!     { "name": "Dentist", "duration": 45, "due": "2026-10-20T14:00" }
//!   ]
//! }
//! ```
//!
//! Missing durations fall back to the configured default; missing ids are
//! numbered `task-<n>` in file order.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::traits::TaskSource;
use crate::error::SourceError;
use crate::scheduler::DEFAULT_TASK_DURATION;
use crate::task::{Due, Task, DEFAULT_PRIORITY};

#[derive(Debug, Clone, Deserialize)]
struct TaskRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default = "default_priority")]
    priority: u8,
    #[serde(default)]
    duration: Option<i64>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    due: Option<Due>,
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    committed: Vec<TaskRecord>,
}

/// Narrows which candidate tasks a source hands out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks in this project
    pub project: Option<String>,
    /// Only tasks due on or before this date (undated tasks are excluded)
    pub due_by: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project) = &self.project {
            if task.project.as_deref() != Some(project.as_str()) {
                return false;
            }
        }
        if let Some(limit) = self.due_by {
            match task.requested_due {
                Some(due) if due.date() <= limit => {}
                _ => return false,
            }
        }
        true
    }
}

/// Task source backed by a JSON file, read once at construction.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    tasks: Vec<Task>,
    committed: Vec<Task>,
    filter: TaskFilter,
}

impl JsonFileSource {
    /// Load `path` with the built-in default duration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::open_with_default_duration(path, DEFAULT_TASK_DURATION)
    }

    pub fn open_with_default_duration(
        path: impl AsRef<Path>,
        default_duration: i64,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;
        let mut parsed = Self::parse(&content, default_duration)?;
        parsed.path = path;
        Ok(parsed)
    }

    /// Parse a task document held in memory.
    pub fn parse(content: &str, default_duration: i64) -> Result<Self, SourceError> {
        let file: TaskFile =
            serde_json::from_str(content).map_err(|e| SourceError::Parse(e.to_string()))?;

        let to_task = |index: usize, record: TaskRecord, prefix: &str| {
            let mut task = Task::new(record.name, record.duration.unwrap_or(default_duration))
                .with_id(record.id.unwrap_or_else(|| format!("{prefix}-{}", index + 1)))
                .with_priority(record.priority);
            task.project = record.project;
            task.requested_due = record.due;
            task
        };

        Ok(Self {
            path: PathBuf::new(),
            tasks: file
                .tasks
                .into_iter()
                .enumerate()
                .map(|(i, r)| to_task(i, r, "task"))
                .collect(),
            committed: file
                .committed
                .into_iter()
                .enumerate()
                .map(|(i, r)| to_task(i, r, "committed"))
                .collect(),
            filter: TaskFilter::default(),
        })
    }

    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for JsonFileSource {
    fn due_tasks(&self) -> Result<Vec<Task>, SourceError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .cloned()
            .collect())
    }

    /// Commitments without a due date have no day and are never returned.
    fn committed_on(&self, date: NaiveDate) -> Result<Vec<Task>, SourceError> {
        Ok(self
            .committed
            .iter()
            .filter(|t| t.requested_due.map(|d| d.date()) == Some(date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{
        "tasks": [
            { "name": "Call client", "due": "2026-10-20", "priority": 4, "project": "work" },
            { "id": "wr", "name": "Write report", "duration": 90, "project": "work" },
            { "name": "Groceries", "due": "2026-10-25T17:00", "project": "home" }
        ],
        "committed": [
            { "name": "Dentist", "duration": 45, "due": "2026-10-20T14:00" },
            { "name": "Someday" }
        ]
    }"#;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn parse_fills_defaults() {
        let source = JsonFileSource::parse(DOC, 45).unwrap();
        let tasks = source.due_tasks().unwrap();

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "task-1");
        assert_eq!(tasks[0].duration_minutes, 45);
        assert_eq!(tasks[0].priority, 4);
        assert_eq!(tasks[1].id, "wr");
        assert_eq!(tasks[1].priority, 1);
        assert_eq!(tasks[1].requested_due, None);
    }

    #[test]
    fn committed_tasks_are_returned_by_due_date() {
        let source = JsonFileSource::parse(DOC, 60).unwrap();
        let on_20 = source.committed_on(day(20)).unwrap();
        assert_eq!(on_20.len(), 1);
        assert_eq!(on_20[0].name, "Dentist");
        assert!(source.committed_on(day(21)).unwrap().is_empty());
    }

    #[test]
    fn filter_by_project_and_due_date() {
        let source = JsonFileSource::parse(DOC, 60).unwrap().with_filter(TaskFilter {
            project: Some("work".to_string()),
            due_by: Some(day(20)),
        });
        let names: Vec<_> = source.due_tasks().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["Call client"]);
    }

    #[test]
    fn malformed_due_is_a_parse_error() {
        let err = JsonFileSource::parse(r#"{"tasks":[{"name":"x","due":"soon"}]}"#, 60).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn open_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let source = JsonFileSource::open(file.path()).unwrap();
        assert_eq!(source.path(), file.path());
        assert_eq!(source.due_tasks().unwrap()[0].duration_minutes, DEFAULT_TASK_DURATION);

        let err = JsonFileSource::open(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
