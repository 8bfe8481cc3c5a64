//! In-process source and sink, for embedding and tests.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::traits::{TaskSink, TaskSource};
use crate::error::{SinkError, SourceError};
use crate::task::Task;

/// Task source backed by vectors in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    due: Vec<Task>,
    committed: BTreeMap<NaiveDate, Vec<Task>>,
    unavailable: BTreeSet<NaiveDate>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_due_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.due = tasks;
        self
    }

    pub fn with_committed(mut self, date: NaiveDate, tasks: Vec<Task>) -> Self {
        self.committed.entry(date).or_default().extend(tasks);
        self
    }

    /// Make `committed_on(date)` fail.
    pub fn with_unavailable(mut self, date: NaiveDate) -> Self {
        self.unavailable.insert(date);
        self
    }
}

impl TaskSource for MemorySource {
    fn due_tasks(&self) -> Result<Vec<Task>, SourceError> {
        Ok(self.due.clone())
    }

    fn committed_on(&self, date: NaiveDate) -> Result<Vec<Task>, SourceError> {
        if self.unavailable.contains(&date) {
            return Err(SourceError::Unavailable {
                date,
                message: "marked unavailable".to_string(),
            });
        }
        Ok(self.committed.get(&date).cloned().unwrap_or_default())
    }
}

/// Task sink that keeps everything it receives.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    emitted: Vec<(NaiveDate, Vec<Task>)>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> &[(NaiveDate, Vec<Task>)] {
        &self.emitted
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl TaskSink for MemorySink {
    fn emit(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), SinkError> {
        self.emitted.push((date, tasks.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
