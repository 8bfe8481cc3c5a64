//! Day-filling scheduler.
//!
//! This module places tasks onto a multi-day calendar:
//! - Sorts candidates by the configured ordering (due date by default)
//! - Walks days forward from the start day, seeding each day with the
//!   commitments the task source already knows about
//! - Places each task in the earliest gap that leaves breathing room,
//!   spilling to the next day once a day's capacity is used up
//! - Stops with an error instead of walking past the look-ahead horizon

mod filler;

pub use filler::{DayFiller, Placement};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::integrations::{TaskSink, TaskSource};
use crate::task::{Task, TaskOrdering};
use crate::timeline::{Calendar, DayLedger, SlotFinder, WorkdayWindow};

/// Duration given to tasks whose source does not say how long they take.
pub const DEFAULT_TASK_DURATION: i64 = 60;

/// What happens when a day passes the capacity check but has no gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Append after the last commitment, even past the end of the workday.
    #[default]
    Advisory,
    /// Move on to the next day.
    Strict,
}

impl CapacityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for CapacityPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(Self::Advisory),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown capacity policy '{other}' (expected advisory or strict)")),
        }
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Workday start and length
    pub window: WorkdayWindow,
    /// Mandatory gap between consecutive tasks (minutes)
    pub breathing_room: i64,
    /// Order in which tasks are considered
    pub ordering: TaskOrdering,
    pub capacity_policy: CapacityPolicy,
    /// Days past the start day the scheduler may use
    pub max_horizon_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window: WorkdayWindow::default(),
            breathing_room: 30,
            ordering: TaskOrdering::DueDate,
            capacity_policy: CapacityPolicy::Advisory,
            max_horizon_days: 365,
        }
    }
}

/// Places tasks day by day.
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Reject tasks the scheduler cannot place.
    pub fn validate(tasks: &[Task]) -> Result<(), ScheduleError> {
        match tasks.iter().find(|t| !t.has_valid_duration()) {
            Some(task) => Err(ScheduleError::InvalidTaskDuration {
                task: task.name.clone(),
                minutes: task.duration_minutes,
            }),
            None => Ok(()),
        }
    }

    /// Place every task on or after `start_day`.
    ///
    /// # Arguments
    /// * `tasks` - Candidate tasks, in any order
    /// * `source` - Supplies the commitments already on each day
    /// * `start_day` - First day that may receive tasks
    ///
    /// # Returns
    /// The calendar of every day holding a commitment, including the
    /// pre-existing ones seen along the way.
    ///
    /// # Errors
    /// `InvalidTaskDuration` before anything is placed, or
    /// `HorizonExhausted` when a task cannot be placed within
    /// `max_horizon_days`.
    pub fn schedule(
        &self,
        mut tasks: Vec<Task>,
        source: &dyn TaskSource,
        start_day: NaiveDate,
    ) -> Result<Calendar, ScheduleError> {
        Self::validate(&tasks)?;
        self.config.ordering.sort(&mut tasks);

        let breathing_room = self.config.breathing_room;
        let finder = SlotFinder::new(self.config.window, breathing_room);
        let filler = DayFiller::new(finder, breathing_room, self.config.capacity_policy);

        let mut calendar = Calendar::new();
        let mut current_day = start_day;
        let total = tasks.len();

        for mut task in tasks {
            loop {
                if (current_day - start_day).num_days() >= i64::from(self.config.max_horizon_days) {
                    return Err(self.horizon_exhausted(&task, start_day));
                }

                let ledger = calendar
                    .ledger_or_insert_with(current_day, || self.materialize(source, current_day));

                if ledger.can_accommodate(task.duration_minutes.saturating_add(breathing_room)) {
                    match filler.place(task, ledger) {
                        Placement::Declined(declined) => task = declined,
                        Placement::Slot(_) | Placement::Appended(_) => break,
                    }
                } else {
                    tracing::debug!(
                        task = %task.name,
                        date = %current_day,
                        remaining = ledger.remaining_minutes(),
                        "day is full, moving to next day"
                    );
                }

                current_day = match current_day.succ_opt() {
                    Some(next) => next,
                    None => return Err(self.horizon_exhausted(&task, start_day)),
                };
            }
        }

        calendar.prune_empty();
        tracing::info!(
            tasks = total,
            days = calendar.len(),
            start = %start_day,
            "schedule complete"
        );
        Ok(calendar)
    }

    /// Pull candidates from `source`, schedule them and hand the result to `sink`.
    pub fn run(
        &self,
        source: &dyn TaskSource,
        sink: &mut dyn TaskSink,
        start_day: NaiveDate,
    ) -> Result<Calendar> {
        let tasks = source.due_tasks()?;
        let calendar = self.schedule(tasks, source, start_day)?;
        calendar.emit(sink)?;
        Ok(calendar)
    }

    /// Build a ledger for `date` from whatever the source already has there.
    /// A workday that runs past midnight also sees the next date's timed
    /// commitments that fall inside it. A failing source counts as an empty day.
    fn materialize(&self, source: &dyn TaskSource, date: NaiveDate) -> DayLedger {
        let window = &self.config.window;
        let mut existing = committed_or_empty(source, date);

        let day_end = window.end_on(date);
        if day_end.date() > date {
            if let Some(next) = date.succ_opt() {
                existing.extend(committed_or_empty(source, next).into_iter().filter(|task| {
                    task.requested_due
                        .is_some_and(|due| due.time().is_some() && due.sort_instant() < day_end)
                }));
            }
        }

        let ledger = DayLedger::seeded(date, existing, window, self.config.breathing_room);
        tracing::debug!(
            %date,
            existing = ledger.committed().len(),
            busy = ledger.busy_minutes(),
            remaining = ledger.remaining_minutes(),
            "materialized day"
        );
        ledger
    }

    fn horizon_exhausted(&self, task: &Task, start_day: NaiveDate) -> ScheduleError {
        ScheduleError::HorizonExhausted {
            task: task.name.clone(),
            start_day,
            horizon_days: self.config.max_horizon_days,
        }
    }
}

fn committed_or_empty(source: &dyn TaskSource, date: NaiveDate) -> Vec<Task> {
    source.committed_on(date).unwrap_or_else(|err| {
        tracing::warn!(%date, error = %err, "task source unavailable, assuming no commitments");
        Vec::new()
    })
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
