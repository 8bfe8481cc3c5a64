//! Per-day state: commitments, remaining capacity, end-of-day cursor.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::slot::SlotFinder;
use super::window::WorkdayWindow;
use crate::task::Task;

/// Where a commitment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentOrigin {
    /// Already on the calendar before the run started.
    Existing,
    /// Placed by this run.
    Placed,
}

/// A task occupying a concrete slot on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub task: Task,
    pub start: NaiveDateTime,
    pub origin: CommitmentOrigin,
}

impl Commitment {
    pub fn new(task: Task, start: NaiveDateTime, origin: CommitmentOrigin) -> Self {
        Self { task, start, origin }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start
            .checked_add_signed(self.task.duration())
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.task.duration_minutes
    }

    pub fn is_placed(&self) -> bool {
        self.origin == CommitmentOrigin::Placed
    }
}

/// State of one calendar day during a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLedger {
    date: NaiveDate,
    /// Sorted by start time
    committed: Vec<Commitment>,
    /// Advisory; negative once existing commitments overrun the workday.
    remaining_minutes: i64,
    day_end_cursor: NaiveDateTime,
}

impl DayLedger {
    /// An untouched day.
    pub fn new(date: NaiveDate, window: &WorkdayWindow) -> Self {
        Self {
            date,
            committed: Vec::new(),
            remaining_minutes: window.minutes,
            day_end_cursor: window.start_on(date),
        }
    }

    /// A day seeded with commitments that existed before the run.
    ///
    /// Tasks due at a time on `date`, or at a time inside a window that runs
    /// past midnight, keep that time. The rest are laid out first-fit after
    /// them, falling back to the end of the day. Capacity is charged by
    /// duration only. Durations the scheduler would reject are dropped.
    pub fn seeded(
        date: NaiveDate,
        existing: Vec<Task>,
        window: &WorkdayWindow,
        breathing_room_minutes: i64,
    ) -> Self {
        let mut ledger = Self::new(date, window);
        let (timed, untimed): (Vec<Task>, Vec<Task>) = existing
            .into_iter()
            .filter(|task| {
                if !task.has_valid_duration() {
                    tracing::warn!(
                        task = %task.name,
                        minutes = task.duration_minutes,
                        %date,
                        "ignoring existing commitment with out-of-range duration"
                    );
                    return false;
                }
                true
            })
            .partition(|task| start_on(task, date, window).is_some());

        for task in timed {
            if let Some(start) = start_on(&task, date, window) {
                let charge = task.duration_minutes;
                ledger.commit(task, start, CommitmentOrigin::Existing, charge);
            }
        }

        let finder = SlotFinder::new(*window, breathing_room_minutes);
        for task in untimed {
            let start = finder
                .find_slot(&ledger.committed, task.duration_minutes, date)
                .unwrap_or_else(|| ledger.append_point(breathing_room_minutes));
            let charge = task.duration_minutes;
            ledger.commit(task, start, CommitmentOrigin::Existing, charge);
        }

        ledger
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn committed(&self) -> &[Commitment] {
        &self.committed
    }

    pub fn remaining_minutes(&self) -> i64 {
        self.remaining_minutes
    }

    pub fn day_end_cursor(&self) -> NaiveDateTime {
        self.day_end_cursor
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Coarse capacity gate: room for `minutes` (task plus breathing room).
    pub fn can_accommodate(&self, minutes: i64) -> bool {
        self.remaining_minutes >= minutes
    }

    /// Start used when no gap is found: after the latest commitment plus the
    /// breathing room. Ignores the nominal end of the workday.
    pub fn append_point(&self, breathing_room_minutes: i64) -> NaiveDateTime {
        self.day_end_cursor + Duration::minutes(breathing_room_minutes)
    }

    /// Tasks placed by the run, in start order.
    pub fn placed(&self) -> impl Iterator<Item = &Commitment> {
        self.committed.iter().filter(|c| c.is_placed())
    }

    /// Minutes occupied by commitments, excluding breathing room.
    pub fn busy_minutes(&self) -> i64 {
        self.committed.iter().map(Commitment::duration_minutes).sum()
    }

    /// Record a commitment and charge `charge_minutes` against capacity.
    pub fn commit(
        &mut self,
        task: Task,
        start: NaiveDateTime,
        origin: CommitmentOrigin,
        charge_minutes: i64,
    ) {
        let commitment = Commitment::new(task, start, origin);
        self.day_end_cursor = self.day_end_cursor.max(commitment.end());
        self.remaining_minutes -= charge_minutes;

        // Insert after any commitment with the same start to keep insertion order stable.
        let index = self.committed.partition_point(|c| c.start <= start);
        self.committed.insert(index, commitment);
    }
}

fn start_on(task: &Task, date: NaiveDate, window: &WorkdayWindow) -> Option<NaiveDateTime> {
    let due = task.requested_due?;
    due.time()?;
    let start = due.sort_instant();
    let (day_start, day_end) = window.bounds(date);
    (start.date() == date || (start >= day_start && start < day_end)).then_some(start)
}
