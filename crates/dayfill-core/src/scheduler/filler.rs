//! Places a single task onto a day ledger.

use chrono::NaiveDateTime;

use super::CapacityPolicy;
use crate::task::Task;
use crate::timeline::{CommitmentOrigin, DayLedger, SlotFinder};

/// Outcome of offering a task to a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Placed in the earliest free gap.
    Slot(NaiveDateTime),
    /// No gap found; appended after the last commitment, possibly past day end.
    Appended(NaiveDateTime),
    /// No gap found and the policy forbids appending. The task is handed back.
    Declined(Task),
}

impl Placement {
    pub fn start(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Slot(start) | Self::Appended(start) => Some(*start),
            Self::Declined(_) => None,
        }
    }
}

/// Commits tasks to day ledgers using first-fit search and the fallback append.
#[derive(Debug, Clone, Copy)]
pub struct DayFiller {
    finder: SlotFinder,
    breathing_room_minutes: i64,
    policy: CapacityPolicy,
}

impl DayFiller {
    pub fn new(finder: SlotFinder, breathing_room_minutes: i64, policy: CapacityPolicy) -> Self {
        Self {
            finder,
            breathing_room_minutes,
            policy,
        }
    }

    /// Place `task` on `ledger`.
    ///
    /// Under [`CapacityPolicy::Advisory`] this always commits the task.
    pub fn place(&self, mut task: Task, ledger: &mut DayLedger) -> Placement {
        let placement = match self
            .finder
            .find_slot(ledger.committed(), task.duration_minutes, ledger.date())
        {
            Some(start) => Placement::Slot(start),
            None => match self.policy {
                CapacityPolicy::Advisory => {
                    let start = ledger.append_point(self.breathing_room_minutes);
                    tracing::warn!(
                        task = %task.name,
                        date = %ledger.date(),
                        %start,
                        "no gap found, appending after last commitment"
                    );
                    Placement::Appended(start)
                }
                CapacityPolicy::Strict => return Placement::Declined(task),
            },
        };

        if let Some(start) = placement.start() {
            task.assigned_start = Some(start);
            let charge = task.duration_minutes.saturating_add(self.breathing_room_minutes);
            tracing::debug!(task = %task.name, %start, minutes = task.duration_minutes, "placed task");
            ledger.commit(task, start, CommitmentOrigin::Placed, charge);
        }
        placement
    }
}
