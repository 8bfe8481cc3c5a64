//! The multi-day result of a scheduling run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ledger::DayLedger;
use crate::error::SinkError;
use crate::integrations::TaskSink;
use crate::task::Task;

/// Ordered map from date to day ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, DayLedger>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayLedger> {
        self.days.get(&date)
    }

    /// Ledger for `date`, materialized on first reference.
    pub(crate) fn ledger_or_insert_with(
        &mut self,
        date: NaiveDate,
        materialize: impl FnOnce() -> DayLedger,
    ) -> &mut DayLedger {
        self.days.entry(date).or_insert_with(materialize)
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, ledger: DayLedger) {
        self.days.insert(ledger.date(), ledger);
    }

    /// Drop days that never received a commitment.
    pub(crate) fn prune_empty(&mut self) {
        self.days.retain(|_, ledger| !ledger.is_empty());
    }

    /// Ledgers in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayLedger> {
        self.days.values()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Every task placed by the run, by date then start time.
    pub fn placed_tasks(&self) -> Vec<&Task> {
        self.days()
            .flat_map(|ledger| ledger.placed().map(|c| &c.task))
            .collect()
    }

    /// Placed tasks whose assigned start misses their requested due date.
    pub fn late_tasks(&self) -> Vec<&Task> {
        self.placed_tasks().into_iter().filter(|t| t.is_late()).collect()
    }

    /// Hand each day's placed tasks to `sink`, in date order.
    ///
    /// Days carrying only pre-existing commitments are skipped.
    pub fn emit(&self, sink: &mut dyn TaskSink) -> Result<(), SinkError> {
        for ledger in self.days() {
            let placed: Vec<Task> = ledger.placed().map(|c| c.task.clone()).collect();
            if placed.is_empty() {
                continue;
            }
            sink.emit(ledger.date(), &placed)?;
        }
        sink.finish()
    }
}
