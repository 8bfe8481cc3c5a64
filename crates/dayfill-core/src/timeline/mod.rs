//! Calendar model and slot search.
//!
//! This module provides:
//! - The workday window that bounds each day
//! - Day ledgers holding a day's commitments and remaining capacity
//! - First-fit slot search between commitments
//! - The calendar returned by a scheduling run

mod calendar;
mod ledger;
mod slot;
mod window;

pub use calendar::Calendar;
pub use ledger::{Commitment, CommitmentOrigin, DayLedger};
pub use slot::SlotFinder;
pub use window::WorkdayWindow;
