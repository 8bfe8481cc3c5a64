//! First-fit slot search within one day.
//!
//! Walks a day's commitments in chronological order from the workday start
//! and returns the earliest start where a task (plus breathing room) fits
//! without touching any commitment. This is a linear first-fit scan, not an
//! optimal packing; it is re-run for every placement.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::ledger::Commitment;
use super::window::WorkdayWindow;

/// Finds the earliest free slot on a day.
#[derive(Debug, Clone, Copy)]
pub struct SlotFinder {
    window: WorkdayWindow,
    breathing_room: Duration,
}

impl SlotFinder {
    pub fn new(window: WorkdayWindow, breathing_room_minutes: i64) -> Self {
        Self {
            window,
            breathing_room: Duration::minutes(breathing_room_minutes),
        }
    }

    /// Earliest start for `duration_minutes` on `date`, or `None` if nothing
    /// fits before the nominal end of the workday.
    ///
    /// `committed` must be sorted by start time.
    pub fn find_slot(
        &self,
        committed: &[Commitment],
        duration_minutes: i64,
        date: NaiveDate,
    ) -> Option<NaiveDateTime> {
        let (day_start, day_end) = self.window.bounds(date);
        let duration = Duration::minutes(duration_minutes);
        let mut cursor = day_start;

        for scanned in committed {
            if cursor + duration > day_end {
                break;
            }
            if self.is_free(committed, cursor, duration) {
                return Some(cursor);
            }
            cursor = cursor.max(scanned.end() + self.breathing_room);
        }

        if cursor + duration <= day_end && self.is_free(committed, cursor, duration) {
            Some(cursor)
        } else {
            None
        }
    }

    /// Whether a candidate block collides with a commitment.
    ///
    /// Both sides carry breathing room: the candidate's end is padded, and so
    /// is the commitment's, so the gap holds in either direction.
    pub fn conflicts(&self, start: NaiveDateTime, duration: Duration, commitment: &Commitment) -> bool {
        let candidate_end = start + duration + self.breathing_room;
        let committed_end = commitment.end() + self.breathing_room;
        start < committed_end && commitment.start < candidate_end
    }

    fn is_free(&self, committed: &[Commitment], start: NaiveDateTime, duration: Duration) -> bool {
        !committed.iter().any(|c| self.conflicts(start, duration, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use crate::timeline::CommitmentOrigin;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn existing(name: &str, start: NaiveDateTime, minutes: i64) -> Commitment {
        Commitment::new(Task::new(name, minutes), start, CommitmentOrigin::Existing)
    }

    fn finder() -> SlotFinder {
        SlotFinder::new(WorkdayWindow::default(), 30)
    }

    #[test]
    fn empty_day_yields_workday_start() {
        assert_eq!(finder().find_slot(&[], 60, day()), Some(at(9, 0)));
    }

    #[test]
    fn slot_follows_commitment_after_breathing_room() {
        let committed = vec![existing("Call client", at(9, 0), 60)];
        assert_eq!(finder().find_slot(&committed, 60, day()), Some(at(10, 30)));
    }

    #[test]
    fn earliest_gap_wins_over_later_space() {
        // 09:00 free until 11:00: 60 min task + 30 min room fits before 11:00.
        let committed = vec![
            existing("Standup", at(11, 0), 30),
            existing("Review", at(14, 0), 60),
        ];
        assert_eq!(finder().find_slot(&committed, 60, day()), Some(at(9, 0)));
    }

    #[test]
    fn gap_too_small_for_task_plus_room_is_skipped() {
        // 10:30..11:30 is exactly 60 minutes but the room after it is missing.
        let committed = vec![
            existing("A", at(9, 0), 60),
            existing("B", at(11, 30), 60),
        ];
        assert_eq!(finder().find_slot(&committed, 60, day()), Some(at(13, 0)));
    }

    #[test]
    fn commitment_ending_just_before_workday_start_pushes_cursor() {
        let committed = vec![existing("Early", at(8, 0), 50)];
        assert_eq!(finder().find_slot(&committed, 30, day()), Some(at(9, 20)));
    }

    #[test]
    fn duration_longer_than_workday_never_fits() {
        assert_eq!(finder().find_slot(&[], 721, day()), None);
    }

    #[test]
    fn no_slot_when_day_is_full() {
        let committed = vec![existing("All day", at(9, 0), 690)];
        assert_eq!(finder().find_slot(&committed, 30, day()), None);
    }

    #[test]
    fn task_may_end_exactly_at_day_end() {
        let committed = vec![existing("Morning", at(9, 0), 600)];
        // 19:00 + 30 room = 19:30, 19:30 + 90 = 21:00
        assert_eq!(finder().find_slot(&committed, 90, day()), Some(at(19, 30)));
    }
}
