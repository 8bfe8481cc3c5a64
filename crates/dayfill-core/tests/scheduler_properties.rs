//! Property tests: no overlaps, nothing lost, same input same output.

use chrono::{Duration, NaiveDate};
use dayfill_core::{
    Calendar, CapacityPolicy, MemorySource, Scheduler, SchedulerConfig, Task,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

const BREATHING_ROOM: i64 = 30;

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

/// (duration, optional (day offset, hour), priority)
fn task_params() -> impl Strategy<Value = (i64, Option<(i64, u32)>, u8)> {
    (1i64..=300, proptest::option::of((0i64..5, 0u32..24)), 0u8..5)
}

/// (day offset, hour, duration)
fn commitment_params() -> impl Strategy<Value = (i64, u32, i64)> {
    (0i64..3, 6u32..20, 15i64..=240)
}

fn build_tasks(params: &[(i64, Option<(i64, u32)>, u8)]) -> Vec<Task> {
    params
        .iter()
        .enumerate()
        .map(|(i, (duration, due, priority))| {
            let mut task = Task::new(format!("task {i}"), *duration)
                .with_id(format!("t{i}"))
                .with_priority(*priority);
            if let Some((offset, hour)) = due {
                let date = start_day() + Duration::days(*offset);
                task = task.with_due(date.and_hms_opt(*hour, 0, 0).unwrap());
            }
            task
        })
        .collect()
}

fn build_source(params: &[(i64, u32, i64)]) -> MemorySource {
    params
        .iter()
        .enumerate()
        .fold(MemorySource::new(), |source, (i, (offset, hour, duration))| {
            let date = start_day() + Duration::days(*offset);
            source.with_committed(
                date,
                vec![Task::new(format!("existing {i}"), *duration)
                    .with_due(date.and_hms_opt(*hour, 0, 0).unwrap())],
            )
        })
}

fn gaps_hold(calendar: &Calendar) -> bool {
    let room = Duration::minutes(BREATHING_ROOM);
    calendar.days().all(|ledger| {
        let committed = ledger.committed();
        committed.iter().enumerate().all(|(i, a)| {
            committed[i + 1..].iter().all(|b| {
                (!a.is_placed() && !b.is_placed())
                    || a.end() + room <= b.start
                    || b.end() + room <= a.start
            })
        })
    })
}

proptest! {
    #[test]
    fn placed_tasks_never_crowd_each_other(
        tasks in prop::collection::vec(task_params(), 0..40),
        existing in prop::collection::vec(commitment_params(), 0..8),
        strict in any::<bool>(),
    ) {
        let config = SchedulerConfig {
            capacity_policy: if strict { CapacityPolicy::Strict } else { CapacityPolicy::Advisory },
            ..SchedulerConfig::default()
        };
        let calendar = Scheduler::with_config(config)
            .schedule(build_tasks(&tasks), &build_source(&existing), start_day())
            .unwrap();

        prop_assert!(gaps_hold(&calendar));
    }

    #[test]
    fn every_task_is_placed_exactly_once(
        tasks in prop::collection::vec(task_params(), 0..40),
        existing in prop::collection::vec(commitment_params(), 0..8),
    ) {
        let calendar = Scheduler::new()
            .schedule(build_tasks(&tasks), &build_source(&existing), start_day())
            .unwrap();

        let placed = calendar.placed_tasks();
        prop_assert_eq!(placed.len(), tasks.len());

        let ids: BTreeSet<_> = placed.iter().map(|t| t.id.clone()).collect();
        let expected: BTreeSet<_> = (0..tasks.len()).map(|i| format!("t{i}")).collect();
        prop_assert_eq!(ids, expected);
        prop_assert!(placed.iter().all(|t| t.assigned_start.is_some()));
        prop_assert!(placed.iter().all(|t| t.assigned_start.unwrap().date() >= start_day()));
    }

    #[test]
    fn strict_placements_end_within_the_workday(
        tasks in prop::collection::vec(task_params(), 0..40),
        existing in prop::collection::vec(commitment_params(), 0..8),
    ) {
        let config = SchedulerConfig {
            capacity_policy: CapacityPolicy::Strict,
            ..SchedulerConfig::default()
        };
        let window = config.window;
        let calendar = Scheduler::with_config(config)
            .schedule(build_tasks(&tasks), &build_source(&existing), start_day())
            .unwrap();

        for ledger in calendar.days() {
            for c in ledger.placed() {
                prop_assert!(c.end() <= window.end_on(ledger.date()));
                prop_assert!(c.start >= window.start_on(ledger.date()));
            }
        }
    }

    #[test]
    fn runs_are_deterministic(
        tasks in prop::collection::vec(task_params(), 0..25),
        existing in prop::collection::vec(commitment_params(), 0..5),
    ) {
        let source = build_source(&existing);
        let first = Scheduler::new().schedule(build_tasks(&tasks), &source, start_day()).unwrap();
        let second = Scheduler::new().schedule(build_tasks(&tasks), &source, start_day()).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
