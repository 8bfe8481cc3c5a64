use chrono::{Local, NaiveDate};
use clap::Args;
use dayfill_core::{
    CapacityPolicy, JsonFileSource, JsonLinesSink, Scheduler, TaskFilter, TaskOrdering, TaskSource,
    TextSink,
};
use std::path::{Path, PathBuf};

use super::load_config;

#[derive(Args)]
pub struct PlanArgs {
    /// JSON task file with "tasks" and "committed" lists
    #[arg(short, long)]
    input: PathBuf,
    /// First day to fill (YYYY-MM-DD, default: tomorrow)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Only schedule tasks in this project
    #[arg(long)]
    project: Option<String>,
    /// Only schedule tasks due on or before this date
    #[arg(long)]
    due_by: Option<NaiveDate>,
    /// Task ordering: due-date or priority
    #[arg(long)]
    order: Option<TaskOrdering>,
    /// Move to the next day instead of appending past the end of a fragmented day
    #[arg(long)]
    strict: bool,
    /// Maximum number of days to look ahead
    #[arg(long)]
    horizon: Option<u32>,
    /// Output one JSON object per scheduled day
    #[arg(long, conflicts_with = "calendar")]
    json: bool,
    /// Output the whole calendar, existing commitments included, as JSON
    #[arg(long)]
    calendar: bool,
}

pub fn run(args: PlanArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let mut scheduler_config = config.scheduler_config()?;
    if let Some(order) = args.order {
        scheduler_config.ordering = order;
    }
    if args.strict {
        scheduler_config.capacity_policy = CapacityPolicy::Strict;
    }
    if let Some(horizon) = args.horizon {
        if horizon == 0 {
            return Err("--horizon must be positive".into());
        }
        scheduler_config.max_horizon_days = horizon;
    }

    let start = match args.start {
        Some(day) => day,
        None => Local::now()
            .date_naive()
            .succ_opt()
            .ok_or("cannot compute tomorrow's date")?,
    };

    let source = JsonFileSource::open_with_default_duration(&args.input, config.default_task_duration())?
        .with_filter(TaskFilter {
            project: args.project,
            due_by: args.due_by,
        });
    let tasks = source.due_tasks()?;
    tracing::info!(tasks = tasks.len(), %start, input = %args.input.display(), "planning");

    let calendar = Scheduler::with_config(scheduler_config).schedule(tasks, &source, start)?;

    let stdout = std::io::stdout();
    if args.calendar {
        println!("{}", serde_json::to_string_pretty(&calendar)?);
    } else if args.json {
        calendar.emit(&mut JsonLinesSink::new(stdout.lock()))?;
    } else {
        calendar.emit(&mut TextSink::new(stdout.lock()))?;
    }

    let late = calendar.late_tasks();
    if !late.is_empty() {
        eprintln!("warning: {} task(s) scheduled after their due date:", late.len());
        for task in late {
            if let (Some(due), Some(start)) = (task.requested_due, task.assigned_start) {
                eprintln!("  - {} (due {due}, starts {})", task.name, start.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    Ok(())
}
