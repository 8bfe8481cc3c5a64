//! # dayfill Core Library
//!
//! Places a list of tasks onto a multi-day calendar. Each day has a fixed
//! capacity, tasks keep a mandatory breathing room between them, and work
//! spills into the following days once a day is full.
//!
//! ## Architecture
//!
//! - **Task**: unit of work with a requested due date and, once placed, an
//!   assigned start
//! - **Timeline**: day ledgers, first-fit slot search and the resulting calendar
//! - **Scheduler**: orders tasks and fills days, one task at a time
//! - **Integrations**: task source and task sink traits plus file, memory and
//!   console implementations
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Orchestrates a run
//! - [`Calendar`]: Result of a run
//! - [`TaskSource`] / [`TaskSink`]: Collaborator traits
//! - [`Config`]: Application configuration management

pub mod error;
pub mod integrations;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod timeline;

pub use error::{ConfigError, CoreError, ScheduleError, SinkError, SourceError};
pub use integrations::{
    JsonFileSource, JsonLinesSink, MemorySink, MemorySource, TaskFilter, TaskSink, TaskSource, TextSink,
};
pub use scheduler::{
    CapacityPolicy, DayFiller, Placement, Scheduler, SchedulerConfig, DEFAULT_TASK_DURATION,
};
pub use storage::Config;
pub use task::{Due, Task, TaskOrdering, DEFAULT_PRIORITY, MAX_TASK_DURATION};
pub use timeline::{Calendar, Commitment, CommitmentOrigin, DayLedger, SlotFinder, WorkdayWindow};
