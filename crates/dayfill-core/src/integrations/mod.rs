//! Collaborators around the scheduler.
//!
//! A [`TaskSource`] supplies candidate tasks and the commitments already on
//! each day; a [`TaskSink`] receives the finished schedule. Remote task
//! trackers plug in by implementing these traits.

pub mod console;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use console::{JsonLinesSink, TextSink};
pub use json_file::{JsonFileSource, TaskFilter};
pub use memory::{MemorySink, MemorySource};
pub use traits::{TaskSink, TaskSource};
