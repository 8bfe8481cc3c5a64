use chrono::NaiveDate;

use crate::error::{SinkError, SourceError};
use crate::task::Task;

/// Where tasks come from.
/// Sources are read-only from the scheduler's point of view.
pub trait TaskSource {
    /// Candidate tasks to place.
    fn due_tasks(&self) -> Result<Vec<Task>, SourceError>;

    /// Tasks already occupying `date` before the run.
    ///
    /// An error here is not fatal: the scheduler treats the day as empty.
    fn committed_on(&self, date: NaiveDate) -> Result<Vec<Task>, SourceError>;
}

/// Where the finished schedule goes.
pub trait TaskSink {
    /// Receive the tasks placed on `date`, in start order.
    /// Called at most once per date, in date order.
    fn emit(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), SinkError>;

    /// Called once after the last `emit`.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(()) // default no-op
    }
}
