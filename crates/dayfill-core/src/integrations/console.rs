//! Sinks that write the schedule to a stream.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use super::traits::TaskSink;
use crate::error::SinkError;
use crate::task::Task;

/// Human-readable listing, one block per day.
///
/// ```text
/// 2026-10-20 (Tuesday):
///   - 09:00-10:00 Call client (60 min)
/// ```
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TaskSink for TextSink<W> {
    fn emit(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), SinkError> {
        writeln!(self.out, "{} ({}):", date.format("%Y-%m-%d"), date.format("%A"))?;
        for task in tasks {
            match (task.assigned_start, task.assigned_end()) {
                (Some(start), Some(end)) => writeln!(
                    self.out,
                    "  - {}-{} {} ({} min){}",
                    start.format("%H:%M"),
                    end.format("%H:%M"),
                    task.name,
                    task.duration_minutes,
                    if task.is_late() { " [late]" } else { "" }
                )?,
                _ => writeln!(self.out, "  - {} ({} min)", task.name, task.duration_minutes)?,
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct DayRecord<'a> {
    date: NaiveDate,
    tasks: &'a [Task],
}

/// One JSON object per day: `{"date": "...", "tasks": [...]}`.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TaskSink for JsonLinesSink<W> {
    fn emit(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &DayRecord { date, tasks })?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(name: &str, h: u32, minutes: i64) -> Task {
        let mut task = Task::new(name, minutes);
        task.assigned_start = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap().and_hms_opt(h, 0, 0);
        task
    }

    #[test]
    fn text_sink_lists_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let mut sink = TextSink::new(Vec::new());
        sink.emit(date, &[placed("Call client", 9, 60)]).unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "2026-10-20 (Tuesday):\n  - 09:00-10:00 Call client (60 min)\n\n");
    }

    #[test]
    fn text_sink_flags_late_tasks() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let task = placed("Report", 11, 30).with_due(date.and_hms_opt(10, 0, 0).unwrap());
        let mut sink = TextSink::new(Vec::new());
        sink.emit(date, &[task]).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("11:00-11:30 Report (30 min) [late]"));
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_day() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(date, &[placed("A", 9, 30)]).unwrap();
        sink.emit(date.succ_opt().unwrap(), &[placed("B", 9, 30)]).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["date"], "2026-10-20");
        assert_eq!(lines[0]["tasks"][0]["name"], "A");
        assert_eq!(lines[0]["tasks"][0]["assigned_start"], "2026-10-20T09:00:00");
    }
}
