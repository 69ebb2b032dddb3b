use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use crate::api::ApiError;
use crate::clockify::{Task, TimeEntry};

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:pt)?(?:(?<hours>\d{1,2})h)?(?:(?<minutes>\d{1,2})m)?(?:(?<seconds>\d{1,2})s)?")
        .unwrap()
});

/// Hours/minutes/seconds triple parsed from the service's compact duration
/// format (`PT1H30M`, `45m`, `pt7s`, ...). Absent segments are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hms {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    pub fn parse(value: &str) -> Self {
        // Every segment is optional, so the pattern matches any input.
        let Some(captures) = DURATION_PATTERN.captures(value) else {
            return Self::default();
        };
        let group = |name: &str| {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        Self {
            hours: group("hours"),
            minutes: group("minutes"),
            seconds: group("seconds"),
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub task_name: String,
    pub duration: Hms,
}

pub fn entry_date(entry: &TimeEntry) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&entry.data.time_interval.start)
        .ok()
        .map(|start| start.date_naive())
}

/// Builds report rows from a server-ordered entry sequence. `resolve` maps an
/// entry to its linked task (in production `TimeEntry::linked_task`); entries
/// without a resolvable task are skipped. A stable sort by date keeps the
/// renderer's date grouping intact even if the server interleaves days, while
/// preserving server order within a day.
pub fn build_report<F>(entries: &[TimeEntry], mut resolve: F) -> Result<Vec<ReportRow>, ApiError>
where
    F: FnMut(&TimeEntry) -> Result<Option<Task>, ApiError>,
{
    let mut rows = Vec::new();
    for entry in entries {
        let Some(task) = resolve(entry)? else {
            continue;
        };
        let Some(date) = entry_date(entry) else {
            continue;
        };
        let duration = Hms::parse(entry.data.time_interval.duration.as_deref().unwrap_or(""));
        rows.push(ReportRow {
            date,
            task_name: task.data.name,
            duration,
        });
    }
    rows.sort_by_key(|row| row.date);
    Ok(rows)
}
