use serde::Serialize;

use crate::error::Result;
use crate::models::{ExerciseRecord, display_date};

use super::bounds::{Bound, DateRange, Verdict};

/// Where the engine looks up the exercises a user's log refers to
pub trait ExerciseSource {
    fn resolve(&self, id: &str) -> Result<Resolution>;
}

/// Outcome of looking up one log reference
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ExerciseRecord),
    /// The reference points at nothing; carries the dangling id
    Unresolved(String),
}

/// One formatted entry of a log response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: String,
}

/// Filtered, limited and formatted view of a user's log
#[derive(Debug, Clone, PartialEq)]
pub struct LogView {
    pub count: usize,
    pub log: Vec<LogEntry>,
    /// Echo of the requested lower bound, `None` when not requested
    pub from: Option<String>,
    /// Echo of the requested upper bound, `None` when not requested
    pub to: Option<String>,
    /// References skipped because they did not resolve
    pub unresolved: usize,
}

/// Filtering and limiting applied to a log
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
    pub range: DateRange,
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Build a query from raw query-string tokens; malformed tokens degrade, never fail
    pub fn from_params(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            range: DateRange::new(Bound::parse(from), Bound::parse(to)),
            limit: parse_limit(limit),
        }
    }

    /// Filter, head-limit and format resolved log entries.
    ///
    /// Input order is kept; entries are never sorted by date.
    pub fn apply(&self, resolutions: impl IntoIterator<Item = Resolution>) -> LogView {
        let mut unresolved = 0;
        let mut records = Vec::new();
        for resolution in resolutions {
            match resolution {
                Resolution::Resolved(record) => records.push(record),
                Resolution::Unresolved(id) => {
                    tracing::debug!("Skipping unresolved log reference: {}", id);
                    unresolved += 1;
                }
            }
        }

        let survivors = records
            .into_iter()
            .filter(|record| self.range.evaluate(record.date) == Verdict::Match);

        let log: Vec<LogEntry> = match self.limit {
            Some(limit) => survivors.take(limit).map(format_entry).collect(),
            None => survivors.map(format_entry).collect(),
        };

        LogView {
            count: log.len(),
            log,
            from: self.range.from.echo(),
            to: self.range.to.echo(),
            unresolved,
        }
    }
}

/// Look up every reference in log order
pub fn resolve_log<S>(source: &S, references: &[String]) -> Result<Vec<Resolution>>
where
    S: ExerciseSource + ?Sized,
{
    references.iter().map(|id| source.resolve(id)).collect()
}

/// `limit` must be a plain non-negative integer; anything else means "no limit"
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    match raw.parse::<usize>() {
        Ok(limit) => Some(limit),
        Err(_) => {
            tracing::debug!("Ignoring unusable limit: {}", raw);
            None
        }
    }
}

fn format_entry(record: ExerciseRecord) -> LogEntry {
    LogEntry {
        date: display_date(record.date),
        description: record.description,
        duration: record.duration,
    }
}
