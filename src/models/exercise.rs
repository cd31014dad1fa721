use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AppError, Result};

static EXERCISE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EXERCISE_DATE_PATTERN).expect("exercise date pattern is valid"));

/// Exercise record stored in redb, immutable once written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub description: String,
    pub duration: u32,
    pub date: NaiveDate,
}

/// A validated, not yet persisted exercise
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub description: String,
    pub duration: u32,
    /// `None` means "stamp with the creation date"
    pub date: Option<NaiveDate>,
}

impl NewExercise {
    /// Check the raw submitted fields.
    ///
    /// The date is checked first so a malformed date is reported even when other
    /// fields are also wrong. Nothing is written when this fails.
    pub fn validate(
        description: Option<&str>,
        duration: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self> {
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(token) => Some(parse_exercise_date(token)?),
            None => None,
        };

        let description = match description {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => return Err(invalid(ERR_DESCRIPTION_REQUIRED)),
        };
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(invalid(ERR_DESCRIPTION_TOO_LONG));
        }

        let duration = match duration.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_duration(raw)?,
            None => return Err(invalid(ERR_DURATION_REQUIRED)),
        };

        Ok(Self {
            description,
            duration,
            date,
        })
    }

    /// Resolve the default date and produce the record to store
    pub fn into_record(self, today: NaiveDate) -> ExerciseRecord {
        ExerciseRecord {
            description: self.description,
            duration: self.duration,
            date: self.date.unwrap_or(today),
        }
    }
}

/// Render a calendar date the way every response shows it, e.g. "Mon Jan 01 2024"
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

fn parse_exercise_date(token: &str) -> Result<NaiveDate> {
    if !EXERCISE_DATE.is_match(token) {
        tracing::info!("Rejected exercise date: {}", token);
        return Err(invalid(ERR_INVALID_DATE_FORMAT));
    }

    // Separators may be mixed ("2024-01/01"), the pattern allows it
    let normalized = token.replace('/', "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| {
        tracing::info!("Exercise date is not a real calendar date: {}", token);
        invalid(ERR_INVALID_DATE_FORMAT)
    })
}

fn parse_duration(raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid(ERR_DURATION_NOT_POSITIVE)),
        Ok(minutes) => Ok(minutes),
    }
}

fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}
