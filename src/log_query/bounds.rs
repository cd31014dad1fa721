use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::constants::INVALID_DATE_DISPLAY;
use crate::models::display_date;

/// Calendar-only layouts tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%a %b %d %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

/// Date-and-time layouts without an offset; only the date part is kept
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One side of a requested date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// Not supplied (missing, empty or whitespace)
    Absent,
    /// Supplied and understood
    On(NaiveDate),
    /// Supplied but not a date we can read; matches nothing
    Unparseable(String),
}

impl Bound {
    /// Interpret an optional query token. Never fails.
    pub fn parse(token: Option<&str>) -> Self {
        let Some(raw) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Bound::Absent;
        };

        match parse_loose_date(raw) {
            Some(date) => Bound::On(date),
            None => {
                tracing::debug!("Unparseable date bound: {}", raw);
                Bound::Unparseable(raw.to_string())
            }
        }
    }

    /// The bound as echoed back to the client, `None` when it was not supplied
    pub fn echo(&self) -> Option<String> {
        match self {
            Bound::Absent => None,
            Bound::On(date) => Some(display_date(*date)),
            Bound::Unparseable(_) => Some(INVALID_DATE_DISPLAY.to_string()),
        }
    }

    fn admits(&self, date: NaiveDate, side: Side) -> bool {
        match (self, side) {
            (Bound::Absent, _) => true,
            (Bound::On(from), Side::Lower) => date >= *from,
            (Bound::On(to), Side::Upper) => date <= *to,
            (Bound::Unparseable(_), _) => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Lower,
    Upper,
}

/// Outcome of testing one record date against a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
}

/// Inclusive date interval, either end optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: Bound,
    pub to: Bound,
}

impl DateRange {
    pub fn new(from: Bound, to: Bound) -> Self {
        Self { from, to }
    }

    /// Range that admits every date
    pub fn unbounded() -> Self {
        Self::new(Bound::Absent, Bound::Absent)
    }

    pub fn evaluate(&self, date: NaiveDate) -> Verdict {
        if self.from.admits(date, Side::Lower) && self.to.admits(date, Side::Upper) {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }
}

/// Accepts the common ways people write a date in a query string.
fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    parse_partial_iso(raw)
}

/// `YYYY` and `YYYY-MM` name the first day of the year or month
fn parse_partial_iso(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let year = parts.next().filter(|y| is_digits(y, 4))?.parse().ok()?;
    let month = match parts.next() {
        None => 1,
        Some(m) if is_digits(m, 2) => m.parse().ok()?,
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
