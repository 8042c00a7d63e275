//! Inclusive date-range filtering and range-input validation.
//!
//! A [`DateRange`] can only be built with `start <= finish`, so the pipeline
//! never sees an inverted window. The two range inputs on the page are
//! modelled by [`RangeInputs`]: a change to one input proposes a new window
//! made of that value and the other input's last committed value. Rejected
//! proposals leave the committed window untouched.

use crate::date;
use crate::entry::Entry;
use std::fmt;
use thiserror::Error;
use time::Date;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid date range: {start} is after {finish}")]
    StartAfterFinish { start: String, finish: String },
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

/// Which of the two range inputs changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    Finish,
}

impl RangeField {
    /// DOM id of the input.
    pub fn input_id(self) -> &'static str {
        match self {
            RangeField::Start => "filter-range-start",
            RangeField::Finish => "filter-range-finish",
        }
    }
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeField::Start => f.write_str("start"),
            RangeField::Finish => f.write_str("finish"),
        }
    }
}

/// A validated, inclusive date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: String,
    finish: String,
    start_ms: i64,
    finish_ms: i64,
}

impl DateRange {
    pub fn new(start: &str, finish: &str) -> Result<Self, RangeError> {
        let start_ms = date::parse_timestamp(start)
            .ok_or_else(|| RangeError::InvalidDate(start.to_string()))?;
        let finish_ms = date::parse_timestamp(finish)
            .ok_or_else(|| RangeError::InvalidDate(finish.to_string()))?;
        if start_ms > finish_ms {
            return Err(RangeError::StartAfterFinish {
                start: start.to_string(),
                finish: finish.to_string(),
            });
        }
        Ok(Self {
            start: start.trim().to_string(),
            finish: finish.trim().to_string(),
            start_ms,
            finish_ms,
        })
    }

    pub fn from_dates(start: Date, finish: Date) -> Result<Self, RangeError> {
        Self::new(&date::format_date(start), &date::format_date(finish))
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn finish(&self) -> &str {
        &self.finish
    }

    pub fn value(&self, field: RangeField) -> &str {
        match field {
            RangeField::Start => &self.start,
            RangeField::Finish => &self.finish,
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start_ms <= timestamp && timestamp <= self.finish_ms
    }

    /// Keep entries dated inside the window. Undated entries are dropped.
    pub fn filter<'a, I>(&self, entries: I) -> Vec<&'a Entry>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries
            .into_iter()
            .filter(|e| e.timestamp().is_some_and(|ts| self.contains(ts)))
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.finish)
    }
}

/// Keep entries dated within `[start, finish]`, bounds parsed like entry dates.
///
/// Unparseable bounds keep nothing, and so does an inverted window.
pub fn range_filter<'a, I>(entries: I, start: &str, finish: &str) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let (Some(start_ms), Some(finish_ms)) =
        (date::parse_timestamp(start), date::parse_timestamp(finish))
    else {
        return Vec::new();
    };
    entries
        .into_iter()
        .filter(|e| {
            e.timestamp()
                .is_some_and(|ts| start_ms <= ts && ts <= finish_ms)
        })
        .collect()
}

/// The pair of range inputs and their last valid values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInputs {
    committed: DateRange,
    /// `min`/`max` attributes shared by both inputs.
    limits: DateRange,
}

impl RangeInputs {
    /// Both inputs start at the limits: `earliest` and `latest`.
    pub fn new(limits: DateRange) -> Self {
        Self {
            committed: limits.clone(),
            limits,
        }
    }

    pub fn committed(&self) -> &DateRange {
        &self.committed
    }

    pub fn limits(&self) -> &DateRange {
        &self.limits
    }

    /// Replace both values with an already validated window.
    pub fn commit(&mut self, window: DateRange) {
        self.committed = window;
    }

    /// Apply a change to one input.
    ///
    /// On success both values are committed. On error nothing changes and
    /// the caller reverts the input to `committed().value(field)`.
    pub fn propose(&mut self, field: RangeField, value: &str) -> Result<&DateRange, RangeError> {
        let candidate = match field {
            RangeField::Start => DateRange::new(value, self.committed.finish())?,
            RangeField::Finish => DateRange::new(self.committed.start(), value)?,
        };
        self.committed = candidate;
        Ok(&self.committed)
    }
}
