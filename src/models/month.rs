//! Calendar month tags used by the monthly rollover

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2026-10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthTag {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthTag {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `instant`, in the instant's own time zone
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(&chrono::Local::now())
    }
}

impl fmt::Display for MonthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
