use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The moment the wedding starts, as a local wall-clock time without a zone.
///
/// Every displayed date, the countdown and calendar links are derived from
/// this single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(NaiveDateTime);

impl EventDate {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The event day combined with a venue's `HH:MM` time.
    /// Falls back to the event's own time when the venue time is missing or unreadable.
    pub fn at_time(&self, time: Option<&str>) -> NaiveDateTime {
        time.and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
            .map(|t| self.0.date().and_time(t))
            .unwrap_or(self.0)
    }

    /// Long-form date for headings, e.g. `Saturday, August 22, 2026`
    pub fn long_date(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }

    /// Short dotted date for compact skins, e.g. `22.08.2026`
    pub fn short_date(&self) -> String {
        self.0.format("%d.%m.%Y").to_string()
    }

    pub fn time_of_day(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl FromStr for EventDate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();

        for format in DATE_TIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Self(date_time));
            }
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(|date| Self(date.and_time(NaiveTime::default())))
            .map_err(|_| Error::ParsingError(format!("'{}' is not a valid event date", value)))
    }
}

impl TryFrom<String> for EventDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMATS[0]))
    }
}
