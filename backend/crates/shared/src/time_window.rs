//! Reporting Time Windows
//!
//! Every query in the service runs over an inclusive `[start, end]` window.
//! Windows come either from a named relative range ("past 7 days") or from
//! two calendar dates supplied by the caller, which are stretched to the
//! first and last millisecond of their days in server-local time.

use chrono::{DateTime, Duration, Local, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::app_error::{AppError, AppResult};

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use YYYY-MM-DD.";
pub const INVALID_RANGE_MESSAGE: &str = "Start date must be before or equal to end date.";

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex must compile")
});

/// A validated `YYYY-MM-DD` calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Strict shape check first, then calendar validity (`2024-02-30` fails).
    pub fn parse(raw: &str) -> AppResult<Self> {
        if !DATE_PATTERN.is_match(raw) {
            return Err(AppError::bad_request(INVALID_DATE_MESSAGE));
        }
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)?;
        Ok(Self(date))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// First millisecond of the day in `tz`
    pub fn start_of_day_in<Tz: TimeZone>(&self, tz: &Tz) -> AppResult<DateTime<Utc>> {
        tz.from_local_datetime(&self.0.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| AppError::bad_request(format!("{self} has no midnight in server time")))
    }

    /// Last millisecond of the day (23:59:59.999) in `tz`
    pub fn end_of_day_in<Tz: TimeZone>(&self, tz: &Tz) -> AppResult<DateTime<Utc>> {
        let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        tz.from_local_datetime(&self.0.and_time(last_ms))
            .latest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| AppError::bad_request(format!("{self} has no end of day in server time")))
    }
}

impl FromStr for CalendarDate {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Inclusive query window; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start > end {
            return Err(AppError::bad_request(INVALID_RANGE_MESSAGE));
        }
        Ok(Self { start, end })
    }

    /// Window for two caller-supplied date strings, server-local time.
    ///
    /// Both strings are format-checked before the range is compared, so a
    /// malformed end date is reported as a format error even when the start
    /// date is also later than it.
    pub fn from_date_strings(start: &str, end: &str) -> AppResult<Self> {
        Self::from_date_strings_in(&Local, start, end)
    }

    pub fn from_date_strings_in<Tz: TimeZone>(tz: &Tz, start: &str, end: &str) -> AppResult<Self> {
        let start = CalendarDate::parse(start)?;
        let end = CalendarDate::parse(end)?;
        Self::for_dates_in(tz, start, end)
    }

    pub fn for_dates_in<Tz: TimeZone>(
        tz: &Tz,
        start: CalendarDate,
        end: CalendarDate,
    ) -> AppResult<Self> {
        if start > end {
            return Err(AppError::bad_request(INVALID_RANGE_MESSAGE));
        }
        Self::new(start.start_of_day_in(tz)?, end.end_of_day_in(tz)?)
    }

    /// Single calendar day, server-local time
    pub fn for_date(date: &str) -> AppResult<Self> {
        Self::from_date_strings(date, date)
    }

    pub fn single_day_in<Tz: TimeZone>(tz: &Tz, date: CalendarDate) -> AppResult<Self> {
        Self::for_dates_in(tz, date, date)
    }

    /// The current calendar day in server-local time
    pub fn today() -> AppResult<Self> {
        Self::day_containing_in(&Local, Utc::now())
    }

    pub fn day_containing_in<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> AppResult<Self> {
        let local_date = instant.with_timezone(tz).date_naive();
        Self::single_day_in(tz, CalendarDate(local_date))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Relative windows that end "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NamedRange {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl NamedRange {
    pub const ALL: [NamedRange; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Path segment used by the report routes
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.slug() == slug)
    }

    /// `[now - period, now]`. A year is twelve calendar months.
    pub fn window_ending_at(&self, now: DateTime<Utc>) -> TimeWindow {
        let start = match self {
            Self::Daily => now - Duration::days(1),
            Self::Weekly => now - Duration::days(7),
            Self::Monthly => now - Duration::days(30),
            Self::Yearly => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        };
        TimeWindow { start, end: now }
    }

    pub fn current_window(&self) -> TimeWindow {
        self.window_ending_at(Utc::now())
    }
}

impl fmt::Display for NamedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
