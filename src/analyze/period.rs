use crate::error::PeriodError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Named date ranges offered by the dashboard.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Period {
    CurrentMonth,
    Last7Days,
    Last30Days,
    CurrentQuarter,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    All,
}

/// Inclusive range of local instants.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    pub const LABELS: [&'static str; 6] = [
        "Current Month",
        "Last 7 days",
        "Last 30 days",
        "Current Quarter",
        "Custom",
        "All",
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::CurrentMonth => Self::LABELS[0],
            Period::Last7Days => Self::LABELS[1],
            Period::Last30Days => Self::LABELS[2],
            Period::CurrentQuarter => Self::LABELS[3],
            Period::Custom { .. } => Self::LABELS[4],
            Period::All => Self::LABELS[5],
        }
    }

    /// Matches labels case-insensitively; the bounds only apply to "Custom".
    pub fn from_label(
        label: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, PeriodError> {
        let period = match label.trim().to_lowercase().as_str() {
            "current month" => Period::CurrentMonth,
            "last 7 days" => Period::Last7Days,
            "last 30 days" => Period::Last30Days,
            "current quarter" => Period::CurrentQuarter,
            "custom" => Period::Custom { start, end },
            "all" => Period::All,
            _ => return Err(PeriodError::UnknownLabel(label.to_string())),
        };
        Ok(period)
    }

    /// Concrete range for this period at `now`; `None` means unbounded.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<Option<DateRange>, PeriodError> {
        let today = now.date();
        let range = match *self {
            Period::CurrentMonth => {
                let first = month_start(today.year(), today.month())?;
                let (year, month) = next_month(today.year(), today.month(), 1);
                let next = month_start(year, month)?;
                DateRange::new(start_of(first), start_of(next) - Duration::seconds(1))
            }
            Period::Last7Days => DateRange::new(start_of(days_before(today, 6)?), now),
            Period::Last30Days => DateRange::new(start_of(days_before(today, 29)?), now),
            Period::CurrentQuarter => {
                let quarter_month = (today.month0() / 3) * 3 + 1;
                let first = month_start(today.year(), quarter_month)?;
                let (year, month) = next_month(today.year(), quarter_month, 3);
                let next = month_start(year, month)?;
                DateRange::new(start_of(first), start_of(next) - Duration::seconds(1))
            }
            Period::Custom {
                start: Some(start),
                end: Some(end),
            } => {
                if start > end {
                    return Err(PeriodError::Reversed { start, end });
                }
                DateRange::new(start_of(start), end_of(end))
            }
            Period::Custom { .. } => return Err(PeriodError::MissingBound),
            Period::All => return Ok(None),
        };
        Ok(Some(range))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Custom {
                start: Some(start),
                end: Some(end),
            } => write!(f, "{} ({} - {})", self.label(), start, end),
            _ => f.write_str(self.label()),
        }
    }
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// A calendar date belongs to the range when its first instant does.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let instant = start_of(date);
        self.start <= instant && instant <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Calendar days touched by the range, counting a partial last day.
    pub fn days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }

    /// Window of as many whole days as this one, ending one second before it starts.
    pub fn previous(&self) -> Result<Self, PeriodError> {
        let first = days_before(self.start.date(), self.days())?;
        Ok(Self::new(start_of(first), self.start - Duration::seconds(1)))
    }
}

fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

fn end_of(date: NaiveDate) -> NaiveDateTime {
    start_of(date) + Duration::days(1) - Duration::seconds(1)
}

fn days_before(date: NaiveDate, days: i64) -> Result<NaiveDate, PeriodError> {
    date.checked_sub_signed(Duration::days(days))
        .ok_or(PeriodError::OutOfRange)
}

fn month_start(year: i32, month: u32) -> Result<NaiveDate, PeriodError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::OutOfRange)
}

fn next_month(year: i32, month: u32, step: u32) -> (i32, u32) {
    let month0 = month - 1 + step;
    (year + (month0 / 12) as i32, month0 % 12 + 1)
}
