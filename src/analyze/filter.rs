use crate::analyze::period::{DateRange, Period};
use crate::model::ScoredRecord;
use std::fmt;

pub const ALL_AREAS: &str = "All Areas";

/// Tag filter. Tag comparison is exact and case-sensitive.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub enum Area {
    All,
    Tag(String),
}

impl Area {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_AREAS {
            Area::All
        } else {
            Area::Tag(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Area::All => ALL_AREAS,
            Area::Tag(tag) => tag,
        }
    }

    pub fn matches(&self, record: &ScoredRecord) -> bool {
        match self {
            Area::All => true,
            Area::Tag(tag) => record.has_tag(tag),
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The filters selected on the dashboard. Filter changes produce a new value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ViewState {
    pub period: Period,
    pub area: Area,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            period: Period::CurrentMonth,
            area: Area::All,
        }
    }
}

impl ViewState {
    pub fn new(period: Period, area: Area) -> Self {
        Self { period, area }
    }

    pub fn with_period(&self, period: Period) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    pub fn with_area(&self, area: Area) -> Self {
        Self {
            area,
            ..self.clone()
        }
    }
}

pub trait RecordFilter {
    /// Records inside `window` (all of them when `None`) that match `area`.
    /// Undated records only survive an unbounded window.
    fn filter_view<'a>(&'a self, window: Option<&DateRange>, area: &Area) -> Vec<&'a ScoredRecord>;
}

impl RecordFilter for [ScoredRecord] {
    fn filter_view<'a>(&'a self, window: Option<&DateRange>, area: &Area) -> Vec<&'a ScoredRecord> {
        self.iter()
            .filter(|record| match (window, record.data) {
                (None, _) => true,
                (Some(window), Some(data)) => window.contains(data),
                (Some(_), None) => false,
            })
            .filter(|record| area.matches(record))
            .collect::<Vec<_>>()
    }
}
