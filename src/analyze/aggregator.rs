use crate::analyze::delta::delta;
use crate::analyze::filter::{RecordFilter, ViewState};
use crate::analyze::period::DateRange;
use crate::analyze::rollup::{rollup, AggregateRow, Metrics};
use crate::error::PeriodError;
use crate::model::ScoredRecord;
use chrono::NaiveDateTime;

/// Records that survived the view's filters and what was computed from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub window: Option<DateRange>,
    pub records: Vec<ScoredRecord>,
    pub ranking: Vec<AggregateRow>,
    pub metrics: Metrics,
    /// Same filters over the window preceding `window`; `None` when unbounded.
    pub previous: Option<Metrics>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub delta: String,
}

pub fn aggregate(
    records: &[ScoredRecord],
    view: &ViewState,
    now: NaiveDateTime,
) -> Result<Aggregation, PeriodError> {
    let window = view.period.resolve(now)?;
    let current = records.filter_view(window.as_ref(), &view.area);
    let previous = match &window {
        Some(window) => {
            let previous = records.filter_view(Some(&window.previous()?), &view.area);
            Some(Metrics::from_records(&previous))
        }
        None => None,
    };

    Ok(Aggregation {
        window,
        ranking: rollup(&current),
        metrics: Metrics::from_records(&current),
        previous,
        records: current.into_iter().cloned().collect(),
    })
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        let current = &self.metrics;
        let previous = self.previous.as_ref();
        let average = match current.average_points() {
            Some(average) => MetricCard {
                label: "Average points per task",
                value: format!("{average:.1}"),
                delta: delta(average, previous.and_then(Metrics::average_points)),
            },
            None => MetricCard {
                label: "Average points per task",
                value: "-".to_string(),
                delta: "-".to_string(),
            },
        };
        vec![
            MetricCard {
                label: "Points",
                value: current.total_points.to_string(),
                delta: delta(
                    current.total_points as f64,
                    previous.map(|p| p.total_points as f64),
                ),
            },
            MetricCard {
                label: "Completed tasks",
                value: current.tasks.to_string(),
                delta: delta(current.tasks as f64, previous.map(|p| p.tasks as f64)),
            },
            average,
            MetricCard {
                label: "Active contributors",
                value: current.contributors.to_string(),
                delta: delta(
                    current.contributors as f64,
                    previous.map(|p| p.contributors as f64),
                ),
            },
        ]
    }
}
