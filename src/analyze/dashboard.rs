use crate::analyze::aggregator::{aggregate, Aggregation, MetricCard};
use crate::analyze::filter::ViewState;
use crate::analyze::rollup::{podium, AggregateRow};
use crate::error::PeriodError;
use crate::model::ScoredRecord;
use chrono::NaiveDateTime;
use itertools::Itertools;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Ready,
    /// Nothing matched the filters. Rendered as an explicit empty state.
    EmptyDataWarning,
    /// The period could not be resolved; the view holds no data.
    InvalidPeriod(PeriodError),
}

/// Everything the presentation layer renders for one [`ViewState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub view: ViewState,
    pub state: DashboardState,
    pub aggregation: Aggregation,
    /// Selector options, taken from the unfiltered records.
    pub contributors: Vec<String>,
    pub areas: Vec<String>,
    pub monthly_goal: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndividualPanel {
    pub responsavel: String,
    pub pontos: u64,
    pub tarefas: usize,
    /// Share of the monthly goal reached, capped at 1.0.
    pub progress: f64,
    /// Newest first; undated tasks last.
    pub tasks: Vec<ScoredRecord>,
}

impl Dashboard {
    /// Never fails: filter errors become an empty view carrying the reason.
    pub fn build(
        records: &[ScoredRecord],
        view: ViewState,
        now: NaiveDateTime,
        monthly_goal: u32,
    ) -> Self {
        let contributors = records
            .iter()
            .map(|r| r.responsavel.clone())
            .unique()
            .sorted()
            .collect::<Vec<_>>();
        let areas = records
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .unique()
            .sorted()
            .collect::<Vec<_>>();

        let (state, aggregation) = match aggregate(records, &view, now) {
            Ok(aggregation) if aggregation.is_empty() => {
                info!(target: "gamify::dashboard", period = %view.period, area = %view.area, "no records match the filters");
                (DashboardState::EmptyDataWarning, aggregation)
            }
            Ok(aggregation) => (DashboardState::Ready, aggregation),
            Err(err) => {
                warn!(target: "gamify::dashboard", error = %err, "period filter rejected");
                (DashboardState::InvalidPeriod(err), Aggregation::default())
            }
        };

        Self {
            view,
            state,
            aggregation,
            contributors,
            areas,
            monthly_goal,
        }
    }

    pub fn podium(&self) -> &[AggregateRow] {
        podium(&self.aggregation.ranking)
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        self.aggregation.cards()
    }

    /// Panel for one contributor over the filtered records.
    pub fn individual(&self, responsavel: &str) -> IndividualPanel {
        let mut tasks = self
            .aggregation
            .records
            .iter()
            .filter(|r| r.responsavel == responsavel)
            .cloned()
            .collect::<Vec<_>>();
        tasks.sort_by(|a, b| b.data.cmp(&a.data));

        let pontos = tasks.iter().map(|r| u64::from(r.pontos)).sum::<u64>();
        IndividualPanel {
            responsavel: responsavel.to_string(),
            pontos,
            tarefas: tasks.len(),
            progress: goal_progress(pontos, self.monthly_goal),
            tasks,
        }
    }

    /// Panels for everyone in the ranking, in ranking order.
    pub fn panels(&self) -> Vec<IndividualPanel> {
        self.aggregation
            .ranking
            .iter()
            .map(|row| self.individual(&row.responsavel))
            .collect()
    }
}

fn goal_progress(pontos: u64, goal: u32) -> f64 {
    if goal == 0 {
        return 1.0;
    }
    (pontos as f64 / f64::from(goal)).min(1.0)
}
