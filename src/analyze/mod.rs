pub mod aggregator;
pub mod dashboard;
pub mod delta;
pub mod filter;
pub mod period;
pub mod rollup;

pub use aggregator::{aggregate, Aggregation, MetricCard};
pub use dashboard::{Dashboard, DashboardState, IndividualPanel};
pub use delta::delta;
pub use filter::{Area, RecordFilter, ViewState, ALL_AREAS};
pub use period::{DateRange, Period};
pub use rollup::{podium, rollup, AggregateRow, Metrics};
