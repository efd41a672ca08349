//! Keyword-based gamification metrics for ClickUp tasks: fetch closed tasks,
//! score them per assignee and render a dashboard report.

pub mod analyze;
pub mod clickup;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod telemetry;
pub mod utils;

pub use error::{Error, Result};
