mod config;
mod member;
mod record;
mod rules;
pub mod store;
mod task;

pub use config::{AppConfig, OAuthConfig, DEFAULT_MONTHLY_GOAL, DEFAULT_TARGET_STATUS};
pub use member::{TaskSummary, TeamMember, PLACEHOLDER_AVATAR};
pub use record::ScoredRecord;
pub use rules::{ScoreRule, ScoreRules, DEFAULT_SCORE};
pub(crate) use task::epoch_millis;
pub use task::{RawTask, Rejected, TaskBatch};
