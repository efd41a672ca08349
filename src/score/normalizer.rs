use crate::model::{RawTask, ScoreRules, ScoredRecord};
use crate::score::scorer::score;
use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{debug, warn};

/// Turns fetched tasks into per-assignee scored records.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    rules: &'a ScoreRules,
    default_score: u32,
    offset: FixedOffset,
}

impl<'a> Normalizer<'a> {
    pub fn new(rules: &'a ScoreRules, default_score: u32, offset: FixedOffset) -> Self {
        Self {
            rules,
            default_score,
            offset,
        }
    }

    /// Open tasks and tasks nobody is assigned to produce no records.
    pub fn normalize(&self, tasks: &[RawTask]) -> Vec<ScoredRecord> {
        let mut records = Vec::new();
        let mut open = 0;
        let mut unassigned = 0;
        for task in tasks {
            let Some(millis) = task.date_closed else {
                open += 1;
                continue;
            };
            let Some(data) = closed_on(millis, &self.offset) else {
                warn!(target: "gamify::score", task = %task.id, millis, "close timestamp out of range");
                continue;
            };
            if task.assignees.is_empty() {
                unassigned += 1;
                continue;
            }
            let pontos = score(&task.name, &task.tags, self.rules, self.default_score);
            records.extend(task.assignees.iter().map(|person| {
                ScoredRecord::new(person, &task.name, &task.tags, Some(data), pontos)
            }));
        }
        debug!(
            target: "gamify::score",
            tasks = tasks.len(),
            records = records.len(),
            open,
            unassigned,
            "normalized tasks"
        );
        records
    }
}

/// Calendar date of an epoch-milliseconds instant at a fixed offset.
pub fn closed_on(millis: i64, offset: &FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(offset).date_naive())
}
