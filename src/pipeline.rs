use crate::clickup::{ClickUpClient, ClickUpTasks, PageProgress};
use crate::error::Result;
use crate::model::{AppConfig, RawTask, ScoreRules, ScoredRecord, DEFAULT_SCORE};
use crate::score::Normalizer;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ScoreOutcome {
    pub tasks: usize,
    pub rejected: usize,
    pub records: usize,
}

/// Downloads the closed tasks of every configured list and replaces the task
/// snapshot. Nothing is written when any list fails.
pub async fn fetch_snapshot<'a, F>(
    client: &ClickUpClient,
    config: &AppConfig,
    tasks_path: &Path,
    progress: F,
) -> Result<usize>
where
    F: Fn(&str) -> PageProgress<'a>,
{
    let list_ids = config.list_ids()?;
    let tasks = client
        .fetch_lists(list_ids, &config.target_status, progress)
        .await?;
    RawTask::save(&tasks, tasks_path)?;
    info!(target: "gamify::fetch", tasks = tasks.len(), path = %tasks_path.display(), "saved task snapshot");
    Ok(tasks.len())
}

/// Scores the task snapshot with the rule table and replaces the record snapshot.
pub fn score_snapshot(
    config: &AppConfig,
    rules_path: &Path,
    tasks_path: &Path,
    records_path: &Path,
) -> Result<ScoreOutcome> {
    let rules = ScoreRules::from_config(rules_path)?;
    let offset = config.offset()?;
    let batch = RawTask::from_config(tasks_path)?;
    if !batch.rejected.is_empty() {
        warn!(target: "gamify::score", rejected = batch.rejected.len(), "some tasks were quarantined");
    }

    let records = Normalizer::new(&rules, DEFAULT_SCORE, offset).normalize(&batch.tasks);
    ScoredRecord::save(&records, records_path)?;
    info!(target: "gamify::score", records = records.len(), rules = rules.len(), "saved scored records");

    Ok(ScoreOutcome {
        tasks: batch.tasks.len(),
        rejected: batch.rejected.len(),
        records: records.len(),
    })
}
