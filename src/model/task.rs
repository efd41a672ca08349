use crate::error::{ConfigError, Result};
use crate::model::store;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{from_str, Value};
use std::path::Path;
use tracing::warn;

/// A task as received from ClickUp, reduced to the fields scoring needs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Epoch milliseconds; `None` while the task is open.
    #[serde(default, deserialize_with = "epoch_millis")]
    pub date_closed: Option<i64>,
}

/// An entry of a task snapshot that did not match the [`RawTask`] shape.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rejected {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TaskBatch {
    pub tasks: Vec<RawTask>,
    pub rejected: Vec<Rejected>,
}

// Create
impl RawTask {
    pub fn new(
        id: impl ToString,
        name: impl ToString,
        tags: Vec<impl ToString>,
        assignees: Vec<impl ToString>,
        date_closed: Option<i64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            assignees: assignees.iter().map(|a| a.to_string()).collect(),
            date_closed,
        }
    }

    pub fn from_config(path: impl AsRef<Path>) -> std::result::Result<TaskBatch, ConfigError> {
        let path = path.as_ref();
        let json_str = store::read_config(path)?;
        Self::parse(&json_str).map_err(|err| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn save(tasks: &[RawTask], path: impl AsRef<Path>) -> Result<()> {
        store::write_json(path.as_ref(), tasks)
    }
}

// Parser
impl RawTask {
    /// Parses a snapshot array, quarantining entries that are not valid tasks
    /// instead of failing the whole batch.
    pub fn parse(json_str: &str) -> std::result::Result<TaskBatch, ConfigError> {
        let elements: Vec<Value> = from_str(json_str)?;
        let mut batch = TaskBatch::default();
        for (index, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<RawTask>(element) {
                Ok(task) => batch.tasks.push(task),
                Err(err) => {
                    warn!(target: "gamify::ingest", index, error = %err, "quarantined malformed task");
                    batch.rejected.push(Rejected {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(batch)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Number(i64),
    Text(String),
}

/// Epoch milliseconds given as a JSON integer or a numeric string.
pub(crate) fn epoch_millis<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Millis>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Millis::Number(millis)) => Ok(Some(millis)),
        Some(Millis::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Millis::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("`{text}` is not epoch milliseconds"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_closed_accepts_numbers_strings_and_null() {
        let batch = RawTask::parse(
            r#"[
                {"id": "a", "name": "A", "date_closed": 1700000000000},
                {"id": "b", "name": "B", "date_closed": "1700000000000"},
                {"id": "c", "name": "C", "date_closed": null},
                {"id": "d", "name": "D"}
            ]"#,
        )
        .unwrap();

        let closed = batch.tasks.iter().map(|t| t.date_closed).collect::<Vec<_>>();
        assert_eq!(
            closed,
            [Some(1_700_000_000_000), Some(1_700_000_000_000), None, None]
        );
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn malformed_entries_are_quarantined() {
        let batch = RawTask::parse(
            r#"[
                {"id": "a", "name": "Fine", "assignees": ["Ana"], "tags": ["bug"]},
                {"id": "b"},
                {"id": "c", "name": "Bad date", "date_closed": "yesterday"},
                42
            ]"#,
        )
        .unwrap();

        assert_eq!(batch.tasks.len(), 1);
        assert_eq!(batch.tasks[0].assignees, ["Ana"]);
        let indexes = batch.rejected.iter().map(|r| r.index).collect::<Vec<_>>();
        assert_eq!(indexes, [1, 2, 3]);
    }

    #[test]
    fn snapshot_must_be_an_array() {
        assert!(RawTask::parse(r#"{"tasks": []}"#).is_err());
    }

    #[test]
    fn save_then_load_keeps_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clickup_tasks.json");
        let tasks = vec![RawTask::new("1", "Fix bug", vec!["bug"], vec!["Ana"], Some(5))];
        RawTask::save(&tasks, &path).unwrap();

        let batch = RawTask::from_config(&path).unwrap();
        assert_eq!(batch.tasks, tasks);
    }
}
