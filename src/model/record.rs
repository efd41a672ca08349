use crate::error::{ConfigError, Result};
use crate::model::store;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::path::Path;

/// One scored (task, assignee) pair. Field names follow the persisted snapshot.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub responsavel: String,
    pub titulo: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub data: Option<NaiveDate>,
    pub pontos: u32,
}

// Create
impl ScoredRecord {
    pub fn new(
        responsavel: impl ToString,
        titulo: impl ToString,
        tags: &[String],
        data: Option<NaiveDate>,
        pontos: u32,
    ) -> Self {
        Self {
            responsavel: responsavel.to_string(),
            titulo: titulo.to_string(),
            tags: tags.to_vec(),
            data,
            pontos,
        }
    }

    pub fn from_config(path: impl AsRef<Path>) -> std::result::Result<Vec<Self>, ConfigError> {
        let path = path.as_ref();
        let json_str = store::read_config(path)?;
        from_str(&json_str).map_err(|err| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Writes the whole snapshot at once; a failure leaves the previous file intact.
    pub fn save(records: &[ScoredRecord], path: impl AsRef<Path>) -> Result<()> {
        store::write_json(path.as_ref(), records)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_dashboard_field_names() {
        let record = ScoredRecord::new(
            "Ana",
            "Fix urgent bug",
            &["Bug".to_string()],
            NaiveDate::from_ymd_opt(2025, 3, 14),
            10,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "responsavel": "Ana",
                "titulo": "Fix urgent bug",
                "tags": ["Bug"],
                "data": "2025-03-14",
                "pontos": 10
            })
        );
    }

    #[test]
    fn has_tag_is_exact() {
        let record = ScoredRecord::new("Ana", "Task", &["Renovação".to_string()], None, 2);
        assert!(record.has_tag("Renovação"));
        assert!(!record.has_tag("renovacao"));
        assert!(!record.has_tag("renovação"));
    }

    #[test]
    fn failed_save_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_tasks.json");
        let records = vec![ScoredRecord::new("Ana", "Task", &[], None, 2)];
        ScoredRecord::save(&records, &path).unwrap();

        let missing_dir = dir.path().join("gone").join("processed_tasks.json");
        assert!(ScoredRecord::save(&records, &missing_dir).is_err());
        assert_eq!(ScoredRecord::from_config(&path).unwrap(), records);
    }
}
