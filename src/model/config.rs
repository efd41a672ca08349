use crate::error::{ConfigError, Result};
use crate::model::store;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

pub const DEFAULT_TARGET_STATUS: &str = "concluído";
pub const DEFAULT_MONTHLY_GOAL: u32 = 100;

/// Contents of `config.json`: ClickUp credentials, the lists to watch and
/// dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickup_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default)]
    pub list_ids: Vec<String>,
    #[serde(default = "default_target_status")]
    pub target_status: String,
    /// Fixed offset used to turn close timestamps into calendar dates.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_monthly_goal")]
    pub monthly_goal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthConfig>,
    /// Keys this tool does not know about, kept when the file is rewritten.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

fn default_target_status() -> String {
    DEFAULT_TARGET_STATUS.to_string()
}

fn default_monthly_goal() -> u32 {
    DEFAULT_MONTHLY_GOAL
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clickup_token: None,
            team_id: None,
            list_ids: Vec::new(),
            target_status: default_target_status(),
            utc_offset_minutes: 0,
            monthly_goal: default_monthly_goal(),
            oauth: None,
            extra: Map::new(),
        }
    }
}

// Create
impl AppConfig {
    pub fn from_config(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let json_str = store::read_config(path)?;
        serde_json::from_str(&json_str).map_err(|err| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Loads the file when present; a missing file yields the defaults.
    pub fn from_config_or_default(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_config(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.clickup_token = Some(token);
        }
        self
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        store::write_json(path.as_ref(), self)
    }
}

// Accessors
impl AppConfig {
    pub fn token(&self) -> std::result::Result<&str, ConfigError> {
        self.clickup_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("clickup_token"))
    }

    pub fn team_id(&self) -> std::result::Result<&str, ConfigError> {
        self.team_id
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("team_id"))
    }

    pub fn list_ids(&self) -> std::result::Result<&[String], ConfigError> {
        if self.list_ids.is_empty() {
            return Err(ConfigError::Missing("list_ids"));
        }
        Ok(&self.list_ids)
    }

    pub fn oauth(&self) -> std::result::Result<&OAuthConfig, ConfigError> {
        self.oauth.as_ref().ok_or(ConfigError::Missing("oauth"))
    }

    pub fn offset(&self) -> std::result::Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                field: "utc_offset_minutes".to_string(),
                reason: format!("{} minutes is not a valid offset", self.utc_offset_minutes),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"clickup_token": "pk_1", "team_id": "42"}"#).unwrap();
        assert_eq!(config.token().unwrap(), "pk_1");
        assert_eq!(config.team_id().unwrap(), "42");
        assert_eq!(config.target_status, DEFAULT_TARGET_STATUS);
        assert_eq!(config.monthly_goal, DEFAULT_MONTHLY_GOAL);
        assert_eq!(config.offset().unwrap(), FixedOffset::east_opt(0).unwrap());
        assert!(matches!(config.list_ids(), Err(ConfigError::Missing("list_ids"))));
    }

    #[test]
    fn missing_credentials_are_reported() {
        let config = AppConfig::default();
        assert!(matches!(config.token(), Err(ConfigError::Missing("clickup_token"))));
        assert!(matches!(config.oauth(), Err(ConfigError::Missing("oauth"))));
    }

    #[test]
    fn token_override_wins_unless_blank() {
        let config = AppConfig::default().with_token_override(Some("pk_env".into()));
        assert_eq!(config.token().unwrap(), "pk_env");

        let config = config.with_token_override(Some("  ".into()));
        assert_eq!(config.token().unwrap(), "pk_env");
    }

    #[test]
    fn out_of_range_offset_is_invalid() {
        let config = AppConfig {
            utc_offset_minutes: 24 * 60,
            ..AppConfig::default()
        };
        assert!(matches!(config.offset(), Err(ConfigError::Invalid { .. })));

        let config = AppConfig {
            utc_offset_minutes: -180,
            ..AppConfig::default()
        };
        assert_eq!(config.offset().unwrap(), FixedOffset::west_opt(3 * 3600).unwrap());
    }

    #[test]
    fn save_preserves_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"team_id": "42", "theme": "dark"}"#).unwrap();

        let config = AppConfig::from_config(&path)
            .unwrap()
            .with_token_override(Some("pk_new".into()));
        config.save(&path).unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["clickup_token"], "pk_new");
        assert_eq!(saved["team_id"], "42");
    }
}
