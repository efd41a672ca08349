use crate::error::ConfigError;
use crate::model::store;
use indexmap::IndexMap;
use serde_json::{from_str, Value};
use std::path::Path;

/// Points given to a task when no keyword rule matches.
pub const DEFAULT_SCORE: u32 = 2;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct ScoreRule {
    pub keyword: String,
    pub points: u32,
}

/// Keyword rules in priority order; the first matching rule wins.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScoreRules {
    rules: Vec<ScoreRule>,
}

// Create
impl ScoreRules {
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json_str = store::read_config(path)?;
        Self::parse(&json_str).map_err(|err| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn new<K: ToString>(rules: impl IntoIterator<Item = (K, u32)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(keyword, points)| ScoreRule::new(keyword, points))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl ScoreRule {
    fn new(keyword: impl ToString, points: u32) -> Self {
        Self {
            keyword: keyword.to_string().to_lowercase(),
            points,
        }
    }
}

// Parser
impl ScoreRules {
    pub fn parse(json_str: &str) -> Result<Self, ConfigError> {
        let elements: IndexMap<String, Value> = from_str(json_str)?;
        let mut rules = Vec::with_capacity(elements.len());
        for (keyword, points) in elements {
            let Some(points) = points.as_u64() else {
                return Err(ConfigError::Invalid {
                    field: keyword,
                    reason: format!("expected a non-negative integer, found {points}"),
                });
            };
            let Ok(points) = u32::try_from(points) else {
                return Err(ConfigError::Invalid {
                    field: keyword,
                    reason: format!("{points} points is out of range"),
                });
            };
            rules.push(ScoreRule::new(keyword, points));
        }
        Ok(Self { rules })
    }
}
