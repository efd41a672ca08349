use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration resources (app config, rule table, snapshots) that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed `{}`: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error(transparent)]
    Syntax(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing `{0}`")]
    Missing(&'static str),
}

/// Failures of the ClickUp API collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to `{url}` failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` answered with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unexpected payload from `{url}`: {reason}")]
    InvalidPayload { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("custom period requires both a start and an end date")]
    MissingBound,

    #[error("custom period starts on {start} after it ends on {end}")]
    Reversed {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("period bounds fall outside the supported calendar")]
    OutOfRange,

    #[error("unknown period `{0}`")]
    UnknownLabel(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot build table: {0}")]
    Table(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("period error: {0}")]
    Period(#[from] PeriodError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("cannot write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Telemetry(#[from] crate::telemetry::TelemetryError),
}
