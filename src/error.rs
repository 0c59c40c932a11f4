use thiserror::Error;

/// Failures raised by the calendar core and the record layer.
///
/// Command-level code wraps these in `anyhow::Error`; the dashboard never
/// surfaces `StorageReadCorrupt` because loads fall back to defaults.
#[derive(Debug, Error)]
pub enum MoodError {
    #[error("stored record '{key}' is corrupt")]
    StorageReadCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{0}' is not a day of the calendar year")]
    InvalidDateKey(String),
    #[error("backup file could not be restored: {0}")]
    RestoreParseFailure(String),
    #[error("unknown mood '{0}'")]
    UnknownMood(String),
}
