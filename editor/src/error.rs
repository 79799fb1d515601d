use std::path::PathBuf;

use isolationist_core::abstract_editor::EditActionError;
use thiserror::Error;

/// Failures of the isolate and hide commands.
///
/// Empty selections and empty hide-sets are not errors; they are reported
/// as [`Outcome::Skipped`](crate::Outcome::Skipped) with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolateError {
    #[error("edit action failed: {0}")]
    Action(#[from] EditActionError),
}

/// Failures reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}
