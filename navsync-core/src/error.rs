//! Error types shared by the navsync crates.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavsyncError {
    #[error("config parsing error: {0}")]
    Config(#[source] serde_json::Error),
    #[error("project data parse error: {0}")]
    ProjectData(#[source] serde_json::Error),
    #[error("unknown theme value `{0}`")]
    InvalidTheme(String),
    #[error("preference storage error: {0}")]
    Storage(String),
}

pub type Result<T, E = NavsyncError> = std::result::Result<T, E>;
