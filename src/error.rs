use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems detected before any log line is read.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(String),

    #[error("unknown profile: server name {server_name:?}, server type {server_type:?}")]
    UnknownProfile {
        server_name: String,
        server_type: String,
    },

    #[error("log directory not found: {}", .0.display())]
    MissingInput(PathBuf),
}
