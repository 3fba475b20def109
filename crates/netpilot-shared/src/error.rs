//! Error types for netpilot.
//!
//! Probe and parse failures are never errors: they are folded into the stage
//! outputs as degraded data. What remains here are context contract
//! violations and environment failures around configuration and the report
//! artifact.

use crate::stage::Stage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetpilotError {
    #[error("Stage '{0}' already recorded its output")]
    StageAlreadyRecorded(Stage),

    #[error("Stage '{0}' has not produced its output yet")]
    MissingStageOutput(Stage),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write report to {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetpilotError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NetpilotError::ArtifactWrite { .. } => 3,
            NetpilotError::Config(_) => 2,
            NetpilotError::StageAlreadyRecorded(_)
            | NetpilotError::MissingStageOutput(_)
            | NetpilotError::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, NetpilotError>;
