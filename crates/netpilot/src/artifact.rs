//! Diagnosis artifact writer.
//!
//! The final context is written once as pretty JSON into a timestamped file.
//! This is the only step whose failure aborts a run.

use chrono::Local;
use netpilot_shared::{NetpilotError, PipelineContext, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `network_diagnosis_<YYYYmmdd_HHMMSS>.json`, stamped with the run's local start time
pub fn artifact_file_name(ctx: &PipelineContext) -> String {
    let local = ctx.start_time.with_timezone(&Local);
    format!("network_diagnosis_{}.json", local.format("%Y%m%d_%H%M%S"))
}

pub fn write_artifact(ctx: &PipelineContext, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(artifact_file_name(ctx));
    let json = serde_json::to_string_pretty(ctx)?;

    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, json))
        .map_err(|source| NetpilotError::ArtifactWrite {
            path: path.clone(),
            source,
        })?;

    info!("Diagnosis written to {}", path.display());
    Ok(path)
}
