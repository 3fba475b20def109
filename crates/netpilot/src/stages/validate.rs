//! Validate: score confidence in the execution results.
//!
//! Only the traceroute outcome is checked. `validated` stays true; a failed
//! trace lowers confidence and records an issue.

use crate::config::ValidationConfig;
use chrono::Utc;
use netpilot_shared::{ExecutionOutput, Stage, ValidationResult};
use tracing::info;

pub const TRACEROUTE_FAILED: &str = "Traceroute execution failed";

pub fn run(execution: &ExecutionOutput, config: &ValidationConfig) -> ValidationResult {
    let mut issues_found = Vec::new();
    let mut confidence = config.baseline_confidence;

    if !execution.results.traceroute.success {
        issues_found.push(TRACEROUTE_FAILED.to_string());
        confidence = config.failed_confidence;
    }

    info!("Validate: confidence={} issues={}", confidence, issues_found.len());

    ValidationResult {
        agent: Stage::Validate.agent().to_string(),
        timestamp: Utc::now(),
        validated: true,
        confidence,
        issues_found,
    }
}
