//! Stage outputs and the normalized probe findings they carry.
//!
//! Every output is created once by its stage and never modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Probe findings
// ============================================================================

/// Normalized result of one ping run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbeResult {
    pub packet_loss_percent: f64,
    pub average_latency_ms: f64,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProbeResult {
    /// Result for a target that could not be probed at all
    pub fn unreachable(error_message: impl Into<String>) -> Self {
        Self {
            packet_loss_percent: 100.0,
            average_latency_ms: 0.0,
            reachable: false,
            error_message: Some(error_message.into()),
        }
    }
}

/// Normalized result of one traceroute run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceResult {
    pub success: bool,
    pub hop_count: usize,
    pub output_lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Analyze
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Normal,
    Degraded,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "normal",
            HealthStatus::Degraded => "degraded",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub packet_loss_percent: f64,
    pub average_latency_ms: f64,
    pub status: HealthStatus,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    pub findings: Findings,
    pub recommendation: String,
}

// ============================================================================
// Plan
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPlan {
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    pub strategy: String,
    pub steps: Vec<String>,
    pub priority: Priority,
}

// ============================================================================
// Execute
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResults {
    pub traceroute: TraceResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    pub commands_run: Vec<String>,
    pub results: ExecutionResults,
}

// ============================================================================
// Validate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    pub validated: bool,
    pub confidence: f64,
    pub issues_found: Vec<String>,
}

// ============================================================================
// Report
// ============================================================================

/// Copies of the four stage outputs the report was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub analysis: AnalysisOutput,
    pub planning: StrategyPlan,
    pub execution: ExecutionOutput,
    pub validation: ValidationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub details: ReportDetails,
    pub recommendations: Vec<String>,
}
