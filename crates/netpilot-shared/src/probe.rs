//! Probe requests and raw probe output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exit code reported when the probe never produced a real exit status
/// (binary missing, spawn failure, timeout).
pub const ENVIRONMENT_FAILURE_EXIT_CODE: i32 = -1;

/// External diagnostic command the pipeline can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeKind {
    Ping { count: u32 },
    Traceroute { max_hops: u32 },
}

impl ProbeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::Ping { .. } => "ping",
            ProbeKind::Traceroute { .. } => "traceroute",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Captured output of one probe invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProbeOutput {
    pub command: String,
    pub stdout: String,
    pub exit_code: i32,
    /// Set when the probe could not run to completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timing_ms: u64,
}

impl RawProbeOutput {
    pub fn completed(command: impl Into<String>, stdout: impl Into<String>, exit_code: i32) -> Self {
        Self {
            command: command.into(),
            stdout: stdout.into(),
            exit_code,
            error: None,
            timing_ms: 0,
        }
    }

    /// Sentinel result for a probe that could not run (missing binary, timeout)
    pub fn environment_failure(command: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stdout: String::new(),
            exit_code: ENVIRONMENT_FAILURE_EXIT_CODE,
            error: Some(error.into()),
            timing_ms: 0,
        }
    }

    pub fn with_timing(mut self, timing_ms: u64) -> Self {
        self.timing_ms = timing_ms;
        self
    }

    pub fn is_environment_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.exit_code == 0
    }
}
