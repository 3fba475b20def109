//! Shared types for netpilot.
//!
//! Holds the diagnosis data model (context and per-stage outputs), the error
//! type, and the best-effort parsers for ping and traceroute output.

pub mod context;
pub mod error;
pub mod findings;
pub mod parsers;
pub mod probe;
pub mod stage;

pub use context::PipelineContext;
pub use error::{NetpilotError, Result};
pub use findings::{
    AnalysisOutput, DiagnosisReport, ExecutionOutput, ExecutionResults, Findings, HealthStatus,
    Priority, ProbeResult, ReportDetails, StrategyPlan, TraceResult, ValidationResult,
};
pub use probe::{ProbeKind, RawProbeOutput};
pub use stage::Stage;

/// Target probed when none is given.
pub const DEFAULT_TARGET: &str = "8.8.8.8";

/// Issue description used when none is given.
pub const DEFAULT_ISSUE: &str = "general health check";
