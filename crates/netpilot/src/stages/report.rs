//! Report: aggregate the run into a summary and recommendations.

use crate::config::ThresholdConfig;
use chrono::Utc;
use netpilot_shared::{DiagnosisReport, HealthStatus, PipelineContext, ReportDetails, Result, Stage};
use tracing::info;

pub const REC_CRITICAL: &str = "Critical: Investigate packet loss - possible link failure";
pub const REC_WARNING: &str = "Warning: Monitor intermittent packet loss";
pub const REC_NORMAL: &str = "Network operating normally - continue monitoring";
pub const REC_SCHEDULE: &str = "Schedule regular automated diagnostics";

pub fn summary(status: HealthStatus) -> String {
    format!(
        "Network status: {}. Automated diagnosis completed with multi-agent analysis.",
        status
    )
}

/// Severity line for the measured loss, then the standing schedule advice
pub fn recommendations(loss: f64, t: &ThresholdConfig) -> Vec<String> {
    let severity = if loss > t.critical_loss_percent {
        REC_CRITICAL
    } else if loss > t.degraded_loss_percent {
        REC_WARNING
    } else {
        REC_NORMAL
    };

    vec![severity.to_string(), REC_SCHEDULE.to_string()]
}

pub fn run(ctx: &PipelineContext, thresholds: &ThresholdConfig) -> Result<DiagnosisReport> {
    let details = ReportDetails {
        analysis: ctx.analysis()?.clone(),
        planning: ctx.plan()?.clone(),
        execution: ctx.execution()?.clone(),
        validation: ctx.validation()?.clone(),
    };

    let findings = &details.analysis.findings;
    let report = DiagnosisReport {
        agent: Stage::Report.agent().to_string(),
        timestamp: Utc::now(),
        summary: summary(findings.status),
        recommendations: recommendations(findings.packet_loss_percent, thresholds),
        details,
    };

    info!("Report: {} recommendations", report.recommendations.len());
    Ok(report)
}
