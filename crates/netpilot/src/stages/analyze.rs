//! Analyze: ping the target and classify the link.

use crate::config::{NetpilotConfig, ThresholdConfig};
use crate::probe_runner::ProbeRunner;
use chrono::Utc;
use netpilot_shared::parsers::{has_loss_summary, parse_ping};
use netpilot_shared::{
    AnalysisOutput, Findings, HealthStatus, ProbeKind, ProbeResult, RawProbeOutput, Stage,
};
use tracing::{info, warn};

pub const ANALYSIS_RECOMMENDATION: &str = "Proceed with detailed route analysis";

/// Degraded when loss is strictly above the threshold
pub fn classify(packet_loss_percent: f64, thresholds: &ThresholdConfig) -> HealthStatus {
    if packet_loss_percent > thresholds.degraded_loss_percent {
        HealthStatus::Degraded
    } else {
        HealthStatus::Normal
    }
}

/// Fold raw ping output into a probe result.
///
/// A probe that never ran, or exited non-zero without a loss summary we can
/// read, counts as total loss.
pub fn probe_result_from(raw: &RawProbeOutput) -> ProbeResult {
    if let Some(err) = &raw.error {
        return ProbeResult::unreachable(err.clone());
    }

    let mut result = parse_ping(&raw.stdout);
    result.reachable = raw.exit_code == 0;
    if !result.reachable && !has_loss_summary(&raw.stdout) {
        result.packet_loss_percent = 100.0;
        result.error_message = Some(format!(
            "ping exited with status {} without a loss summary",
            raw.exit_code
        ));
    }
    result
}

pub fn findings_from(result: &ProbeResult, thresholds: &ThresholdConfig) -> Findings {
    Findings {
        packet_loss_percent: result.packet_loss_percent,
        average_latency_ms: result.average_latency_ms,
        status: classify(result.packet_loss_percent, thresholds),
        reachable: result.reachable,
        error_message: result.error_message.clone(),
    }
}

pub async fn run(target: &str, runner: &dyn ProbeRunner, config: &NetpilotConfig) -> AnalysisOutput {
    let probe = ProbeKind::Ping {
        count: config.probes.ping_count,
    };
    let raw = runner.run(probe, target, config.probes.ping_timeout()).await;
    let result = probe_result_from(&raw);

    if let Some(err) = &result.error_message {
        warn!("Ping to {} failed: {}", target, err);
    }

    let findings = findings_from(&result, &config.thresholds);
    info!(
        "Analyze: loss={}% latency={}ms status={}",
        findings.packet_loss_percent, findings.average_latency_ms, findings.status
    );

    AnalysisOutput {
        agent: Stage::Analyze.agent().to_string(),
        timestamp: Utc::now(),
        findings,
        recommendation: ANALYSIS_RECOMMENDATION.to_string(),
    }
}
