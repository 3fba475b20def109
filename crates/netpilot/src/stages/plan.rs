//! Plan: pick a remediation strategy and troubleshooting steps.
//!
//! Strategy selection is first-match over an ordered table. Step generation
//! is additive: the loss branch and the latency branch each append their own
//! steps, and the baseline pair is used only when neither fires.

use crate::config::ThresholdConfig;
use chrono::Utc;
use netpilot_shared::{Findings, Priority, Stage, StrategyPlan};
use tracing::info;

pub const STRATEGY_PACKET_LOSS: &str =
    "Focus on packet loss - check route, interfaces, and network congestion";
pub const STRATEGY_HIGH_LATENCY: &str = "Address high latency - analyze routing hops and bandwidth";
pub const STRATEGY_INTERMITTENT_LOSS: &str =
    "Investigate intermittent packet loss - monitor for patterns";
pub const STRATEGY_GENERAL: &str = "Perform general health check and optimization";

pub const LOSS_STEPS: [&str; 3] = [
    "Run traceroute to identify problem hop",
    "Check interface statistics for errors",
    "Analyze recent network changes",
];

pub const LATENCY_STEPS: [&str; 3] = [
    "Measure bandwidth utilization",
    "Check for routing loops",
    "Verify QoS policies",
];

pub const BASELINE_STEPS: [&str; 2] = ["Baseline measurements", "Continuous monitoring"];

pub fn strategy(loss: f64, latency: f64, t: &ThresholdConfig) -> &'static str {
    if loss > t.critical_loss_percent {
        STRATEGY_PACKET_LOSS
    } else if latency > t.high_latency_ms {
        STRATEGY_HIGH_LATENCY
    } else if loss > t.degraded_loss_percent {
        STRATEGY_INTERMITTENT_LOSS
    } else {
        STRATEGY_GENERAL
    }
}

pub fn steps(loss: f64, latency: f64, t: &ThresholdConfig) -> Vec<String> {
    let mut steps: Vec<String> = Vec::new();

    if loss > t.degraded_loss_percent {
        steps.extend(LOSS_STEPS.iter().map(|s| s.to_string()));
    }
    if latency > t.elevated_latency_ms {
        steps.extend(LATENCY_STEPS.iter().map(|s| s.to_string()));
    }
    if steps.is_empty() {
        steps.extend(BASELINE_STEPS.iter().map(|s| s.to_string()));
    }

    steps
}

pub fn priority(loss: f64, latency: f64, t: &ThresholdConfig) -> Priority {
    if loss > t.critical_loss_percent || latency > t.high_latency_ms {
        Priority::High
    } else {
        Priority::Medium
    }
}

pub fn run(findings: &Findings, thresholds: &ThresholdConfig) -> StrategyPlan {
    let loss = findings.packet_loss_percent;
    let latency = findings.average_latency_ms;

    let plan = StrategyPlan {
        agent: Stage::Plan.agent().to_string(),
        timestamp: Utc::now(),
        strategy: strategy(loss, latency, thresholds).to_string(),
        steps: steps(loss, latency, thresholds),
        priority: priority(loss, latency, thresholds),
    };
    info!("Plan: priority={} steps={}", plan.priority, plan.steps.len());
    plan
}
