//! Execute: trace the route to the target.
//!
//! The plan is read but does not pick the command. A fixed traceroute runs
//! whatever the plan's steps say.

use crate::config::ProbeConfig;
use crate::probe_runner::ProbeRunner;
use chrono::Utc;
use netpilot_shared::parsers::parse_traceroute;
use netpilot_shared::{
    ExecutionOutput, ExecutionResults, ProbeKind, RawProbeOutput, Stage, StrategyPlan, TraceResult,
};
use tracing::{debug, info, warn};

pub fn trace_result_from(raw: &RawProbeOutput) -> TraceResult {
    match &raw.error {
        Some(err) => TraceResult {
            success: false,
            hop_count: 0,
            output_lines: Vec::new(),
            error: Some(err.clone()),
        },
        None => parse_traceroute(&raw.stdout, raw.exit_code),
    }
}

pub async fn run(
    target: &str,
    plan: &StrategyPlan,
    runner: &dyn ProbeRunner,
    probes: &ProbeConfig,
) -> ExecutionOutput {
    debug!(
        "Plan lists {} steps ({} priority); running traceroute",
        plan.steps.len(),
        plan.priority
    );

    let probe = ProbeKind::Traceroute {
        max_hops: probes.traceroute_max_hops,
    };
    let raw = runner.run(probe, target, probes.traceroute_timeout()).await;
    let traceroute = trace_result_from(&raw);

    if traceroute.success {
        info!("Execute: traceroute to {} saw {} lines", target, traceroute.hop_count);
    } else {
        warn!(
            "Execute: traceroute to {} failed (exit {}): {}",
            target,
            raw.exit_code,
            traceroute.error.as_deref().unwrap_or("non-zero exit")
        );
    }

    ExecutionOutput {
        agent: Stage::Execute.agent().to_string(),
        timestamp: Utc::now(),
        commands_run: vec![probe.name().to_string()],
        results: ExecutionResults { traceroute },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe_runner::{traceroute_fixture, FakeProbeRunner, FakeProbeRunnerBuilder};
    use netpilot_shared::Priority;

    fn plan() -> StrategyPlan {
        StrategyPlan {
            agent: "Planner".to_string(),
            timestamp: Utc::now(),
            strategy: "Address high latency - analyze routing hops and bandwidth".to_string(),
            steps: vec!["Measure bandwidth utilization".to_string()],
            priority: Priority::High,
        }
    }

    #[test]
    fn test_environment_failure_carries_error() {
        let raw = RawProbeOutput::environment_failure("traceroute", "Probe timeout after 30s");
        let r = trace_result_from(&raw);
        assert!(!r.success);
        assert_eq!(r.hop_count, 0);
        assert!(r.output_lines.is_empty());
        assert_eq!(r.error.as_deref(), Some("Probe timeout after 30s"));
    }

    #[tokio::test]
    async fn test_run_always_traceroute() {
        let fake = FakeProbeRunner::new();
        let out = run("1.1.1.1", &plan(), &fake, &ProbeConfig::default()).await;

        assert_eq!(out.agent, "Executor");
        assert_eq!(out.commands_run, vec!["traceroute".to_string()]);
        assert!(out.results.traceroute.success);
        // header + 6 hops
        assert_eq!(out.results.traceroute.hop_count, 7);
        assert_eq!(fake.call_count("traceroute"), 1);
        assert_eq!(fake.call_count("ping"), 0);
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_unsuccessful() {
        let fake = FakeProbeRunnerBuilder::new()
            .traceroute(traceroute_fixture("h", 3), 1)
            .build();
        let out = run("h", &plan(), &fake, &ProbeConfig::default()).await;
        assert!(!out.results.traceroute.success);
        assert_eq!(out.results.traceroute.hop_count, 4);
        assert!(out.results.traceroute.error.is_none());
    }
}
