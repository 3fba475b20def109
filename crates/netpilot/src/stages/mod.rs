//! Stage dispatch.
//!
//! Each stage reads the slots written before it, computes its output and
//! records it into the context. The set of stages is closed; `run_stage`
//! matches on all five.

pub mod analyze;
pub mod execute;
pub mod plan;
pub mod report;
pub mod validate;

use crate::config::NetpilotConfig;
use crate::probe_runner::ProbeRunner;
use netpilot_shared::{PipelineContext, Result, Stage};

/// Longest strategy prefix shown in the one-line headline
const HEADLINE_STRATEGY_CHARS: usize = 60;

pub async fn run_stage(
    stage: Stage,
    ctx: &mut PipelineContext,
    runner: &dyn ProbeRunner,
    config: &NetpilotConfig,
) -> Result<()> {
    match stage {
        Stage::Analyze => {
            let output = analyze::run(&ctx.target, runner, config).await;
            ctx.record_analysis(output)
        }
        Stage::Plan => {
            let output = plan::run(&ctx.analysis()?.findings, &config.thresholds);
            ctx.record_plan(output)
        }
        Stage::Execute => {
            let output = execute::run(&ctx.target, ctx.plan()?, runner, &config.probes).await;
            ctx.record_execution(output)
        }
        Stage::Validate => {
            let output = validate::run(ctx.execution()?, &config.validation);
            ctx.record_validation(output)
        }
        Stage::Report => {
            let output = report::run(ctx, &config.thresholds)?;
            ctx.record_report(output)
        }
    }
}

/// One-line human summary of a recorded stage output
pub fn headline(stage: Stage, ctx: &PipelineContext) -> Result<String> {
    let line = match stage {
        Stage::Analyze => format!("Status: {}", ctx.analysis()?.findings.status),
        Stage::Plan => {
            let strategy: String = ctx
                .plan()?
                .strategy
                .chars()
                .take(HEADLINE_STRATEGY_CHARS)
                .collect();
            format!("Strategy: {}...", strategy)
        }
        Stage::Execute => format!("Commands executed: {}", ctx.execution()?.commands_run.len()),
        Stage::Validate => format!("Confidence: {:.0}%", ctx.validation()?.confidence * 100.0),
        Stage::Report => {
            ctx.report()?;
            "Report generated".to_string()
        }
    };
    Ok(line)
}
