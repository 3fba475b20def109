//! Output formatting - ASCII-only terminal output
//!
//! Human-facing only; nothing here is a contract for downstream consumers.

use crate::orchestrator::{StageEvent, StageObserver};
use netpilot_shared::{PipelineContext, Stage};
use owo_colors::OwoColorize;
use std::path::Path;

pub const SEPARATOR: &str = "============================================================";

fn progress_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Analyze => "Examining network data...",
        Stage::Plan => "Developing strategy...",
        Stage::Execute => "Running diagnostics...",
        Stage::Validate => "Verifying results...",
        Stage::Report => "Generating report...",
    }
}

/// Prints the numbered per-stage progress lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl StageObserver for ConsoleObserver {
    fn on_event(&self, event: &StageEvent) {
        match event {
            StageEvent::PipelineStarted { issue, target } => {
                println!();
                println!("{}", "Starting automated network troubleshooting".bold());
                println!("Issue:  {}", issue);
                println!("Target: {}", target.cyan());
                println!();
            }
            StageEvent::StageStarted { stage } => {
                println!(
                    "{}. {} Agent: {}",
                    stage.ordinal(),
                    stage.agent(),
                    progress_label(*stage)
                );
            }
            StageEvent::StageCompleted { headline, .. } => {
                println!("   [OK] {}", headline.green());
                println!();
            }
            StageEvent::PipelineFinished { .. } => {}
        }
    }
}

/// FINAL REPORT block: summary and numbered recommendations
pub fn display_final_report(ctx: &PipelineContext) {
    let report = match ctx.report() {
        Ok(r) => r,
        Err(e) => {
            display_error(&e.to_string());
            return;
        }
    };

    println!("{}", SEPARATOR);
    println!("{}", "FINAL REPORT".bold());
    println!("{}", SEPARATOR);
    println!();
    println!("Summary: {}", report.summary);
    println!();
    println!("Recommendations:");
    for (i, rec) in report.recommendations.iter().enumerate() {
        if rec.starts_with("Critical") {
            println!("  {}. {}", i + 1, rec.bright_red());
        } else if rec.starts_with("Warning") {
            println!("  {}. {}", i + 1, rec.yellow());
        } else {
            println!("  {}. {}", i + 1, rec);
        }
    }
    println!();
    println!("{}", SEPARATOR);
}

pub fn display_saved(path: &Path) {
    println!();
    println!("[SAVED] Detailed results saved to: {}", path.display());
}

/// Same as `display_saved`, on stderr, for when stdout carries JSON
pub fn display_saved_stderr(path: &Path) {
    eprintln!("[SAVED] Detailed results saved to: {}", path.display());
}

pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("[ERROR] {}", message.red());
    eprintln!();
}
