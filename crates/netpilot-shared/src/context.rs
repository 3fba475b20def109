//! Accumulating pipeline context.
//!
//! One slot per stage. A slot is written exactly once by its own stage and is
//! only read by stages that run after it, so every accessor either hands back
//! a recorded output or names the stage that has not run yet.

use crate::error::{NetpilotError, Result};
use crate::findings::{
    AnalysisOutput, DiagnosisReport, ExecutionOutput, StrategyPlan, ValidationResult,
};
use crate::stage::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineContext {
    pub issue: String,
    pub target: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    analysis: Option<AnalysisOutput>,
    #[serde(default)]
    plan: Option<StrategyPlan>,
    #[serde(default)]
    execution: Option<ExecutionOutput>,
    #[serde(default)]
    validation: Option<ValidationResult>,
    #[serde(default)]
    report: Option<DiagnosisReport>,
}

fn fill<T>(slot: &mut Option<T>, value: T, stage: Stage) -> Result<()> {
    if slot.is_some() {
        return Err(NetpilotError::StageAlreadyRecorded(stage));
    }
    *slot = Some(value);
    Ok(())
}

fn read<T>(slot: &Option<T>, stage: Stage) -> Result<&T> {
    slot.as_ref().ok_or(NetpilotError::MissingStageOutput(stage))
}

impl PipelineContext {
    pub fn new(issue: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            target: target.into(),
            start_time: Utc::now(),
            completed_at: None,
            analysis: None,
            plan: None,
            execution: None,
            validation: None,
            report: None,
        }
    }

    pub fn analysis(&self) -> Result<&AnalysisOutput> {
        read(&self.analysis, Stage::Analyze)
    }

    pub fn plan(&self) -> Result<&StrategyPlan> {
        read(&self.plan, Stage::Plan)
    }

    pub fn execution(&self) -> Result<&ExecutionOutput> {
        read(&self.execution, Stage::Execute)
    }

    pub fn validation(&self) -> Result<&ValidationResult> {
        read(&self.validation, Stage::Validate)
    }

    pub fn report(&self) -> Result<&DiagnosisReport> {
        read(&self.report, Stage::Report)
    }

    pub fn record_analysis(&mut self, output: AnalysisOutput) -> Result<()> {
        fill(&mut self.analysis, output, Stage::Analyze)
    }

    pub fn record_plan(&mut self, output: StrategyPlan) -> Result<()> {
        fill(&mut self.plan, output, Stage::Plan)
    }

    pub fn record_execution(&mut self, output: ExecutionOutput) -> Result<()> {
        fill(&mut self.execution, output, Stage::Execute)
    }

    pub fn record_validation(&mut self, output: ValidationResult) -> Result<()> {
        fill(&mut self.validation, output, Stage::Validate)
    }

    pub fn record_report(&mut self, output: DiagnosisReport) -> Result<()> {
        fill(&mut self.report, output, Stage::Report)
    }

    /// Whether the given stage has written its slot
    pub fn has_output(&self, stage: Stage) -> bool {
        match stage {
            Stage::Analyze => self.analysis.is_some(),
            Stage::Plan => self.plan.is_some(),
            Stage::Execute => self.execution.is_some(),
            Stage::Validate => self.validation.is_some(),
            Stage::Report => self.report.is_some(),
        }
    }

    /// Stages that have recorded output, in pipeline order
    pub fn completed_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .iter()
            .copied()
            .filter(|s| self.has_output(*s))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        Stage::ALL.iter().all(|s| self.has_output(*s))
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Stamp the end of the run. Later calls keep the first timestamp.
    pub fn mark_completed(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{Findings, HealthStatus, Priority};

    fn sample_analysis() -> AnalysisOutput {
        AnalysisOutput {
            agent: "Analyzer".to_string(),
            timestamp: Utc::now(),
            findings: Findings {
                packet_loss_percent: 0.0,
                average_latency_ms: 12.5,
                status: HealthStatus::Normal,
                reachable: true,
                error_message: None,
            },
            recommendation: "Proceed with detailed route analysis".to_string(),
        }
    }

    #[test]
    fn test_new_context_is_empty() {
        let ctx = PipelineContext::new("slow uploads", "10.0.0.1");
        assert_eq!(ctx.issue, "slow uploads");
        assert_eq!(ctx.target, "10.0.0.1");
        assert!(ctx.completed_stages().is_empty());
        assert!(!ctx.is_complete());
        assert!(ctx.completed_at().is_none());
    }

    #[test]
    fn test_record_then_read() {
        let mut ctx = PipelineContext::new("x", "y");
        ctx.record_analysis(sample_analysis()).unwrap();
        assert_eq!(ctx.analysis().unwrap().findings.average_latency_ms, 12.5);
        assert_eq!(ctx.completed_stages(), vec![Stage::Analyze]);
    }

    #[test]
    fn test_second_write_is_rejected_and_first_kept() {
        let mut ctx = PipelineContext::new("x", "y");
        ctx.record_analysis(sample_analysis()).unwrap();

        let mut other = sample_analysis();
        other.findings.average_latency_ms = 999.0;
        let err = ctx.record_analysis(other).unwrap_err();
        assert!(matches!(err, NetpilotError::StageAlreadyRecorded(Stage::Analyze)));
        assert_eq!(ctx.analysis().unwrap().findings.average_latency_ms, 12.5);
    }

    #[test]
    fn test_reading_unwritten_slot_names_stage() {
        let ctx = PipelineContext::new("x", "y");
        let err = ctx.plan().unwrap_err();
        assert!(matches!(err, NetpilotError::MissingStageOutput(Stage::Plan)));
    }

    #[test]
    fn test_plan_slot_independent_of_analysis() {
        let mut ctx = PipelineContext::new("x", "y");
        ctx.record_plan(StrategyPlan {
            agent: "Planner".to_string(),
            timestamp: Utc::now(),
            strategy: "Perform general health check and optimization".to_string(),
            steps: vec!["Baseline measurements".to_string()],
            priority: Priority::Medium,
        })
        .unwrap();
        assert!(ctx.has_output(Stage::Plan));
        assert!(!ctx.has_output(Stage::Analyze));
    }

    #[test]
    fn test_mark_completed_keeps_first_stamp() {
        let mut ctx = PipelineContext::new("x", "y");
        ctx.mark_completed();
        let first = ctx.completed_at();
        ctx.mark_completed();
        assert_eq!(ctx.completed_at(), first);
    }

    #[test]
    fn test_serializes_every_slot() {
        let ctx = PipelineContext::new("x", "y");
        let json = serde_json::to_value(&ctx).unwrap();
        for key in ["analysis", "plan", "execution", "validation", "report"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
