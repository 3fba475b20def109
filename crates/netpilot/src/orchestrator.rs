//! Diagnosis Orchestration
//!
//! Flow: Analyze -> Plan -> Execute -> Validate -> Report -> Done
//!
//! Invariants:
//! - Each stage runs exactly once, in order, on a single task
//! - Probe failures are data inside stage outputs; they never stop the run
//! - A returned context always holds all five stage outputs

use crate::config::NetpilotConfig;
use crate::probe_runner::ProbeRunner;
use crate::stages;
use netpilot_shared::{PipelineContext, Result, Stage};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Progress notification emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    PipelineStarted { issue: String, target: String },
    StageStarted { stage: Stage },
    StageCompleted { stage: Stage, headline: String },
    PipelineFinished { elapsed_ms: u64 },
}

/// Receives progress events (console rendering, tests)
pub trait StageObserver: Send + Sync {
    fn on_event(&self, event: &StageEvent);
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn on_event(&self, _event: &StageEvent) {}
}

pub struct Orchestrator {
    config: NetpilotConfig,
    runner: Arc<dyn ProbeRunner>,
    observer: Arc<dyn StageObserver>,
}

impl Orchestrator {
    pub fn new(config: NetpilotConfig, runner: Arc<dyn ProbeRunner>) -> Self {
        Self {
            config,
            runner,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &NetpilotConfig {
        &self.config
    }

    /// Build the initial context, filling blank issue/target from config
    pub fn initial_context(&self, issue: Option<&str>, target: Option<&str>) -> PipelineContext {
        let issue = non_blank(issue).unwrap_or(self.config.defaults.issue.as_str());
        let target = non_blank(target).unwrap_or(self.config.defaults.target.as_str());
        PipelineContext::new(issue, target)
    }

    /// Run the full pipeline once and return the completed context
    pub async fn run(&self, issue: Option<&str>, target: Option<&str>) -> Result<PipelineContext> {
        let ctx = self.initial_context(issue, target);
        self.run_context(ctx).await
    }

    /// Drive an already-built context through every stage it has not seen
    pub async fn run_context(&self, mut ctx: PipelineContext) -> Result<PipelineContext> {
        let start = Instant::now();
        info!("Starting diagnosis of {} ({})", ctx.target, ctx.issue);
        self.observer.on_event(&StageEvent::PipelineStarted {
            issue: ctx.issue.clone(),
            target: ctx.target.clone(),
        });

        let mut next = Some(Stage::Analyze);
        while let Some(stage) = next {
            if ctx.has_output(stage) {
                debug!("Stage {} already recorded, skipping", stage);
            } else {
                debug!("{} Agent starting: {}", stage.agent(), stage.role());
                self.observer.on_event(&StageEvent::StageStarted { stage });
                stages::run_stage(stage, &mut ctx, self.runner.as_ref(), &self.config).await?;
                let headline = stages::headline(stage, &ctx)?;
                debug!("Stage {} done: {}", stage, headline);
                self.observer
                    .on_event(&StageEvent::StageCompleted { stage, headline });
            }
            next = stage.next();
        }

        ctx.mark_completed();
        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!("Diagnosis of {} finished in {}ms", ctx.target, elapsed_ms);
        self.observer
            .on_event(&StageEvent::PipelineFinished { elapsed_ms });
        Ok(ctx)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe_runner::FakeProbeRunner;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<StageEvent>>,
    }

    impl StageObserver for RecordingObserver {
        fn on_event(&self, event: &StageEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_initial_context_defaults() {
        let orch = Orchestrator::new(NetpilotConfig::default(), Arc::new(FakeProbeRunner::new()));
        let ctx = orch.initial_context(None, Some("   "));
        assert_eq!(ctx.issue, "general health check");
        assert_eq!(ctx.target, "8.8.8.8");

        let ctx = orch.initial_context(Some("dropped calls"), Some(" 10.1.1.1 "));
        assert_eq!(ctx.issue, "dropped calls");
        assert_eq!(ctx.target, "10.1.1.1");
    }

    #[tokio::test]
    async fn test_run_completes_every_stage() {
        let fake = Arc::new(FakeProbeRunner::new());
        let orch = Orchestrator::new(NetpilotConfig::default(), fake.clone());
        let ctx = orch.run(Some("slow"), Some("example.com")).await.unwrap();

        assert!(ctx.is_complete());
        assert!(ctx.completed_at().is_some());
        assert_eq!(
            fake.calls(),
            vec![
                ("ping".to_string(), "example.com".to_string()),
                ("traceroute".to_string(), "example.com".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_events_follow_stage_order() {
        let observer = Arc::new(RecordingObserver::default());
        let orch = Orchestrator::new(NetpilotConfig::default(), Arc::new(FakeProbeRunner::new()))
            .with_observer(observer.clone());
        orch.run(None, None).await.unwrap();

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 12);
        assert!(matches!(events[0], StageEvent::PipelineStarted { .. }));
        let completed: Vec<Stage> = events
            .iter()
            .filter_map(|e| match e {
                StageEvent::StageCompleted { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(completed, Stage::ALL.to_vec());
        assert!(matches!(events[11], StageEvent::PipelineFinished { .. }));
    }

    #[tokio::test]
    async fn test_run_context_resumes_partial_context() {
        let fake = Arc::new(FakeProbeRunner::new());
        let orch = Orchestrator::new(NetpilotConfig::default(), fake.clone());

        let mut ctx = orch.initial_context(None, Some("h"));
        stages::run_stage(Stage::Analyze, &mut ctx, fake.as_ref(), orch.config())
            .await
            .unwrap();
        let ctx = orch.run_context(ctx).await.unwrap();

        assert!(ctx.is_complete());
        assert_eq!(fake.call_count("ping"), 1);
    }
}
