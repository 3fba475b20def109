//! netpilot - automated network-fault diagnosis.
//!
//! A fixed five-stage pipeline (Analyze, Plan, Execute, Validate, Report)
//! over an accumulating context. Probes go through the `ProbeRunner` trait so
//! the whole pipeline runs against canned output in tests.

pub mod artifact;
pub mod config;
pub mod orchestrator;
pub mod output;
pub mod probe_runner;
pub mod stages;

pub use config::NetpilotConfig;
pub use orchestrator::{NoopObserver, Orchestrator, StageEvent, StageObserver};
pub use probe_runner::{FakeProbeRunner, FakeProbeRunnerBuilder, ProbeRunner, SystemProbeRunner};
