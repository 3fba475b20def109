//! Probe Runner Trait Abstraction
//!
//! The pipeline never shells out directly. It asks a `ProbeRunner` for raw
//! output and parses that. Production code uses `SystemProbeRunner`, which
//! spawns the real binaries; tests use `FakeProbeRunner` with canned output.
//!
//! A runner never returns an error. Missing binaries, spawn failures and
//! timeouts come back as `RawProbeOutput::environment_failure`.

use async_trait::async_trait;
use netpilot_shared::{ProbeKind, RawProbeOutput};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

// ============================================================================
// Probe Runner Trait
// ============================================================================

#[async_trait]
pub trait ProbeRunner: Send + Sync {
    /// Run one probe against `target`, returning within `limit`
    async fn run(&self, probe: ProbeKind, target: &str, limit: Duration) -> RawProbeOutput;
}

// ============================================================================
// System Probe Runner (Production)
// ============================================================================

/// Runs the real `ping` / `traceroute` binaries as child processes
#[derive(Debug, Clone)]
pub struct SystemProbeRunner {
    ping_program: String,
    traceroute_program: String,
}

impl SystemProbeRunner {
    /// Platform binaries: `ping`/`traceroute`, or `ping`/`tracert` on Windows
    pub fn new() -> Self {
        let traceroute = if cfg!(windows) { "tracert" } else { "traceroute" };
        Self::with_programs("ping", traceroute)
    }

    /// Use specific binaries (absolute paths or names on PATH)
    pub fn with_programs(ping: impl Into<String>, traceroute: impl Into<String>) -> Self {
        Self {
            ping_program: ping.into(),
            traceroute_program: traceroute.into(),
        }
    }

    /// Program and arguments for a probe on the current platform
    pub fn command_for(&self, probe: ProbeKind, target: &str) -> (String, Vec<String>) {
        match probe {
            ProbeKind::Ping { count } => {
                let flag = if cfg!(windows) { "-n" } else { "-c" };
                (
                    self.ping_program.clone(),
                    vec![flag.to_string(), count.to_string(), target.to_string()],
                )
            }
            ProbeKind::Traceroute { max_hops } => {
                let flag = if cfg!(windows) { "-h" } else { "-m" };
                (
                    self.traceroute_program.clone(),
                    vec![flag.to_string(), max_hops.to_string(), target.to_string()],
                )
            }
        }
    }
}

impl Default for SystemProbeRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeRunner for SystemProbeRunner {
    async fn run(&self, probe: ProbeKind, target: &str, limit: Duration) -> RawProbeOutput {
        if target.starts_with('-') {
            warn!("Refusing probe target that looks like an option: {}", target);
            return RawProbeOutput::environment_failure(
                format!("{} {}", probe.name(), target),
                format!("invalid target '{}': must not start with '-'", target),
            );
        }

        let (program, args) = self.command_for(probe, target);
        let cmdline = format!("{} {}", program, args.join(" "));
        let start = Instant::now();

        info!("Running probe: {}", cmdline);

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(c) => c,
            Err(e) => {
                warn!("Probe {} could not start: {}", program, e);
                return RawProbeOutput::environment_failure(
                    cmdline,
                    format!("failed to start {}: {}", program, e),
                )
                .with_timing(start.elapsed().as_millis() as u64);
            }
        };

        // Dropping the wait future on timeout kills the child (kill_on_drop)
        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let exit_code = output.status.code().unwrap_or(-1);
                let elapsed = start.elapsed().as_millis() as u64;
                debug!("Probe {} exited with {} after {}ms", cmdline, exit_code, elapsed);
                RawProbeOutput::completed(
                    cmdline,
                    String::from_utf8_lossy(&output.stdout).to_string(),
                    exit_code,
                )
                .with_timing(elapsed)
            }
            Ok(Err(e)) => {
                warn!("Probe {} failed while running: {}", cmdline, e);
                RawProbeOutput::environment_failure(cmdline, format!("probe i/o error: {}", e))
                    .with_timing(start.elapsed().as_millis() as u64)
            }
            Err(_) => {
                warn!("Probe timeout: {}", cmdline);
                RawProbeOutput::environment_failure(
                    cmdline,
                    format!("Probe timeout after {}s", limit.as_secs()),
                )
                .with_timing(limit.as_millis() as u64)
            }
        }
    }
}

// ============================================================================
// Fake Probe Runner (Testing)
// ============================================================================

/// Canned ping summary in iputils format
pub fn ping_fixture(target: &str, loss_percent: f64, avg_latency_ms: f64) -> String {
    let sent = 4;
    let received = ((100.0 - loss_percent) / 100.0 * sent as f64).round() as u32;
    let mut out = format!(
        "PING {target} ({target}) 56(84) bytes of data.\n\n--- {target} ping statistics ---\n\
         {sent} packets transmitted, {received} received, {loss_percent}% packet loss, time 3004ms\n"
    );
    if received > 0 {
        out.push_str(&format!(
            "rtt min/avg/max/mdev = {:.3}/{:.3}/{:.3}/0.250 ms\n",
            avg_latency_ms * 0.9,
            avg_latency_ms,
            avg_latency_ms * 1.1
        ));
    }
    out
}

/// Canned traceroute output with a header and `hops` hop lines
pub fn traceroute_fixture(target: &str, hops: usize) -> String {
    let mut out = format!("traceroute to {target} ({target}), 15 hops max, 60 byte packets\n");
    for hop in 1..=hops {
        out.push_str(&format!(
            "{:2}  hop{}.example.net (10.0.{}.1)  {}.100 ms  {}.090 ms  {}.080 ms\n",
            hop, hop, hop, hop, hop, hop
        ));
    }
    out
}

/// Fake runner with pre-configured responses per probe name
pub struct FakeProbeRunner {
    /// Map of probe name ("ping", "traceroute") -> response
    responses: HashMap<String, RawProbeOutput>,
    /// Returned for probes with no configured response
    default_response: RawProbeOutput,
    /// (probe name, target) per call, in order
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeProbeRunner {
    /// Healthy target: no loss, 10ms latency, traceroute succeeds
    pub fn new() -> Self {
        FakeProbeRunnerBuilder::new()
            .ping(ping_fixture("fake", 0.0, 10.0), 0)
            .traceroute(traceroute_fixture("fake", 6), 0)
            .build()
    }

    /// Ping reports the given loss and latency; traceroute succeeds
    pub fn with_ping(loss_percent: f64, avg_latency_ms: f64) -> Self {
        let exit_code = if loss_percent >= 100.0 { 1 } else { 0 };
        FakeProbeRunnerBuilder::new()
            .ping(ping_fixture("fake", loss_percent, avg_latency_ms), exit_code)
            .traceroute(traceroute_fixture("fake", 6), 0)
            .build()
    }

    /// Every probe fails in the environment (missing binary, timeout)
    pub fn all_failing(error_msg: &str) -> Self {
        FakeProbeRunnerBuilder::new()
            .default_response(RawProbeOutput::environment_failure("fake", error_msg))
            .build()
    }

    pub fn call_count(&self, probe_name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(name, _)| name == probe_name)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls().len()
    }

    /// Recorded (probe name, target) pairs
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for FakeProbeRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeRunner for FakeProbeRunner {
    async fn run(&self, probe: ProbeKind, target: &str, _limit: Duration) -> RawProbeOutput {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((probe.name().to_string(), target.to_string()));
        }

        let mut response = self
            .responses
            .get(probe.name())
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());
        response.command = format!("fake:{} {}", probe.name(), target);
        response
    }
}

// ============================================================================
// Builder for FakeProbeRunner
// ============================================================================

pub struct FakeProbeRunnerBuilder {
    responses: HashMap<String, RawProbeOutput>,
    default_response: RawProbeOutput,
}

impl FakeProbeRunnerBuilder {
    /// Builder with no responses; unconfigured probes fail as missing binaries
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: RawProbeOutput::environment_failure(
                "fake",
                "no fake response configured",
            ),
        }
    }

    pub fn response(mut self, probe_name: &str, output: RawProbeOutput) -> Self {
        self.responses.insert(probe_name.to_string(), output);
        self
    }

    pub fn ping(self, stdout: impl Into<String>, exit_code: i32) -> Self {
        self.response("ping", RawProbeOutput::completed("fake", stdout, exit_code))
    }

    pub fn traceroute(self, stdout: impl Into<String>, exit_code: i32) -> Self {
        self.response("traceroute", RawProbeOutput::completed("fake", stdout, exit_code))
    }

    pub fn default_response(mut self, output: RawProbeOutput) -> Self {
        self.default_response = output;
        self
    }

    pub fn build(self) -> FakeProbeRunner {
        FakeProbeRunner {
            responses: self.responses,
            default_response: self.default_response,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for FakeProbeRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
