//! Configuration management for netpilot.
//!
//! Loads settings from a TOML file or uses defaults. Every field has a serde
//! default, so a partial file only overrides what it names.

use netpilot_shared::{NetpilotError, Result, DEFAULT_ISSUE, DEFAULT_TARGET};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming a config file to use when `--config` is absent
pub const CONFIG_ENV_VAR: &str = "NETPILOT_CONFIG";

/// Values used when the invocation leaves issue or target out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default = "default_issue")]
    pub issue: String,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_issue() -> String {
    DEFAULT_ISSUE.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            issue: default_issue(),
        }
    }
}

/// Probe invocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Echo requests sent by the Analyze ping
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_secs: u64,

    #[serde(default = "default_traceroute_timeout")]
    pub traceroute_timeout_secs: u64,

    #[serde(default = "default_max_hops")]
    pub traceroute_max_hops: u32,
}

fn default_ping_count() -> u32 {
    4
}

fn default_ping_timeout() -> u64 {
    10
}

fn default_traceroute_timeout() -> u64 {
    30
}

fn default_max_hops() -> u32 {
    15
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ping_count: default_ping_count(),
            ping_timeout_secs: default_ping_timeout(),
            traceroute_timeout_secs: default_traceroute_timeout(),
            traceroute_max_hops: default_max_hops(),
        }
    }
}

impl ProbeConfig {
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }

    pub fn traceroute_timeout(&self) -> Duration {
        Duration::from_secs(self.traceroute_timeout_secs)
    }
}

/// Classification thresholds. All comparisons are strict (`>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Loss above this marks the target degraded
    #[serde(default = "default_degraded_loss")]
    pub degraded_loss_percent: f64,

    /// Loss above this is critical and forces high priority
    #[serde(default = "default_critical_loss")]
    pub critical_loss_percent: f64,

    /// Latency above this forces high priority
    #[serde(default = "default_high_latency")]
    pub high_latency_ms: f64,

    /// Latency above this adds the bandwidth/QoS steps
    #[serde(default = "default_elevated_latency")]
    pub elevated_latency_ms: f64,
}

fn default_degraded_loss() -> f64 {
    5.0
}

fn default_critical_loss() -> f64 {
    20.0
}

fn default_high_latency() -> f64 {
    200.0
}

fn default_elevated_latency() -> f64 {
    100.0
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            degraded_loss_percent: default_degraded_loss(),
            critical_loss_percent: default_critical_loss(),
            high_latency_ms: default_high_latency(),
            elevated_latency_ms: default_elevated_latency(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_baseline_confidence")]
    pub baseline_confidence: f64,

    /// Confidence when the traceroute did not succeed
    #[serde(default = "default_failed_confidence")]
    pub failed_confidence: f64,
}

fn default_baseline_confidence() -> f64 {
    0.85
}

fn default_failed_confidence() -> f64 {
    0.5
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            baseline_confidence: default_baseline_confidence(),
            failed_confidence: default_failed_confidence(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the diagnosis JSON is written into
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetpilotConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub probes: ProbeConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl NetpilotConfig {
    /// Resolve the configuration for one run.
    ///
    /// An explicit path must load; a path from the environment falls back to
    /// defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(Path::new(&path)).or_else(|e| {
                warn!("Ignoring {}: {}", CONFIG_ENV_VAR, e);
                Ok(Self::default())
            }),
            None => Ok(Self::default()),
        }
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NetpilotError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| NetpilotError::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
