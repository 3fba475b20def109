//! Property-based tests for the decision rules.
//!
//! Randomized inputs from a small xorshift generator; no external
//! property-testing crate.
//!
//! ## Invariants Tested
//!
//! - status is degraded exactly when loss exceeds the degraded threshold
//! - priority is high exactly when loss or latency crosses its high bound
//! - plan steps are the union of triggered groups, baseline only when none fire
//! - validation confidence is one of two values, keyed on traceroute success
//! - the ping parser never panics and stays within range on arbitrary input
//! - the report always closes with the schedule recommendation

use chrono::Utc;
use netpilot::config::{ThresholdConfig, ValidationConfig};
use netpilot::stages::{analyze, plan, report, validate};
use netpilot_shared::parsers::{parse_ping, parse_traceroute, MAX_TRACE_LINES};
use netpilot_shared::{
    ExecutionOutput, ExecutionResults, HealthStatus, Priority, TraceResult,
};

const ITERATIONS: usize = 1000;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// xorshift64 pseudo-random generator
struct TestRng {
    state: u64,
}

impl TestRng {
    fn new(seed: u64) -> Self {
        Self { state: if seed == 0 { 1 } else { seed } }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }

    fn next_range(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + (self.next_u64() % (max - min))
    }

    /// Loss in [0, 100], biased toward the threshold boundaries
    fn next_loss(&mut self) -> f64 {
        match self.next_range(0, 6) {
            0 => 5.0,
            1 => 20.0,
            2 => 0.0,
            3 => 100.0,
            _ => self.next_f64() * 100.0,
        }
    }

    /// Latency in [0, 500) ms, biased toward the threshold boundaries
    fn next_latency(&mut self) -> f64 {
        match self.next_range(0, 5) {
            0 => 100.0,
            1 => 200.0,
            _ => self.next_f64() * 500.0,
        }
    }

    fn next_garbage(&mut self, max_len: u64) -> String {
        const ALPHABET: &[u8] = b"0123456789 %/=.-avgrtpacketloss\nmin/max\t";
        let len = self.next_range(0, max_len);
        (0..len)
            .map(|_| ALPHABET[self.next_range(0, ALPHABET.len() as u64) as usize] as char)
            .collect()
    }
}

fn execution_with(success: bool) -> ExecutionOutput {
    ExecutionOutput {
        agent: "Executor".to_string(),
        timestamp: Utc::now(),
        commands_run: vec!["traceroute".to_string()],
        results: ExecutionResults {
            traceroute: TraceResult {
                success,
                ..TraceResult::default()
            },
        },
    }
}

// ============================================================================
// Analyze
// ============================================================================

#[test]
fn prop_status_tracks_degraded_threshold() {
    let t = ThresholdConfig::default();
    let mut rng = TestRng::new(0xA11CE);

    for _ in 0..ITERATIONS {
        let loss = rng.next_loss();
        let status = analyze::classify(loss, &t);
        assert_eq!(
            status == HealthStatus::Degraded,
            loss > t.degraded_loss_percent,
            "loss={}",
            loss
        );
    }
}

// ============================================================================
// Plan
// ============================================================================

#[test]
fn prop_priority_high_iff_bound_crossed() {
    let t = ThresholdConfig::default();
    let mut rng = TestRng::new(42);

    for _ in 0..ITERATIONS {
        let loss = rng.next_loss();
        let latency = rng.next_latency();
        let expected_high = loss > t.critical_loss_percent || latency > t.high_latency_ms;
        let p = plan::priority(loss, latency, &t);
        assert_eq!(p == Priority::High, expected_high, "loss={} latency={}", loss, latency);
        assert_ne!(p, Priority::Low);
    }
}

#[test]
fn prop_steps_are_union_of_triggered_groups() {
    let t = ThresholdConfig::default();
    let mut rng = TestRng::new(7);

    for _ in 0..ITERATIONS {
        let loss = rng.next_loss();
        let latency = rng.next_latency();
        let steps = plan::steps(loss, latency, &t);

        let loss_fired = loss > t.degraded_loss_percent;
        let latency_fired = latency > t.elevated_latency_ms;

        let has_loss = plan::LOSS_STEPS.iter().all(|s| steps.iter().any(|x| x == s));
        let has_latency = plan::LATENCY_STEPS.iter().all(|s| steps.iter().any(|x| x == s));
        let has_baseline = plan::BASELINE_STEPS.iter().any(|s| steps.iter().any(|x| x == s));

        assert_eq!(has_loss, loss_fired, "loss={}", loss);
        assert_eq!(has_latency, latency_fired, "latency={}", latency);
        assert_eq!(has_baseline, !loss_fired && !latency_fired);
        assert!(!steps.is_empty());
    }
}

#[test]
fn prop_strategy_always_one_of_four() {
    let t = ThresholdConfig::default();
    let known = [
        plan::STRATEGY_PACKET_LOSS,
        plan::STRATEGY_HIGH_LATENCY,
        plan::STRATEGY_INTERMITTENT_LOSS,
        plan::STRATEGY_GENERAL,
    ];
    let mut rng = TestRng::new(99);

    for _ in 0..ITERATIONS {
        let s = plan::strategy(rng.next_loss(), rng.next_latency(), &t);
        assert!(known.contains(&s));
    }
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn prop_confidence_keyed_on_trace_success() {
    let cfg = ValidationConfig::default();
    let mut rng = TestRng::new(1234);

    for _ in 0..ITERATIONS {
        let success = rng.next_range(0, 2) == 1;
        let v = validate::run(&execution_with(success), &cfg);

        assert!(v.validated);
        if success {
            assert_eq!(v.confidence, cfg.baseline_confidence);
            assert!(v.issues_found.is_empty());
        } else {
            assert_eq!(v.confidence, cfg.failed_confidence);
            assert_eq!(v.issues_found.len(), 1);
        }
    }
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn prop_recommendations_shape() {
    let t = ThresholdConfig::default();
    let mut rng = TestRng::new(555);

    for _ in 0..ITERATIONS {
        let loss = rng.next_loss();
        let recs = report::recommendations(loss, &t);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1], report::REC_SCHEDULE);
        let first_is_normal = recs[0] == report::REC_NORMAL;
        assert_eq!(first_is_normal, loss <= t.degraded_loss_percent, "loss={}", loss);
    }
}

// ============================================================================
// Parsers
// ============================================================================

#[test]
fn prop_ping_parser_total_on_garbage() {
    let mut rng = TestRng::new(0xDEAD_BEEF);

    for _ in 0..ITERATIONS {
        let input = rng.next_garbage(200);
        let r = parse_ping(&input);

        assert!((0.0..=100.0).contains(&r.packet_loss_percent), "input={:?}", input);
        assert!(r.average_latency_ms >= 0.0, "input={:?}", input);
        assert!(r.average_latency_ms.is_finite());
    }
}

#[test]
fn prop_traceroute_lines_capped() {
    let mut rng = TestRng::new(31337);

    for _ in 0..ITERATIONS {
        let lines = rng.next_range(0, 40) as usize;
        let stdout: String = (0..lines).map(|i| format!(" {}  10.0.0.{}\n", i + 1, i)).collect();
        let exit = rng.next_range(0, 3) as i32;

        let r = parse_traceroute(&stdout, exit);
        assert_eq!(r.hop_count, lines);
        assert_eq!(r.output_lines.len(), lines.min(MAX_TRACE_LINES));
        assert_eq!(r.success, exit == 0);
    }
}
