//! Ping output parser.
//!
//! Handles the summary lines of iputils and BSD ping:
//! - "4 packets transmitted, 4 received, 0% packet loss, time 3004ms"
//! - "rtt min/avg/max/mdev = 9.871/10.234/10.802/0.352 ms"
//! - "round-trip min/avg/max/stddev = 9.871/10.234/10.802/0.352 ms"

use crate::findings::ProbeResult;

/// Parse ping stdout into loss and average latency.
///
/// `reachable` and `error_message` are left for the caller, which knows the
/// exit status.
pub fn parse_ping(stdout: &str) -> ProbeResult {
    let mut result = ProbeResult::default();

    for line in stdout.lines() {
        if line.contains("packet loss") {
            if let Some(loss) = loss_percent(line) {
                result.packet_loss_percent = loss;
            }
        }
        if line.contains("avg") || line.contains("rtt") {
            if let Some(avg) = average_latency(line) {
                result.average_latency_ms = avg;
            }
        }
    }

    result
}

/// Whether any line carries a usable loss percentage.
///
/// A zero loss from `parse_ping` is ambiguous; this tells a measured 0% apart
/// from output that had no summary at all.
pub fn has_loss_summary(stdout: &str) -> bool {
    stdout
        .lines()
        .filter(|line| line.contains("packet loss"))
        .any(|line| loss_percent(line).is_some())
}

/// Number immediately before the first '%'
fn loss_percent(line: &str) -> Option<f64> {
    let (before, _) = line.split_once('%')?;
    let token = before.split_whitespace().last()?;
    let value = token.parse::<f64>().ok()?;
    (value.is_finite() && (0.0..=100.0).contains(&value)).then_some(value)
}

/// Second of the min/avg/max/mdev values after '='
fn average_latency(line: &str) -> Option<f64> {
    let (_, values) = line.split_once('=')?;
    let avg = values.trim().split('/').nth(1)?;
    let value = avg.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
