//! Traceroute output parser.

use crate::findings::TraceResult;

/// Lines of raw output kept in the result
pub const MAX_TRACE_LINES: usize = 10;

/// Count hops and keep the head of the output.
///
/// Every non-blank line counts as a hop, the "traceroute to" header
/// included. `success` follows the exit status only.
pub fn parse_traceroute(stdout: &str, exit_code: i32) -> TraceResult {
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();

    TraceResult {
        success: exit_code == 0,
        hop_count: lines.len(),
        output_lines: lines
            .iter()
            .take(MAX_TRACE_LINES)
            .map(|l| l.to_string())
            .collect(),
        error: None,
    }
}
