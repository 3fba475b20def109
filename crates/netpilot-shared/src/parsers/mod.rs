//! Best-effort parsers for probe output.
//!
//! Output formats vary by platform and locale. Anything that does not match
//! leaves the corresponding field at its zero value; parsing never fails.

pub mod ping;
pub mod traceroute;

pub use ping::{has_loss_summary, parse_ping};
pub use traceroute::{parse_traceroute, MAX_TRACE_LINES};
