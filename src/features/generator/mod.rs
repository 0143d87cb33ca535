//! Workbook generation: start a job from a prompt, poll it to a terminal
//! state, and optionally attach an uploaded reference workbook. Token spend
//! is optimistic at submit time and reconciled against the server once the
//! job finishes.

pub mod client;
pub mod polling;
pub mod types;

pub use polling::{POLL_INTERVAL_MS, PollRegistry};
pub use types::{GenerateRequest, JobStatus};

/// Local token cost charged optimistically when a job is submitted.
pub const TOKENS_PER_GENERATION: u64 = 1;
