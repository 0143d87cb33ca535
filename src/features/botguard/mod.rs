//! Bot-detection instrumentation for the registration form: a honeypot
//! field, open-to-submit timing, and mouse-movement counting, reported to
//! the API as advisory telemetry.

pub mod client;
pub mod signals;

pub use signals::SignalTracker;
