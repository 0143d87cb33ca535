//! Token metering: the balance display and its reconciliation source.

pub mod client;
pub mod types;

pub use types::TokenBalance;
