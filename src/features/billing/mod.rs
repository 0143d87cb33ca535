//! Billing: the plan catalog, checkout-session creation, and the
//! subscription summary shown on the account page.

pub mod client;
pub mod types;

pub use types::{CheckoutOutcome, CheckoutRequest, PlanOffer, plan_catalog};
