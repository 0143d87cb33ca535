pub mod auth;
pub mod billing;
pub mod botguard;
pub mod generator;
pub mod tokens;
