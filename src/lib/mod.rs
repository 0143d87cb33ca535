//! Shared frontend utilities for API access, configuration, errors, storage,
//! and build metadata.
//!
//! ## Session model
//!
//! 1. **Sign in:** credentials (or a provider callback exchange) return a
//!    session object carrying the bearer token. The session lives in reactive
//!    state and is mirrored to `localStorage` for reload hydration.
//! 2. **Requests:** every API call goes through [`api`], which attaches the
//!    bearer from state or the mirror, the CSRF header when provided, and a
//!    per-call timeout, and retries once on auth rejections and transport
//!    drops.
//! 3. **Sign out:** state and mirror are cleared together and a one-shot
//!    logout marker suppresses the next automatic session restore.
//!
//! Centralizing these helpers keeps network behavior consistent across
//! routes and features. They do not handle secrets beyond the bearer token;
//! callers must still avoid logging sensitive data.

pub mod api;
pub mod browser;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod storage;
pub mod theme;

pub use api::{
    ApiResponse, Method, RequestOptions, delete_for_status, get_json, post_empty, post_for_status,
    post_json, upload,
};
pub use errors::AppError;
