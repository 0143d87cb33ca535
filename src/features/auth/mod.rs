//! Auth feature covering password login, provider callback exchange, and
//! session hydration. It keeps authentication logic out of the UI and is
//! the sole writer of persisted session state. This module touches security
//! boundaries and must avoid logging secrets or token material.
//!
//! Flow overview: login/register exchange credentials (with a best-effort
//! CSRF token) for a session that is mirrored to local storage. On startup
//! the mirror hydrates the UI optimistically while `verify-token` confirms
//! it in the background; an unverifiable session is cleared everywhere at
//! once. Provider redirects land on the callback page, which parses the
//! fragment or query and exchanges the credential server-side. The route
//! guard consults only local evidence before falling back to one
//! refresh-token probe.

pub mod callback;
pub mod client;
pub mod csrf;
pub mod guards;
pub mod jwt;
pub mod session;
pub mod state;
pub mod storage;
pub mod types;

pub use guards::RequireSession;
pub use state::{AuthContext, AuthProvider, use_auth};
pub use types::{PlanTier, Session};
