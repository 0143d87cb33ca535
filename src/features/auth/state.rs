//! Auth session state and context for the frontend. The provider hydrates
//! from the local-storage mirror on mount, then verifies in the background.
//! All session writes flow through [`AuthContext::set_user`] so the reactive
//! state and the mirror can never drift. The bearer token lives in memory
//! and in the mirror; it must never be logged.

use leptos::{prelude::*, task::spawn_local};

use crate::app_lib::AppError;
use crate::features::tokens;

use super::client;
use super::csrf::CsrfCache;
use super::session::{SessionState, reconcile};
use super::storage as auth_storage;
use super::types::{LoginRequest, PlanTier, RegisterRequest, Session};

/// Auth context shared through Leptos. Cloning shares the same underlying
/// state and CSRF cache.
#[derive(Clone)]
pub struct AuthContext {
    state: RwSignal<SessionState>,
    pub csrf: CsrfCache,
    pub session: Signal<Option<Session>>,
    pub is_authenticated: Signal<bool>,
    pub plan: Signal<PlanTier>,
    pub tokens_remaining: Signal<u64>,
    pub demo: Signal<bool>,
    pub enhanced_mode: Signal<bool>,
}

impl AuthContext {
    fn new() -> Self {
        let state = RwSignal::new(SessionState::default());
        Self {
            state,
            csrf: CsrfCache::new(),
            session: Signal::derive(move || state.with(|inner| inner.session().cloned())),
            is_authenticated: Signal::derive(move || state.with(SessionState::is_authenticated)),
            plan: Signal::derive(move || state.with(SessionState::plan)),
            tokens_remaining: Signal::derive(move || state.with(SessionState::tokens_remaining)),
            demo: Signal::derive(move || state.with(SessionState::demo)),
            enhanced_mode: Signal::derive(move || state.with(SessionState::enhanced_mode)),
        }
    }

    /// Current bearer without subscribing to the signal.
    pub fn bearer(&self) -> Option<String> {
        self.state
            .with_untracked(|inner| inner.bearer().map(str::to_string))
    }

    /// The only session writer: updates reactive state and the storage
    /// mirror together.
    pub fn set_user(&self, session: Option<Session>) {
        self.state.update(|inner| inner.set_user(session));
        self.mirror_current();
    }

    /// Signs in and installs the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let csrf = self.csrf.get_or_fetch().await;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = client::login(&request, csrf.as_deref()).await?;
        self.set_user(Some(session));
        Ok(())
    }

    /// Creates the account, then signs in with the same credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        plan: PlanTier,
    ) -> Result<(), AppError> {
        let csrf = self.csrf.get_or_fetch().await;
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            plan,
        };
        client::register(&request, csrf.as_deref()).await?;
        self.login(email, password).await
    }

    /// Signs out. The server call is best-effort; local state always clears.
    pub async fn logout(&self) {
        let bearer = self.bearer();
        if let Err(err) = client::logout(bearer.as_deref()).await {
            log::warn!("server logout failed: {err}");
        }
        auth_storage::set_manual_logout();
        self.csrf.reset();
        self.set_user(None);
    }

    /// Re-verifies the session and pulls the authoritative token balance,
    /// merging both into the current session. Returns whether anything was
    /// applied; results from a stale epoch are discarded.
    pub async fn refresh_user_data(&self) -> bool {
        let Some(current) = self.state.with_untracked(|inner| inner.session().cloned()) else {
            return false;
        };
        let refresh_epoch = self.state.with_untracked(SessionState::epoch);
        let bearer = current.token.clone();

        let verified = match client::verify_token(Some(&bearer)).await {
            Ok(update) => Some(update),
            Err(err) => {
                log::warn!("session verification failed: {err}");
                None
            }
        };
        let balance = match tokens::client::fetch_balance(Some(&bearer)).await {
            Ok(detail) => Some(detail.current_tokens),
            Err(err) => {
                log::debug!("token balance fetch failed: {err}");
                None
            }
        };

        if verified.is_none() && balance.is_none() {
            return false;
        }
        let merged = reconcile(&current, verified.as_ref(), balance);
        self.apply_refresh(refresh_epoch, merged)
    }

    /// Optimistic local spend; reconciled by the next `refresh_user_data`.
    pub fn use_tokens(&self, amount: u64) -> bool {
        let mut accepted = false;
        self.state.update(|inner| accepted = inner.use_tokens(amount));
        if accepted {
            self.mirror_current();
        }
        accepted
    }

    pub fn set_enhanced_mode(&self, enabled: bool) {
        self.state.update(|inner| inner.set_enhanced_mode(enabled));
    }

    /// Hydrates from the mirror for an optimistic first render, then
    /// verifies in the background. A definitive rejection clears all local
    /// traces; transient failures keep the optimistic session.
    pub async fn initialize(&self) {
        let Some(stored) = auth_storage::load_session() else {
            return;
        };
        self.set_user(Some(stored.clone()));
        let refresh_epoch = self.state.with_untracked(SessionState::epoch);

        match client::verify_token(Some(&stored.token)).await {
            Ok(update) => {
                let merged = reconcile(&stored, Some(&update), None);
                self.apply_refresh(refresh_epoch, merged);
            }
            Err(AppError::Http {
                status: 401 | 403, ..
            }) => {
                log::info!("stored session was rejected, signing out");
                self.set_user(None);
            }
            Err(err) => {
                log::warn!("session verification unavailable: {err}");
            }
        }
    }

    fn apply_refresh(&self, refresh_epoch: u64, merged: Session) -> bool {
        let mut applied = false;
        self.state
            .update(|inner| applied = inner.apply_refresh(refresh_epoch, merged));
        if applied {
            self.mirror_current();
        }
        applied
    }

    fn mirror_current(&self) {
        let session = self.state.with_untracked(|inner| inner.session().cloned());
        auth_storage::mirror_session(session.as_ref());
    }
}

/// Provides the auth context and starts session hydration once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth.clone());

    let auth_for_boot = auth.clone();
    spawn_local(async move {
        auth_for_boot.initialize().await;
    });

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::new)
}

#[cfg(test)]
mod tests {
    use leptos::prelude::GetUntracked;

    use super::AuthContext;
    use crate::app_lib::storage;
    use crate::features::auth::storage as auth_storage;
    use crate::features::auth::types::{PlanTier, Session};

    fn session(plan: PlanTier, tokens: u64) -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "a@b.test".to_string(),
            display_name: Some("Ada".to_string()),
            plan,
            tokens_remaining: tokens,
            token: "bearer-1".to_string(),
            demo: false,
            subscription: None,
        }
    }

    #[test]
    fn set_user_none_clears_state_and_mirror_together() {
        let auth = AuthContext::new();
        auth.set_user(Some(session(PlanTier::Pro, 40)));
        assert!(auth.is_authenticated.get_untracked());
        assert!(auth_storage::load_session().is_some());

        auth.set_user(None);
        assert!(!auth.is_authenticated.get_untracked());
        assert!(auth_storage::load_session().is_none());
        assert_eq!(storage::get_item(storage::AUTH_FLAG_KEY), None);
    }

    #[test]
    fn mirror_round_trip_reproduces_plan_and_balance() {
        let auth = AuthContext::new();
        auth.set_user(Some(session(PlanTier::Business, 31)));

        let restored = auth_storage::load_session().expect("mirrored session");
        let rehydrated = AuthContext::new();
        rehydrated.set_user(Some(restored));

        assert_eq!(rehydrated.plan.get_untracked(), PlanTier::Business);
        assert_eq!(rehydrated.tokens_remaining.get_untracked(), 31);
        auth.set_user(None);
    }

    #[test]
    fn use_tokens_keeps_the_mirror_in_sync() {
        let auth = AuthContext::new();
        auth.set_user(Some(session(PlanTier::Pro, 10)));

        assert!(auth.use_tokens(3));
        assert_eq!(auth.tokens_remaining.get_untracked(), 7);
        let mirrored = auth_storage::load_session().expect("mirrored session");
        assert_eq!(mirrored.tokens_remaining, 7);

        assert!(!auth.use_tokens(100));
        assert_eq!(auth.tokens_remaining.get_untracked(), 7);
        auth.set_user(None);
    }
}
