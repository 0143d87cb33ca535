//! Pure session state machine behind the auth context. Keeping it a plain
//! struct makes the transitions host-testable; the reactive wrapper in
//! `state.rs` owns signal plumbing and storage mirroring.

use super::types::{PlanTier, Session, VerifiedUser};

/// Client auth state: `ANONYMOUS` (no session) or `AUTHENTICATED` (session
/// with a non-empty bearer). The epoch counts identity transitions so
/// in-flight refreshes from a previous identity can be discarded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    session: Option<Session>,
    plan: PlanTier,
    tokens_remaining: u64,
    demo: bool,
    epoch: u64,
    enhanced_mode: bool,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    pub fn plan(&self) -> PlanTier {
        self.plan
    }

    pub fn tokens_remaining(&self) -> u64 {
        self.tokens_remaining
    }

    pub fn demo(&self) -> bool {
        self.demo
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn enhanced_mode(&self) -> bool {
        self.enhanced_mode
    }

    pub fn set_enhanced_mode(&mut self, enabled: bool) {
        self.enhanced_mode = enabled;
    }

    /// The only identity writer. Sessions with an empty bearer are treated
    /// as absent, and every call bumps the epoch.
    pub fn set_user(&mut self, session: Option<Session>) {
        let session = session.filter(|candidate| !candidate.token.is_empty());
        self.epoch += 1;
        match &session {
            Some(active) => {
                self.plan = active.plan;
                self.tokens_remaining = active.tokens_remaining;
                self.demo = active.demo;
            }
            None => {
                self.plan = PlanTier::Free;
                self.tokens_remaining = 0;
                self.demo = false;
            }
        }
        self.session = session;
    }

    /// Optimistic local spend. Never drives the balance negative: amounts
    /// above the balance leave everything untouched and return `false`.
    pub fn use_tokens(&mut self, amount: u64) -> bool {
        if amount > self.tokens_remaining {
            return false;
        }
        self.tokens_remaining -= amount;
        if let Some(session) = &mut self.session {
            session.tokens_remaining = self.tokens_remaining;
        }
        true
    }

    /// Applies a refresh that started at `refresh_epoch`. Results from a
    /// stale epoch are discarded; the identity changed while the refresh was
    /// in flight. A refresh is not an identity transition, so the epoch is
    /// left alone.
    pub fn apply_refresh(&mut self, refresh_epoch: u64, refreshed: Session) -> bool {
        if refresh_epoch != self.epoch || refreshed.token.is_empty() {
            return false;
        }
        self.plan = refreshed.plan;
        self.tokens_remaining = refreshed.tokens_remaining;
        self.demo = refreshed.demo;
        self.session = Some(refreshed);
        true
    }
}

/// Merges a verification response and a fresh token balance into the current
/// session. Precedence, highest first:
/// 1. the token-detail balance for `tokens_remaining`
/// 2. present fields of the verification response
/// 3. the current session
///
/// The bearer only moves forward: an absent or empty verified token keeps
/// the current one.
pub fn reconcile(
    current: &Session,
    verified: Option<&VerifiedUser>,
    balance: Option<u64>,
) -> Session {
    let mut merged = current.clone();

    if let Some(update) = verified {
        if let Some(user_id) = &update.user_id {
            merged.user_id = user_id.clone();
        }
        if let Some(email) = &update.email {
            merged.email = email.clone();
        }
        if update.display_name.is_some() {
            merged.display_name = update.display_name.clone();
        }
        if let Some(plan) = update.plan {
            merged.plan = plan;
        }
        if let Some(tokens) = update.tokens_remaining {
            merged.tokens_remaining = tokens;
        }
        if let Some(token) = &update.token {
            if !token.is_empty() {
                merged.token = token.clone();
            }
        }
        if let Some(demo) = update.demo {
            merged.demo = demo;
        }
        if update.subscription.is_some() {
            merged.subscription = update.subscription.clone();
        }
    }

    if let Some(tokens) = balance {
        merged.tokens_remaining = tokens;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::{SessionState, reconcile};
    use crate::features::auth::types::{PlanTier, Session, VerifiedUser};

    fn session(tokens: u64) -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "a@b.test".to_string(),
            display_name: Some("Ada".to_string()),
            plan: PlanTier::Pro,
            tokens_remaining: tokens,
            token: "bearer-1".to_string(),
            demo: false,
            subscription: None,
        }
    }

    #[test]
    fn login_then_logout_returns_to_anonymous() {
        let mut state = SessionState::default();
        assert!(!state.is_authenticated());

        state.set_user(Some(session(40)));
        assert!(state.is_authenticated());
        assert_eq!(state.plan(), PlanTier::Pro);
        assert_eq!(state.tokens_remaining(), 40);

        state.set_user(None);
        assert!(!state.is_authenticated());
        assert_eq!(state.plan(), PlanTier::Free);
        assert_eq!(state.tokens_remaining(), 0);
        assert!(state.bearer().is_none());
    }

    #[test]
    fn empty_bearer_sessions_are_treated_as_absent() {
        let mut state = SessionState::default();
        let mut broken = session(10);
        broken.token = String::new();

        state.set_user(Some(broken));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn use_tokens_decrements_exactly_and_never_goes_negative() {
        let mut state = SessionState::default();
        state.set_user(Some(session(10)));

        assert!(state.use_tokens(4));
        assert_eq!(state.tokens_remaining(), 6);
        assert_eq!(state.session().map(|s| s.tokens_remaining), Some(6));

        assert!(!state.use_tokens(7));
        assert_eq!(state.tokens_remaining(), 6);

        assert!(state.use_tokens(6));
        assert_eq!(state.tokens_remaining(), 0);
        assert!(!state.use_tokens(1));
    }

    #[test]
    fn stale_refresh_results_are_discarded() {
        let mut state = SessionState::default();
        state.set_user(Some(session(10)));
        let refresh_epoch = state.epoch();

        // Identity changes while the refresh is in flight.
        state.set_user(None);

        let mut refreshed = session(99);
        refreshed.token = "bearer-2".to_string();
        assert!(!state.apply_refresh(refresh_epoch, refreshed));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn current_refresh_results_are_applied() {
        let mut state = SessionState::default();
        state.set_user(Some(session(10)));
        let refresh_epoch = state.epoch();

        assert!(state.apply_refresh(refresh_epoch, session(25)));
        assert_eq!(state.tokens_remaining(), 25);
        // Same identity, so the epoch is unchanged and a second refresh from
        // the same start still applies.
        assert_eq!(state.epoch(), refresh_epoch);
    }

    #[test]
    fn reconcile_prefers_the_token_detail_balance() {
        let current = session(10);
        let verified = VerifiedUser {
            tokens_remaining: Some(42),
            ..VerifiedUser::default()
        };

        let merged = reconcile(&current, Some(&verified), Some(99));
        assert_eq!(merged.tokens_remaining, 99);

        let merged = reconcile(&current, Some(&verified), None);
        assert_eq!(merged.tokens_remaining, 42);

        let merged = reconcile(&current, None, None);
        assert_eq!(merged.tokens_remaining, 10);
    }

    #[test]
    fn reconcile_keeps_the_current_bearer_unless_replaced() {
        let current = session(10);
        let empty_token = VerifiedUser {
            token: Some(String::new()),
            ..VerifiedUser::default()
        };
        assert_eq!(reconcile(&current, Some(&empty_token), None).token, "bearer-1");

        let rotated = VerifiedUser {
            token: Some("bearer-2".to_string()),
            ..VerifiedUser::default()
        };
        assert_eq!(reconcile(&current, Some(&rotated), None).token, "bearer-2");
    }

    #[test]
    fn reconcile_overlays_profile_fields() {
        let current = session(10);
        let verified = VerifiedUser {
            plan: Some(PlanTier::Business),
            display_name: Some("Grace".to_string()),
            demo: Some(true),
            ..VerifiedUser::default()
        };

        let merged = reconcile(&current, Some(&verified), None);
        assert_eq!(merged.plan, PlanTier::Business);
        assert_eq!(merged.display_name.as_deref(), Some("Grace"));
        assert!(merged.demo);
        assert_eq!(merged.email, "a@b.test");
    }
}
