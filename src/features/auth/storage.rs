//! Local-storage mirror of the session, used for optimistic hydration on
//! reload and as the bearer fallback for the HTTP wrapper. This module is
//! the only writer of the session keys.

use crate::app_lib::storage;

use super::types::Session;

/// Mirrors the session, or clears the mirror when `None`.
pub fn mirror_session(session: Option<&Session>) {
    match session {
        Some(session) => {
            storage::save_json(storage::SESSION_KEY, session);
            storage::set_item(storage::AUTH_FLAG_KEY, "true");
        }
        None => {
            storage::remove_item(storage::SESSION_KEY);
            storage::remove_item(storage::AUTH_FLAG_KEY);
        }
    }
}

/// Loads the mirrored session. Mirrors without a bearer are stale artifacts
/// and read as absent.
pub fn load_session() -> Option<Session> {
    storage::load_json::<Session>(storage::SESSION_KEY)
        .filter(|session| !session.token.is_empty())
}

/// Marks an explicit sign-out so the next load does not auto-restore.
pub fn set_manual_logout() {
    storage::set_item(storage::MANUAL_LOGOUT_KEY, "true");
}

/// Reads and clears the sign-out marker. One-shot: the flag only suppresses
/// the restore immediately following the logout.
pub fn take_manual_logout() -> bool {
    let flagged = storage::get_item(storage::MANUAL_LOGOUT_KEY).as_deref() == Some("true");
    if flagged {
        storage::remove_item(storage::MANUAL_LOGOUT_KEY);
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::{load_session, mirror_session, set_manual_logout, take_manual_logout};
    use crate::app_lib::storage;
    use crate::features::auth::types::{PlanTier, Session};

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "a@b.test".to_string(),
            display_name: None,
            plan: PlanTier::Pro,
            tokens_remaining: 12,
            token: "bearer".to_string(),
            demo: true,
            subscription: None,
        }
    }

    #[test]
    fn mirror_round_trip_preserves_plan_and_balance() {
        mirror_session(Some(&session()));
        assert_eq!(storage::get_item(storage::AUTH_FLAG_KEY).as_deref(), Some("true"));

        let restored = load_session().expect("session restored");
        assert_eq!(restored.plan, PlanTier::Pro);
        assert_eq!(restored.tokens_remaining, 12);
        assert!(restored.demo);

        mirror_session(None);
        assert!(load_session().is_none());
        assert_eq!(storage::get_item(storage::AUTH_FLAG_KEY), None);
    }

    #[test]
    fn mirrors_without_a_bearer_read_as_absent() {
        let mut stale = session();
        stale.token = String::new();
        storage::save_json(storage::SESSION_KEY, &stale);

        assert!(load_session().is_none());
        storage::remove_item(storage::SESSION_KEY);
    }

    #[test]
    fn manual_logout_flag_is_one_shot() {
        assert!(!take_manual_logout());

        set_manual_logout();
        assert!(take_manual_logout());
        assert!(!take_manual_logout());
    }
}
