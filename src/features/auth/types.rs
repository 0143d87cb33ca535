//! Request and response types for auth-related API calls. These payloads
//! carry credentials and bearer tokens, so they must never be logged.

use serde::{Deserialize, Serialize};

/// Subscription tier. Unknown strings from the server decode to `Free` so a
/// newly introduced tier never breaks older clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Pro,
    Business,
    #[default]
    #[serde(other)]
    Free,
}

impl PlanTier {
    pub fn label(self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Pro => "Pro",
            PlanTier::Business => "Business",
        }
    }

    /// Wire value sent to checkout and registration endpoints.
    pub fn wire_name(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
            PlanTier::Business => "business",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Trialing => "Trial",
            SubscriptionStatus::PastDue => "Past due",
            SubscriptionStatus::Canceled => "Canceled",
            SubscriptionStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    #[serde(default)]
    pub plan: PlanTier,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub current_period_end: Option<String>,
}

/// Client-held session. The bearer `token` is the credential for API calls;
/// a session with an empty token is treated as absent everywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub plan: PlanTier,
    #[serde(default)]
    pub tokens_remaining: u64,
    pub token: String,
    #[serde(default)]
    pub demo: bool,
    #[serde(default)]
    pub subscription: Option<SubscriptionSummary>,
}

impl Session {
    /// Whether the profile is complete enough to skip onboarding.
    pub fn has_display_name(&self) -> bool {
        self.display_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// Partial user record returned by the verification endpoint. Every field is
/// optional; merging into the current session is the reconciler's job.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VerifiedUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub plan: Option<PlanTier>,
    #[serde(default)]
    pub tokens_remaining: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub demo: Option<bool>,
    #[serde(default)]
    pub subscription: Option<SubscriptionSummary>,
}

impl VerifiedUser {
    /// Builds a full session when the response carries the identity fields
    /// and a usable bearer; partial responses yield `None`.
    pub fn into_session(self) -> Option<Session> {
        let user_id = self.user_id?;
        let email = self.email?;
        let token = self.token.filter(|token| !token.is_empty())?;
        Some(Session {
            user_id,
            email,
            display_name: self.display_name,
            plan: self.plan.unwrap_or_default(),
            tokens_remaining: self.tokens_remaining.unwrap_or(0),
            token,
            demo: self.demo.unwrap_or(false),
            subscription: self.subscription,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub plan: PlanTier,
}

/// Provider callback exchange. `id_token` carries the raw credential for
/// every provider (fragment ID token or authorization code); `provider`
/// tells the backend how to redeem it. The peeked fields are informational
/// forwarding only.
#[derive(Clone, Debug, Serialize)]
pub struct CallbackExchangeRequest {
    pub provider: String,
    pub id_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DisplayNameRequest {
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CsrfTokenResponse {
    pub token: String,
}

/// Row in the account page's active-session list.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SessionEntry {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_seen_at: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_json(plan: &str, tokens: u64) -> String {
        format!(
            r#"{{"user_id":"u1","email":"a@b.test","plan":"{plan}","tokens_remaining":{tokens},"token":"tok"}}"#
        )
    }

    #[test]
    fn unknown_plan_tiers_decode_to_free() {
        let session: Session =
            serde_json::from_str(&session_json("enterprise-max", 5)).expect("decode");
        assert_eq!(session.plan, PlanTier::Free);

        let session: Session = serde_json::from_str(&session_json("business", 5)).expect("decode");
        assert_eq!(session.plan, PlanTier::Business);
    }

    #[test]
    fn session_defaults_fill_missing_fields() {
        let session: Session =
            serde_json::from_str(r#"{"user_id":"u1","email":"a@b.test","token":"tok"}"#)
                .expect("decode");
        assert_eq!(session.plan, PlanTier::Free);
        assert_eq!(session.tokens_remaining, 0);
        assert!(!session.demo);
        assert!(session.subscription.is_none());
        assert!(!session.has_display_name());
    }

    #[test]
    fn whitespace_display_names_do_not_count() {
        let mut session: Session =
            serde_json::from_str(&session_json("pro", 1)).expect("decode");
        session.display_name = Some("   ".to_string());
        assert!(!session.has_display_name());
        session.display_name = Some("Ada".to_string());
        assert!(session.has_display_name());
    }

    #[test]
    fn exchange_request_omits_absent_fields() {
        let request = CallbackExchangeRequest {
            provider: "google".to_string(),
            id_token: "auth-code".to_string(),
            user_details: None,
            user_id: None,
        };
        let json = serde_json::to_string(&request).expect("encode");
        assert!(json.contains(r#""id_token":"auth-code""#));
        assert!(!json.contains("user_details"));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn verified_user_becomes_a_session_only_with_identity_and_bearer() {
        let complete = VerifiedUser {
            user_id: Some("u1".to_string()),
            email: Some("a@b.test".to_string()),
            token: Some("bearer".to_string()),
            plan: Some(PlanTier::Pro),
            ..VerifiedUser::default()
        };
        let session = complete.into_session().expect("session");
        assert_eq!(session.plan, PlanTier::Pro);
        assert_eq!(session.tokens_remaining, 0);

        let missing_token = VerifiedUser {
            user_id: Some("u1".to_string()),
            email: Some("a@b.test".to_string()),
            token: Some(String::new()),
            ..VerifiedUser::default()
        };
        assert!(missing_token.into_session().is_none());

        let missing_identity = VerifiedUser {
            token: Some("bearer".to_string()),
            ..VerifiedUser::default()
        };
        assert!(missing_identity.into_session().is_none());
    }

    #[test]
    fn subscription_status_tolerates_new_values() {
        let summary: SubscriptionSummary =
            serde_json::from_str(r#"{"plan":"pro","status":"paused"}"#).expect("decode");
        assert_eq!(summary.status, SubscriptionStatus::Unknown);
        let summary: SubscriptionSummary =
            serde_json::from_str(r#"{"plan":"pro","status":"past_due"}"#).expect("decode");
        assert_eq!(summary.status, SubscriptionStatus::PastDue);
    }
}
