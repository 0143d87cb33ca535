//! Route guard for authenticated pages. The decision logic is pure and
//! host-testable; the component wires it to navigation, the session probe,
//! and the slow-probe affordance.

use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;

use crate::app_lib::{api, browser, theme::Theme};
use crate::components::ui::Spinner;

use super::client;
use super::state::use_auth;
use super::storage as auth_storage;
use super::types::Session;

/// After this long the guard admits the probe is slow and offers a manual
/// sign-in link, without cancelling the probe.
const SLOW_PROBE_AFTER_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Grant,
    Onboard,
    Deny,
    Probe,
}

/// First decision, before any network traffic: the sign-out marker denies
/// outright, a live session grants (or onboards when the profile lacks a
/// display name), anything else needs the server probe.
pub(crate) fn initial_decision(manual_logout: bool, session: Option<&Session>) -> GuardDecision {
    if manual_logout {
        return GuardDecision::Deny;
    }
    match session {
        Some(session) if session.has_display_name() => GuardDecision::Grant,
        Some(_) => GuardDecision::Onboard,
        None => GuardDecision::Probe,
    }
}

/// Decision after the probe and store refresh have settled.
pub(crate) fn post_probe_decision(session: Option<&Session>) -> GuardDecision {
    match session {
        Some(session) if session.has_display_name() => GuardDecision::Grant,
        Some(_) => GuardDecision::Onboard,
        None => GuardDecision::Deny,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum GuardStatus {
    Verifying,
    Granted,
    Redirected,
}

/// Wraps authenticated routes. Renders children once the session is
/// confirmed, otherwise redirects to the landing page (or onboarding when
/// the profile is incomplete).
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let status = RwSignal::new(GuardStatus::Verifying);
    let slow = RwSignal::new(false);

    spawn_local(async move {
        // UX-only guard; real access control must live on the API.
        let session = auth.session.get_untracked();
        match initial_decision(auth_storage::take_manual_logout(), session.as_ref()) {
            GuardDecision::Grant => status.set(GuardStatus::Granted),
            GuardDecision::Onboard => {
                navigate("/onboarding", Default::default());
                status.set(GuardStatus::Redirected);
            }
            GuardDecision::Deny => {
                navigate("/", Default::default());
                status.set(GuardStatus::Redirected);
            }
            GuardDecision::Probe => {
                spawn_local(async move {
                    browser::sleep_ms(SLOW_PROBE_AFTER_MS).await;
                    if status.get_untracked() == GuardStatus::Verifying {
                        slow.set(true);
                    }
                });

                match client::refresh_token(None, api::GUARD_PROBE_TIMEOUT_MS).await {
                    Ok(update) => {
                        if let Some(session) = update.into_session() {
                            auth.set_user(Some(session));
                            auth.refresh_user_data().await;
                        }
                    }
                    Err(err) => log::debug!("session probe failed: {err}"),
                }

                let session = auth.session.get_untracked();
                match post_probe_decision(session.as_ref()) {
                    GuardDecision::Grant => status.set(GuardStatus::Granted),
                    GuardDecision::Onboard => {
                        navigate("/onboarding", Default::default());
                        status.set(GuardStatus::Redirected);
                    }
                    _ => {
                        navigate("/", Default::default());
                        status.set(GuardStatus::Redirected);
                    }
                }
            }
        }
    });

    view! {
        {move || match status.get() {
            GuardStatus::Granted => children().into_any(),
            GuardStatus::Verifying => view! {
                <div class="flex flex-col items-center justify-center py-24 gap-4">
                    <Spinner/>
                    <p class=Theme::MUTED>"Checking your session..."</p>
                    <Show when=move || slow.get()>
                        <p class=Theme::MUTED>
                            "This is taking longer than expected. "
                            <a href="/login" class="underline">"Sign in manually"</a>
                        </p>
                    </Show>
                </div>
            }
            .into_any(),
            GuardStatus::Redirected => ().into_any(),
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::{GuardDecision, initial_decision, post_probe_decision};
    use crate::features::auth::types::{PlanTier, Session};

    fn session(display_name: Option<&str>) -> Session {
        Session {
            user_id: "u1".to_string(),
            email: "a@b.test".to_string(),
            display_name: display_name.map(str::to_string),
            plan: PlanTier::Free,
            tokens_remaining: 0,
            token: "bearer".to_string(),
            demo: false,
            subscription: None,
        }
    }

    #[test]
    fn manual_logout_denies_before_any_network_decision() {
        // The marker wins even over a live session.
        assert_eq!(
            initial_decision(true, Some(&session(Some("Ada")))),
            GuardDecision::Deny
        );
        assert_eq!(initial_decision(true, None), GuardDecision::Deny);
    }

    #[test]
    fn live_sessions_grant_or_onboard_without_probing() {
        assert_eq!(
            initial_decision(false, Some(&session(Some("Ada")))),
            GuardDecision::Grant
        );
        assert_eq!(
            initial_decision(false, Some(&session(None))),
            GuardDecision::Onboard
        );
        assert_eq!(
            initial_decision(false, Some(&session(Some("   ")))),
            GuardDecision::Onboard
        );
    }

    #[test]
    fn missing_sessions_require_the_probe() {
        assert_eq!(initial_decision(false, None), GuardDecision::Probe);
    }

    #[test]
    fn post_probe_never_probes_again() {
        assert_eq!(
            post_probe_decision(Some(&session(Some("Ada")))),
            GuardDecision::Grant
        );
        assert_eq!(
            post_probe_decision(Some(&session(None))),
            GuardDecision::Onboard
        );
        assert_eq!(post_probe_decision(None), GuardDecision::Deny);
    }
}
