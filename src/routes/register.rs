use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::app_lib::{AppError, browser, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::auth::types::PlanTier;
use crate::features::billing::plan_catalog;
use crate::features::botguard::{self, SignalTracker};

#[derive(Clone)]
struct RegisterInput {
    email: String,
    password: String,
    plan: PlanTier,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (plan, set_plan) = signal(PlanTier::Free);
    let (error, set_error) = signal::<Option<AppError>>(None);

    // Interaction signals for the bot report; the tracker never blocks
    // registration.
    let tracker = StoredValue::new(SignalTracker::opened_at(browser::now_ms()));
    let on_mouse_move = move |_| {
        tracker.update_value(SignalTracker::record_mouse_move);
    };

    let register_action = Action::new_local({
        let auth = auth.clone();
        move |input: &RegisterInput| {
            let auth = auth.clone();
            let input = input.clone();
            async move {
                auth.register(&input.email, &input.password, input.plan)
                    .await
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(()) => navigate("/onboarding", Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let report = tracker.with_value(|signals| signals.report(browser::now_ms()));
        spawn_local(async move {
            botguard::client::report(&report).await;
        });

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(AppError::Config(
                "Email and password are required.".to_string(),
            )));
            return;
        }
        if password_value.len() < 8 {
            set_error.set(Some(AppError::Config(
                "Passwords need at least 8 characters.".to_string(),
            )));
            return;
        }

        register_action.dispatch(RegisterInput {
            email: email_value,
            password: password_value,
            plan: plan.get_untracked(),
        });
    };

    let on_plan_change = move |event: leptos::ev::Event| {
        let value = event_target_value(&event);
        let selected = plan_catalog()
            .iter()
            .map(|offer| offer.tier)
            .find(|tier| tier.wire_name() == value)
            .unwrap_or_default();
        set_plan.set(selected);
    };

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto" on:mousemove=on_mouse_move>
                <h1 class=Theme::PAGE_TITLE>"Create your account"</h1>
                <p class=format!("{} mb-6 mt-1", Theme::MUTED)>
                    "Start on the free plan. Upgrade whenever you need more."
                </p>
                <form on:submit=on_submit>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="email">"Your email"</label>
                        <input
                            id="email"
                            type="email"
                            class=Theme::INPUT
                            autocomplete="email"
                            placeholder="name@company.com"
                            required
                            on:input=move |event| set_email.set(event_target_value(&event))
                        />
                    </div>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="password">"Choose a password"</label>
                        <input
                            id="password"
                            type="password"
                            class=Theme::INPUT
                            autocomplete="new-password"
                            required
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="plan">"Plan"</label>
                        <select id="plan" class=Theme::INPUT on:change=on_plan_change>
                            {plan_catalog()
                                .iter()
                                .map(|offer| {
                                    view! {
                                        <option
                                            value=offer.tier.wire_name()
                                            selected=offer.tier == PlanTier::Free
                                        >
                                            {format!(
                                                "{} ({}/month)",
                                                offer.tier.label(),
                                                offer.display_price,
                                            )}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    // Honeypot: hidden from humans, tempting to form fillers.
                    <div class="hidden" aria-hidden="true">
                        <label for="company_website">"Company website"</label>
                        <input
                            id="company_website"
                            type="text"
                            tabindex="-1"
                            autocomplete="off"
                            on:input=move |event| {
                                let value = event_target_value(&event);
                                tracker.update_value(|signals| signals.set_honeypot(&value));
                            }
                        />
                    </div>
                    <Button button_type="submit" disabled=register_action.pending()>
                        "Create account"
                    </Button>
                    {move || {
                        register_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    {move || {
                        error
                            .get()
                            .map(|err| {
                                view! {
                                    <div class="mt-4">
                                        <Alert kind=AlertKind::Error message=err.user_message() />
                                    </div>
                                }
                            })
                    }}
                </form>
                <p class=format!("{} mt-6", Theme::MUTED)>
                    "Already registered? "
                    <a href="/login" class="underline">"Sign in"</a>
                </p>
            </div>
        </AppShell>
    }
}
