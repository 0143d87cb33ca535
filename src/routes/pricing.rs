use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app_lib::{browser, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::auth::types::PlanTier;
use crate::features::billing::{CheckoutOutcome, CheckoutRequest, PlanOffer, client, plan_catalog};

#[derive(Clone)]
struct CheckoutInput {
    plan: PlanTier,
    email: Option<String>,
    password: Option<String>,
}

/// Plan cards plus checkout. Signed-in users go straight to Stripe;
/// anonymous visitors pick a plan and register inline on the way there.
#[component]
pub fn PricingPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let current_plan = auth.plan;

    let selected = RwSignal::new(None::<PlanTier>);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (checkout_error, set_checkout_error) = signal::<Option<String>>(None);

    let checkout_action = Action::new_local({
        let auth = auth.clone();
        move |input: &CheckoutInput| {
            let auth = auth.clone();
            let input = input.clone();
            async move {
                let origin = browser::location_origin();
                let request = CheckoutRequest {
                    plan: input.plan.wire_name().to_string(),
                    email: input.email,
                    password: input.password,
                    success_url: format!("{origin}/dashboard?checkout=success"),
                    cancel_url: format!("{origin}/pricing"),
                };
                let bearer = auth.bearer();
                client::create_checkout_session(&request, bearer.as_deref()).await
            }
        }
    });

    Effect::new(move |_| {
        if let Some(outcome) = checkout_action.value().get() {
            match outcome {
                CheckoutOutcome::Redirect { url } => browser::navigate_external(&url),
                CheckoutOutcome::Failed { message } => set_checkout_error.set(Some(message)),
            }
        }
    });

    let choose_plan = move |tier: PlanTier| {
        set_checkout_error.set(None);
        if is_authenticated.get_untracked() {
            checkout_action.dispatch(CheckoutInput {
                plan: tier,
                email: None,
                password: None,
            });
        } else {
            selected.set(Some(tier));
        }
    };

    let on_register_and_pay = move |event: SubmitEvent| {
        event.prevent_default();
        set_checkout_error.set(None);

        let Some(tier) = selected.get_untracked() else {
            return;
        };
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_checkout_error.set(Some("Email and password are required.".to_string()));
            return;
        }

        checkout_action.dispatch(CheckoutInput {
            plan: tier,
            email: Some(email_value),
            password: Some(password_value),
        });
    };

    view! {
        <AppShell>
            <div class="max-w-4xl mx-auto">
                <h1 class=format!("{} text-center", Theme::PAGE_TITLE)>"Simple pricing"</h1>
                <p class=format!("{} text-center mt-2 mb-8", Theme::MUTED)>
                    "Every plan renews its token balance monthly."
                </p>
                <div class="grid gap-6 md:grid-cols-3">
                    {plan_catalog()
                        .iter()
                        .map(|offer| {
                            plan_card(
                                offer,
                                is_authenticated,
                                current_plan,
                                checkout_action.pending(),
                                choose_plan,
                            )
                        })
                        .collect_view()}
                </div>
                <Show when=move || selected.get().is_some() && !is_authenticated.get()>
                    <form
                        class=format!("{} max-w-sm mx-auto mt-8", Theme::CARD)
                        on:submit=on_register_and_pay
                    >
                        <h2 class="font-semibold text-gray-900 dark:text-white mb-1">
                            {move || {
                                selected
                                    .get()
                                    .map(|tier| format!("Create your {} account", tier.label()))
                            }}
                        </h2>
                        <p class=format!("{} mb-4", Theme::MUTED)>
                            "You will finish payment on Stripe's secure checkout."
                        </p>
                        <div class="mb-4">
                            <label class=Theme::LABEL for="checkout-email">"Your email"</label>
                            <input
                                id="checkout-email"
                                type="email"
                                class=Theme::INPUT
                                autocomplete="email"
                                required
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-4">
                            <label class=Theme::LABEL for="checkout-password">"Choose a password"</label>
                            <input
                                id="checkout-password"
                                type="password"
                                class=Theme::INPUT
                                autocomplete="new-password"
                                required
                                on:input=move |event| set_password.set(event_target_value(&event))
                            />
                        </div>
                        <Button button_type="submit" disabled=checkout_action.pending()>
                            "Continue to payment"
                        </Button>
                        {move || {
                            checkout_action
                                .pending()
                                .get()
                                .then_some(view! { <div class="mt-4"><Spinner /></div> })
                        }}
                    </form>
                </Show>
                {move || {
                    checkout_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="max-w-sm mx-auto mt-6">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
            </div>
        </AppShell>
    }
}

fn plan_card(
    offer: &PlanOffer,
    is_authenticated: Signal<bool>,
    current_plan: Signal<PlanTier>,
    pending: Memo<bool>,
    choose_plan: impl Fn(PlanTier) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let tier = offer.tier;
    let is_paid = offer.is_paid();
    let is_current =
        Signal::derive(move || is_authenticated.get() && current_plan.get() == tier);

    view! {
        <div class=format!("{} flex flex-col", Theme::CARD)>
            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">{tier.label()}</h2>
            <p class="mt-2">
                <span class="text-3xl font-bold text-gray-900 dark:text-white">
                    {offer.display_price}
                </span>
                <span class=Theme::MUTED>"/month"</span>
            </p>
            <p class=format!("{} mt-1", Theme::MUTED)>
                {offer.token_allowance} " tokens per month"
            </p>
            <ul class="mt-4 space-y-2 flex-1">
                {offer
                    .features
                    .iter()
                    .map(|feature| {
                        view! {
                            <li class=format!("{} flex items-start gap-2", Theme::MUTED)>
                                <span class="text-emerald-600">"\u{2713}"</span>
                                {*feature}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="mt-6">
                <Show
                    when=move || is_current.get()
                    fallback=move || {
                        if is_paid {
                            view! {
                                <Button disabled={pending} {..}
                                    on:click=move |_| choose_plan(tier)
                                >
                                    "Choose " {tier.label()}
                                </Button>
                            }
                                .into_any()
                        } else {
                            view! {
                                <a
                                    href="/register"
                                    class="inline-block w-full text-center px-5 py-2.5 text-sm font-medium rounded-lg border border-gray-300 text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                                >
                                    "Start free"
                                </a>
                            }
                                .into_any()
                        }
                    }
                >
                    <span class="inline-block w-full text-center px-5 py-2.5 text-sm font-medium rounded-lg bg-gray-100 text-gray-500 dark:bg-gray-700 dark:text-gray-300">
                        "Current plan"
                    </span>
                </Show>
            </div>
        </div>
    }
}
