use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app_lib::{AppError, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::types::SessionEntry;
use crate::features::auth::{RequireSession, client, state::use_auth};
use crate::features::tokens;

#[component]
pub fn AccountPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireSession>
                <div class="max-w-2xl mx-auto space-y-6">
                    <h1 class=Theme::PAGE_TITLE>"Your account"</h1>
                    <ProfileCard />
                    <SubscriptionCard />
                    <TokenBalanceCard />
                    <SessionsCard />
                </div>
            </RequireSession>
        </AppShell>
    }
}

#[component]
fn ProfileCard() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let (display_name, set_display_name) = signal(String::new());
    let (feedback, set_feedback) = signal::<Option<(AlertKind, String)>>(None);

    let save_action = Action::new_local({
        let auth = auth.clone();
        move |name: &String| {
            let auth = auth.clone();
            let name = name.clone();
            async move {
                let bearer = auth.bearer();
                let csrf = auth.csrf.get_or_fetch().await;
                client::update_display_name(&name, bearer.as_deref(), csrf.as_deref()).await?;
                auth.refresh_user_data().await;
                Ok::<(), AppError>(())
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(()) => set_feedback.set(Some((AlertKind::Success, "Name updated.".to_string()))),
                Err(err) => set_feedback.set(Some((AlertKind::Error, err.user_message()))),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_feedback.set(None);

        let name = display_name.get_untracked().trim().to_string();
        if name.is_empty() {
            set_feedback.set(Some((
                AlertKind::Error,
                "Display name cannot be empty.".to_string(),
            )));
            return;
        }
        save_action.dispatch(name);
    };

    view! {
        <section class=Theme::CARD>
            <h2 class="font-semibold text-gray-900 dark:text-white mb-4">"Profile"</h2>
            <p class=format!("{} mb-4", Theme::MUTED)>
                "Signed in as "
                <span class="font-medium">
                    {move || session.get().map(|current| current.email).unwrap_or_default()}
                </span>
            </p>
            <form on:submit=on_submit class="flex items-end gap-3">
                <div class="flex-1">
                    <label class=Theme::LABEL for="display-name">"Display name"</label>
                    <input
                        id="display-name"
                        type="text"
                        class=Theme::INPUT
                        placeholder=move || {
                            session
                                .get()
                                .and_then(|current| current.display_name)
                                .unwrap_or_else(|| "Your name".to_string())
                        }
                        on:input=move |event| set_display_name.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=save_action.pending()>
                    "Save"
                </Button>
            </form>
            {move || {
                feedback
                    .get()
                    .map(|(kind, message)| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=kind message=message />
                            </div>
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn SubscriptionCard() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let plan = auth.plan;

    view! {
        <section class=Theme::CARD>
            <h2 class="font-semibold text-gray-900 dark:text-white mb-4">"Subscription"</h2>
            {move || {
                let subscription = session.get().and_then(|current| current.subscription);
                match subscription {
                    Some(summary) => view! {
                        <div class="space-y-1">
                            <p class="text-gray-900 dark:text-white">
                                {summary.plan.label()} " plan, " {summary.status.label().to_lowercase()}
                            </p>
                            {summary
                                .current_period_end
                                .map(|end| {
                                    view! {
                                        <p class=Theme::MUTED>"Renews or ends " {end}</p>
                                    }
                                })}
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <p class=Theme::MUTED>
                            "You are on the " {plan.get().label()} " plan with no paid subscription."
                        </p>
                    }
                    .into_any(),
                }
            }}
            <p class=format!("{} mt-4", Theme::MUTED)>
                <a href="/pricing" class="underline">"Change plan"</a>
            </p>
        </section>
    }
}

#[component]
fn TokenBalanceCard() -> impl IntoView {
    let auth = use_auth();
    let balance = LocalResource::new({
        let auth = auth.clone();
        move || {
            let bearer = auth.bearer();
            async move { tokens::client::fetch_balance(bearer.as_deref()).await }
        }
    });

    view! {
        <section class=Theme::CARD>
            <h2 class="font-semibold text-gray-900 dark:text-white mb-4">"Token balance"</h2>
            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match balance.get() {
                    Some(Ok(detail)) => {
                        let ratio_percent = (detail.remaining_ratio() * 100.0).round() as u32;
                        view! {
                            <div>
                                <p class="text-gray-900 dark:text-white">
                                    {detail.current_tokens} " of " {detail.max_tokens}
                                    " tokens remaining"
                                </p>
                                <div class="mt-2 h-2 rounded-full bg-gray-200 dark:bg-gray-700 overflow-hidden">
                                    <div
                                        class="h-full bg-emerald-500"
                                        style=format!("width: {ratio_percent}%")
                                    ></div>
                                </div>
                                <p class=format!("{} mt-2", Theme::MUTED)>
                                    {detail.purchased_tokens} " purchased on top. Resets in "
                                    {detail.days_until_reset} " days."
                                </p>
                                {detail
                                    .billing_period_end
                                    .map(|end| {
                                        view! {
                                            <p class=Theme::MUTED>
                                                "Current billing period ends " {end}
                                            </p>
                                        }
                                    })}
                            </div>
                        }
                        .into_any()
                    }
                    Some(Err(err)) => view! {
                        <Alert kind=AlertKind::Error message=err.user_message() />
                    }
                    .into_any(),
                    None => view! { <Spinner /> }.into_any(),
                }}
            </Suspense>
        </section>
    }
}

#[component]
fn SessionsCard() -> impl IntoView {
    let auth = use_auth();
    let (revoke_error, set_revoke_error) = signal::<Option<String>>(None);
    let sessions = LocalResource::new({
        let auth = auth.clone();
        move || {
            let bearer = auth.bearer();
            async move { client::list_sessions(bearer.as_deref()).await }
        }
    });

    let revoke_action = Action::new_local({
        let auth = auth.clone();
        move |session_id: &String| {
            let auth = auth.clone();
            let session_id = session_id.clone();
            async move {
                let bearer = auth.bearer();
                client::revoke_session(&session_id, bearer.as_deref()).await
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = revoke_action.value().get() {
            match result {
                Ok(()) => sessions.refetch(),
                Err(err) => set_revoke_error.set(Some(err.user_message())),
            }
        }
    });

    view! {
        <section class=Theme::CARD>
            <h2 class="font-semibold text-gray-900 dark:text-white mb-4">"Active sessions"</h2>
            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match sessions.get() {
                    Some(Ok(list)) if list.is_empty() => view! {
                        <p class=Theme::MUTED>"No other sessions."</p>
                    }
                    .into_any(),
                    Some(Ok(list)) => view! {
                        <ul class="space-y-2">
                            <For
                                each=move || list.clone()
                                key=|entry| entry.id.clone()
                                children=move |entry| session_row(entry, revoke_action)
                            />
                        </ul>
                    }
                    .into_any(),
                    Some(Err(err)) => view! {
                        <Alert kind=AlertKind::Error message=err.user_message() />
                    }
                    .into_any(),
                    None => view! { <Spinner /> }.into_any(),
                }}
            </Suspense>
            {move || {
                revoke_error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=message />
                            </div>
                        }
                    })
            }}
        </section>
    }
}

fn session_row(
    entry: SessionEntry,
    revoke_action: Action<String, Result<(), AppError>>,
) -> impl IntoView {
    let id = entry.id.clone();
    let device = entry
        .user_agent
        .clone()
        .unwrap_or_else(|| "Unknown device".to_string());
    let seen = entry
        .last_seen_at
        .clone()
        .or(entry.created_at.clone())
        .unwrap_or_default();

    view! {
        <li class=Theme::LIST_ITEM_FLAT>
            <div class="min-w-0 mr-4">
                <p class="text-sm text-gray-900 dark:text-white truncate">{device}</p>
                <p class=Theme::MUTED>{seen}</p>
            </div>
            {if entry.current {
                view! {
                    <span class="text-xs font-semibold text-emerald-700 dark:text-emerald-300">
                        "This device"
                    </span>
                }
                .into_any()
            } else {
                view! {
                    <button
                        type="button"
                        class="text-sm text-red-600 hover:underline dark:text-red-400"
                        on:click=move |_| {
                            revoke_action.dispatch(id.clone());
                        }
                    >
                        "Revoke"
                    </button>
                }
                .into_any()
            }}
        </li>
    }
}
