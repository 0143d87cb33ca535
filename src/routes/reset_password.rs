use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::app_lib::{AppError, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{client, state::use_auth};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let (email, set_email) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (sent, set_sent) = signal(false);

    let reset_action = Action::new_local({
        let auth = auth.clone();
        move |address: &String| {
            let auth = auth.clone();
            let address = address.clone();
            async move {
                let csrf = auth.csrf.get_or_fetch().await;
                client::request_password_reset(&address, csrf.as_deref()).await
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = reset_action.value().get() {
            match result {
                Ok(()) => set_sent.set(true),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_sent.set(false);

        let address = email.get_untracked().trim().to_string();
        if address.is_empty() {
            set_error.set(Some(AppError::Config("Email is required.".to_string())));
            return;
        }
        reset_action.dispatch(address);
    };

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto">
                <h1 class=Theme::PAGE_TITLE>"Reset your password"</h1>
                <p class=format!("{} mb-6 mt-1", Theme::MUTED)>
                    "Enter your email and we will send reset instructions."
                </p>
                <form on:submit=on_submit>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="email">"Your email"</label>
                        <input
                            id="email"
                            type="email"
                            class=Theme::INPUT
                            autocomplete="email"
                            required
                            on:input=move |event| set_email.set(event_target_value(&event))
                        />
                    </div>
                    <Button button_type="submit" disabled=reset_action.pending()>
                        "Send reset link"
                    </Button>
                    {move || {
                        reset_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    <Show when=move || sent.get()>
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Success
                                message="If that address has an account, reset instructions are on the way."
                                    .to_string()
                            />
                        </div>
                    </Show>
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
                    <a href="/login" class="underline">"Back to sign in"</a>
                </p>
            </div>
        </AppShell>
    }
}
