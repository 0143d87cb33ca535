use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app_lib::{AppError, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{client, state::use_auth};

/// Captures the display name new accounts are missing; the route guard
/// sends incomplete profiles here.
#[component]
pub fn OnboardingPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (display_name, set_display_name) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

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
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name = display_name.get_untracked().trim().to_string();
        if name.is_empty() {
            set_error.set(Some(AppError::Config(
                "Please tell us what to call you.".to_string(),
            )));
            return;
        }
        save_action.dispatch(name);
    };

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto">
                <h1 class=Theme::PAGE_TITLE>"One last thing"</h1>
                <p class=format!("{} mb-6 mt-1", Theme::MUTED)>
                    "What should we call you in the app?"
                </p>
                <form on:submit=on_submit>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="display-name">"Display name"</label>
                        <input
                            id="display-name"
                            type="text"
                            class=Theme::INPUT
                            autocomplete="name"
                            placeholder="Ada Lovelace"
                            required
                            on:input=move |event| set_display_name.set(event_target_value(&event))
                        />
                    </div>
                    <Button button_type="submit" disabled=save_action.pending()>
                        "Continue"
                    </Button>
                    {move || {
                        save_action
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
            </div>
        </AppShell>
    }
}
