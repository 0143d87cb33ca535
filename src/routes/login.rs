use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app_lib::{AppError, api, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let login_action = Action::new_local({
        let auth = auth.clone();
        move |input: &LoginInput| {
            let auth = auth.clone();
            let input = input.clone();
            async move { auth.login(&input.email, &input.password).await }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(AppError::Config(
                "Email and password are required.".to_string(),
            )));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto">
                <h1 class=Theme::PAGE_TITLE>"Sign in"</h1>
                <p class=format!("{} mb-6 mt-1", Theme::MUTED)>
                    "Welcome back. Describe a sheet, get a workbook."
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
                        <label class=Theme::LABEL for="password">"Your password"</label>
                        <input
                            id="password"
                            type="password"
                            class=Theme::INPUT
                            autocomplete="current-password"
                            required
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>
                    <Button button_type="submit" disabled=login_action.pending()>
                        "Sign in"
                    </Button>
                    {move || {
                        login_action
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
                <div class="my-6 flex items-center gap-3">
                    <span class="h-px flex-1 bg-gray-200 dark:bg-gray-700"></span>
                    <span class=Theme::MUTED>"or"</span>
                    <span class="h-px flex-1 bg-gray-200 dark:bg-gray-700"></span>
                </div>
                <div class="flex flex-col gap-3">
                    <a
                        href=api::endpoint_url("auth/google")
                        class="w-full text-center px-5 py-2.5 text-sm font-medium rounded-lg border border-gray-300 text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                    >
                        "Continue with Google"
                    </a>
                    <a
                        href=api::endpoint_url("auth/azure")
                        class="w-full text-center px-5 py-2.5 text-sm font-medium rounded-lg border border-gray-300 text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                    >
                        "Continue with Microsoft"
                    </a>
                </div>
                <p class=format!("{} mt-6", Theme::MUTED)>
                    <a href="/reset-password" class="underline">"Forgot your password?"</a>
                    " · No account yet? "
                    <a href="/register" class="underline">"Get started"</a>
                </p>
            </div>
        </AppShell>
    }
}
