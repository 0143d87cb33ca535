use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::app_lib::{browser, theme::Theme};
use crate::components::{AppShell, Spinner};
use crate::features::auth::callback::{ParsedCallback, Provider, parse_callback, provider_error_message};
use crate::features::auth::types::CallbackExchangeRequest;
use crate::features::auth::{client, jwt, state::use_auth};

/// How long the error panel stays up before the automatic redirect home.
const REDIRECT_DELAY_MS: u32 = 5_000;

#[derive(Clone, PartialEq)]
enum CallbackStatus {
    Working { email: Option<String> },
    Failed { message: String, detail: Option<String> },
}

/// Landing route for provider redirects. Parses the fragment/query, scrubs
/// the credential out of the visible URL, exchanges it server-side, and
/// installs the resulting session.
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let status = RwSignal::new(CallbackStatus::Working { email: None });

    spawn_local(async move {
        let fragment = browser::location_fragment();
        let query = browser::location_query();
        let parsed = parse_callback(&fragment, &query);
        // The raw credential must not stay visible in history or referrers.
        browser::strip_url_credentials("/auth/callback");

        let (provider, request) = match parsed {
            ParsedCallback::ProviderError { code, description } => {
                fail(
                    status,
                    provider_error_message(&code, description.as_deref()),
                    Some(format!("provider error code: {code}")),
                    navigate.clone(),
                );
                return;
            }
            ParsedCallback::IdToken { raw } => {
                let email = jwt::peek_email(&raw);
                let subject = jwt::peek_subject(&raw);
                status.set(CallbackStatus::Working {
                    email: email.clone(),
                });
                (
                    Provider::AzureB2c,
                    CallbackExchangeRequest {
                        provider: Provider::AzureB2c.wire_name().to_string(),
                        id_token: raw,
                        user_details: email,
                        user_id: subject,
                    },
                )
            }
            // An authorization code is opaque; there is nothing to peek.
            ParsedCallback::AuthCode { code } => (
                Provider::Google,
                CallbackExchangeRequest {
                    provider: Provider::Google.wire_name().to_string(),
                    id_token: code,
                    user_details: None,
                    user_id: None,
                },
            ),
            ParsedCallback::Missing => {
                fail(
                    status,
                    "No sign-in information found in the callback URL.".to_string(),
                    None,
                    navigate.clone(),
                );
                return;
            }
        };

        match client::exchange_callback(provider, &request).await {
            Ok(session) => {
                auth.set_user(Some(session));
                navigate("/dashboard", Default::default());
            }
            Err(err) => {
                fail(
                    status,
                    format!("Signing in with {provider} did not work."),
                    Some(err.to_string()),
                    navigate,
                );
            }
        }
    });

    view! {
        <AppShell>
            <div class="max-w-md mx-auto text-center py-16">
                {move || match status.get() {
                    CallbackStatus::Working { email } => view! {
                        <div class="flex flex-col items-center gap-4">
                            <Spinner />
                            <p class=Theme::MUTED>
                                {match email {
                                    Some(address) => format!("Signing you in as {address}..."),
                                    None => "Completing your sign-in...".to_string(),
                                }}
                            </p>
                        </div>
                    }
                    .into_any(),
                    CallbackStatus::Failed { message, detail } => view! {
                        <div class=Theme::CARD>
                            <h1 class="text-lg font-semibold text-red-700 dark:text-red-300">
                                "Sign-in failed"
                            </h1>
                            <p class="mt-2 text-gray-900 dark:text-white">{message}</p>
                            {detail
                                .map(|detail| {
                                    view! {
                                        <p class=format!("{} mt-2 font-mono text-xs break-all", Theme::MUTED)>
                                            {detail}
                                        </p>
                                    }
                                })}
                            <p class=format!("{} mt-4", Theme::MUTED)>
                                "Taking you back to the start page shortly. "
                                <a href="/" class="underline">"Go now"</a>
                            </p>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </AppShell>
    }
}

/// Shows the error panel and schedules the automatic redirect home.
fn fail(
    status: RwSignal<CallbackStatus>,
    message: String,
    detail: Option<String>,
    navigate: impl Fn(&str, leptos_router::NavigateOptions) + 'static,
) {
    log::warn!("provider callback failed: {message}");
    status.set(CallbackStatus::Failed { message, detail });
    spawn_local(async move {
        browser::sleep_ms(REDIRECT_DELAY_MS).await;
        navigate("/", Default::default());
    });
}
