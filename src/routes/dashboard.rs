use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::app_lib::{AppError, browser, theme::Theme};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::{RequireSession, state::use_auth};
use crate::features::generator::{
    POLL_INTERVAL_MS, PollRegistry, TOKENS_PER_GENERATION, client,
    types::{GenerateRequest, JobStatus},
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireSession>
                <GenerationPanel />
            </RequireSession>
        </AppShell>
    }
}

#[component]
fn GenerationPanel() -> impl IntoView {
    let auth = use_auth();
    let tokens_remaining = auth.tokens_remaining;
    let enhanced_mode = auth.enhanced_mode;

    let (prompt, set_prompt) = signal(String::new());
    let (workbook_name, set_workbook_name) = signal(String::new());
    let job = RwSignal::new(None::<JobStatus>);
    let (generate_error, set_generate_error) = signal::<Option<AppError>>(None);
    let (insufficient, set_insufficient) = signal(false);
    let reference = RwSignal::new(None::<(String, String)>);
    let (upload_error, set_upload_error) = signal::<Option<AppError>>(None);

    let registry = PollRegistry::new();
    {
        let registry = registry.clone();
        on_cleanup(move || registry.stop());
    }

    // File handles are not Send, so this action stays unsync.
    let upload_action = Action::new_unsync({
        let auth = auth.clone();
        move |file: &browser::FileHandle| {
            let auth = auth.clone();
            let file = file.clone();
            async move {
                let bearer = auth.bearer();
                let uploaded = client::upload_reference(&file, bearer.as_deref()).await?;
                let name = uploaded
                    .file_name
                    .unwrap_or_else(|| browser::file_name(&file));
                reference.set(Some((uploaded.file_id, name)));
                Ok::<(), AppError>(())
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Err(err)) = upload_action.value().get() {
            set_upload_error.set(Some(err));
        }
    });

    let on_file_selected = move |event: leptos::ev::Event| {
        set_upload_error.set(None);
        if let Some(file) = browser::selected_file(&event) {
            upload_action.dispatch(file);
        }
    };

    let generate_action = Action::new_local({
        let auth = auth.clone();
        let registry = registry.clone();
        move |request: &GenerateRequest| {
            let auth = auth.clone();
            let registry = registry.clone();
            let request = request.clone();
            async move {
                let bearer = auth.bearer();
                let csrf = auth.csrf.get_or_fetch().await;
                let started =
                    client::start_generation(&request, bearer.as_deref(), csrf.as_deref()).await?;

                job.set(Some(JobStatus::Queued));
                let token = registry.begin();
                let registry = registry.clone();
                spawn_local(async move {
                    loop {
                        if !token.is_live() {
                            break;
                        }
                        let polled = client::job_status(&started.job_id, auth.bearer().as_deref()).await;
                        // A newer generation may have taken over mid-flight.
                        if !token.is_live() {
                            break;
                        }
                        match polled {
                            Ok(status) => {
                                let terminal = status.is_terminal();
                                job.set(Some(status));
                                if terminal {
                                    registry.stop();
                                    auth.refresh_user_data().await;
                                    break;
                                }
                            }
                            Err(err) => log::debug!("job status poll failed: {err}"),
                        }
                        browser::sleep_ms(POLL_INTERVAL_MS).await;
                    }
                });
                Ok::<(), AppError>(())
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Err(err)) = generate_action.value().get() {
            job.set(None);
            set_generate_error.set(Some(err));
        }
    });

    let on_submit = {
        let auth = auth.clone();
        move |event: SubmitEvent| {
            event.prevent_default();
            set_generate_error.set(None);
            set_insufficient.set(false);

            let prompt_value = prompt.get_untracked().trim().to_string();
            if prompt_value.is_empty() {
                set_generate_error.set(Some(AppError::Config(
                    "Describe the sheet you need first.".to_string(),
                )));
                return;
            }
            if !auth.use_tokens(TOKENS_PER_GENERATION) {
                set_insufficient.set(true);
                return;
            }

            let name = workbook_name.get_untracked().trim().to_string();
            generate_action.dispatch(GenerateRequest {
                prompt: prompt_value,
                workbook_name: (!name.is_empty()).then_some(name),
                reference_file_id: reference
                    .get_untracked()
                    .map(|(file_id, _)| file_id),
                enhanced: enhanced_mode.get_untracked(),
            });
        }
    };

    let set_enhanced = {
        let auth = auth.clone();
        move |event: leptos::ev::Event| {
            auth.set_enhanced_mode(event_target_checked(&event));
        }
    };

    let busy = Signal::derive(move || {
        generate_action.pending().get()
            || matches!(job.get(), Some(JobStatus::Queued | JobStatus::Running))
    });

    view! {
        <div class="max-w-2xl mx-auto">
            <div class="flex items-center justify-between">
                <h1 class=Theme::PAGE_TITLE>"New workbook"</h1>
                <span class=Theme::MUTED>
                    {move || tokens_remaining.get()} " tokens left"
                </span>
            </div>
            <form class=format!("{} mt-4", Theme::CARD) on:submit=on_submit>
                <div class="mb-5">
                    <label class=Theme::LABEL for="prompt">"Describe your spreadsheet"</label>
                    <textarea
                        id="prompt"
                        rows="5"
                        class=Theme::INPUT
                        placeholder="A monthly budget tracker with income, fixed costs, and a savings-rate chart"
                        required
                        prop:value=move || prompt.get()
                        on:input=move |event| set_prompt.set(event_target_value(&event))
                    ></textarea>
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="workbook-name">"Workbook name (optional)"</label>
                    <input
                        id="workbook-name"
                        type="text"
                        class=Theme::INPUT
                        placeholder="budget-2026"
                        on:input=move |event| set_workbook_name.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="reference">"Reference workbook (optional)"</label>
                    <input
                        id="reference"
                        type="file"
                        accept=".xlsx,.xls,.csv"
                        class=format!("{} file:mr-3 file:px-3 file:py-1 file:rounded file:border-0", Theme::INPUT)
                        on:change=on_file_selected
                    />
                    {move || {
                        upload_action
                            .pending()
                            .get()
                            .then_some(view! { <p class=Theme::MUTED>"Uploading..."</p> })
                    }}
                    {move || {
                        reference
                            .get()
                            .map(|(_, name)| {
                                view! {
                                    <p class=Theme::MUTED>"Using " {name} " as a reference."</p>
                                }
                            })
                    }}
                    {move || {
                        upload_error
                            .get()
                            .map(|err| {
                                view! {
                                    <div class="mt-2">
                                        <Alert kind=AlertKind::Error message=err.user_message() />
                                    </div>
                                }
                            })
                    }}
                </div>
                <label class="flex items-center gap-2 mb-5">
                    <input
                        type="checkbox"
                        prop:checked=move || enhanced_mode.get()
                        on:change=set_enhanced
                    />
                    <span class=Theme::MUTED>
                        "Enhanced mode (slower, richer formatting)"
                    </span>
                </label>
                <Button button_type="submit" disabled=busy>
                    "Generate workbook"
                </Button>
                <Show when=move || insufficient.get()>
                    <div class="mt-4">
                        <Alert
                            kind=AlertKind::Info
                            message="You are out of tokens for this period.".to_string()
                        />
                        <p class=format!("{} mt-2", Theme::MUTED)>
                            <A href="/pricing" {..} class="underline">
                                "Upgrade your plan"
                            </A>
                            " to keep generating."
                        </p>
                    </div>
                </Show>
                {move || {
                    generate_error
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
            <JobStatusPanel job=job />
        </div>
    }
}

#[component]
fn JobStatusPanel(job: RwSignal<Option<JobStatus>>) -> impl IntoView {
    move || {
        job.get().map(|status| {
            let label = status.label();
            let body = match status {
                JobStatus::Queued | JobStatus::Running => view! {
                    <div class="flex items-center gap-3">
                        <Spinner />
                        <p class=Theme::MUTED>
                            {label} "... this usually takes under a minute."
                        </p>
                    </div>
                }
                .into_any(),
                JobStatus::Done { download_url } => view! {
                    <div>
                        <p class="font-medium text-gray-900 dark:text-white">
                            "Your workbook is ready."
                        </p>
                        <a
                            href=download_url
                            download=""
                            class="inline-block mt-3 px-5 py-2.5 rounded-lg bg-emerald-600 text-white text-sm font-medium hover:bg-emerald-700"
                        >
                            "Download workbook"
                        </a>
                    </div>
                }
                .into_any(),
                JobStatus::Failed { error } => view! {
                    <Alert kind=AlertKind::Error message=error />
                }
                .into_any(),
            };
            view! { <div class=format!("{} mt-6", Theme::CARD)>{body}</div> }
        })
    }
}
