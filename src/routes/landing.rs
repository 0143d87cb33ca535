use leptos::prelude::*;

use crate::app_lib::theme::Theme;
use crate::components::AppShell;
use crate::features::auth::state::use_auth;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;

    view! {
        <AppShell>
            <div class="max-w-2xl mx-auto text-center py-12">
                <h1 class="text-4xl font-bold text-gray-900 dark:text-white">
                    "Describe it. Download it."
                </h1>
                <p class=format!("{} mt-4 text-base", Theme::MUTED)>
                    "SheetForge turns a plain-language description into a ready-to-use "
                    "Excel workbook: formulas, formatting, and sample data included."
                </p>
                <div class="mt-8 flex justify-center gap-4">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| {
                            view! {
                                <a
                                    href="/register"
                                    class="px-6 py-3 rounded-lg bg-emerald-600 text-white font-medium hover:bg-emerald-700"
                                >
                                    "Get started free"
                                </a>
                                <a
                                    href="/pricing"
                                    class="px-6 py-3 rounded-lg border border-gray-300 text-gray-700 font-medium hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                                >
                                    "See pricing"
                                </a>
                            }
                        }
                    >
                        <a
                            href="/dashboard"
                            class="px-6 py-3 rounded-lg bg-emerald-600 text-white font-medium hover:bg-emerald-700"
                        >
                            "Open the dashboard"
                        </a>
                    </Show>
                </div>
                <div class="mt-16 grid gap-6 sm:grid-cols-3 text-left">
                    <div class=Theme::CARD>
                        <h2 class="font-semibold text-gray-900 dark:text-white">"Prompt to sheet"</h2>
                        <p class=format!("{} mt-2", Theme::MUTED)>
                            "Budget trackers, invoices, rosters. If you can describe it, "
                            "you can download it."
                        </p>
                    </div>
                    <div class=Theme::CARD>
                        <h2 class="font-semibold text-gray-900 dark:text-white">"Bring a reference"</h2>
                        <p class=format!("{} mt-2", Theme::MUTED)>
                            "Upload an existing workbook and we match its structure and style."
                        </p>
                    </div>
                    <div class=Theme::CARD>
                        <h2 class="font-semibold text-gray-900 dark:text-white">"Real formulas"</h2>
                        <p class=format!("{} mt-2", Theme::MUTED)>
                            "Generated sheets use live formulas, not baked-in numbers."
                        </p>
                    </div>
                </div>
            </div>
        </AppShell>
    }
}
