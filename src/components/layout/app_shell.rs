//! Shared layout wrapper with navigation and content container. It
//! centralizes header markup, the mobile menu toggle, and the theme switch
//! so routes can focus on content. Navigation remains client-side; backend
//! routes must enforce access control.

use leptos::{prelude::*, task::spawn_local};
use leptos_router::{
    components::A,
    hooks::{use_location, use_navigate},
};

use crate::app_lib::{build_info, theme};
use crate::features::auth::state::use_auth;

const NAV_LINK: &str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-emerald-700 md:p-0 dark:text-white md:dark:hover:text-emerald-400 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

/// Wraps routes with a header, main content container, and footer.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let toggle_menu = move |_| {
        set_menu_open.update(|open| *open = !*open);
    };
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let tokens_remaining = auth.tokens_remaining;
    let location = use_location();
    let on_login = move || location.pathname.get() == "/login";
    let navigate = use_navigate();

    let dark = RwSignal::new(theme::read_preference());
    theme::apply(dark.get_untracked());
    let toggle_theme = move |_| {
        dark.update(|current| *current = theme::toggle(*current));
    };

    let sign_out = {
        let auth = auth.clone();
        move |_| {
            let auth = auth.clone();
            let navigate = navigate.clone();
            set_menu_open.set(false);
            spawn_local(async move {
                auth.logout().await;
                navigate("/", Default::default());
            });
        }
    };

    view! {
        <div class="min-h-screen flex flex-col bg-gray-50 dark:bg-gray-950">
            <header class="border-b border-gray-200 bg-white dark:bg-gray-900 dark:border-gray-800">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A
                        href="/"
                        {..}
                        class="flex items-center space-x-2"
                        on:click=move |_| set_menu_open.set(false)
                    >
                        <svg
                            class="h-7 w-7 text-emerald-600"
                            viewBox="0 0 24 24"
                            fill="none"
                            aria-hidden="true"
                        >
                            <rect x="3" y="3" width="18" height="18" rx="2" stroke="currentColor" stroke-width="2" />
                            <path d="M3 9h18M3 15h18M9 3v18M15 3v18" stroke="currentColor" stroke-width="1.5" />
                        </svg>
                        <span class="font-semibold whitespace-nowrap text-gray-900 dark:text-white">
                            "SheetForge"
                        </span>
                    </A>
                    <div class="flex items-center gap-2 md:order-2">
                        <button
                            type="button"
                            class="p-2 rounded-lg text-gray-500 hover:bg-gray-100 dark:text-gray-400 dark:hover:bg-gray-700"
                            aria-label="Toggle dark mode"
                            on:click=toggle_theme
                        >
                            {move || if dark.get() { "\u{2600}" } else { "\u{263E}" }}
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-gray-200 dark:text-gray-400 dark:hover:bg-gray-700 dark:focus:ring-gray-600"
                            aria-controls="navbar-default"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=toggle_menu
                        >
                            <span class="sr-only">"Open main menu"</span>
                            <svg
                                class="w-5 h-5"
                                aria-hidden="true"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 17 14"
                            >
                                <path
                                    stroke="currentColor"
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                    stroke-width="2"
                                    d="M1 1h15M1 7h15M1 13h15"
                                ></path>
                            </svg>
                        </button>
                    </div>
                    <div
                        id="navbar-default"
                        class="w-full md:block md:w-auto md:order-1"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="font-medium flex flex-col p-4 md:p-0 mt-4 border border-gray-100 rounded-lg bg-gray-50 md:flex-row md:items-center md:space-x-6 md:mt-0 md:border-0 md:bg-white dark:bg-gray-800 md:dark:bg-gray-900 dark:border-gray-700">
                            <li>
                                <A
                                    href="/pricing"
                                    {..}
                                    class=NAV_LINK
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    "Pricing"
                                </A>
                            </li>
                            <Show when=move || is_authenticated.get()>
                                <li>
                                    <A
                                        href="/dashboard"
                                        {..}
                                        class=NAV_LINK
                                        on:click=move |_| set_menu_open.set(false)
                                    >
                                        "Dashboard"
                                    </A>
                                </li>
                                <li>
                                    <A
                                        href="/account"
                                        {..}
                                        class=NAV_LINK
                                        on:click=move |_| set_menu_open.set(false)
                                    >
                                        "Account"
                                    </A>
                                </li>
                                <li>
                                    <span class="inline-block py-1 px-3 text-xs font-semibold rounded-full bg-emerald-100 text-emerald-800 dark:bg-emerald-900/40 dark:text-emerald-200">
                                        {move || tokens_remaining.get()} " tokens"
                                    </span>
                                </li>
                            </Show>
                            <li>
                                <Show
                                    when=move || is_authenticated.get()
                                    fallback=move || {
                                        view! {
                                            <Show
                                                when=on_login
                                                fallback=move || {
                                                    view! {
                                                        <A
                                                            href="/login"
                                                            {..}
                                                            class=NAV_LINK
                                                            on:click=move |_| set_menu_open.set(false)
                                                        >
                                                            "Sign In"
                                                        </A>
                                                    }
                                                }
                                            >
                                                <A
                                                    href="/register"
                                                    {..}
                                                    class=NAV_LINK
                                                    on:click=move |_| set_menu_open.set(false)
                                                >
                                                    "Get Started"
                                                </A>
                                            </Show>
                                        }
                                    }
                                >
                                    <button type="button" class=NAV_LINK on:click=sign_out.clone()>
                                        "Sign Out"
                                    </button>
                                </Show>
                            </li>
                        </ul>
                    </div>
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">
                    {children()}
                </div>
            </main>
            <footer class="border-t border-gray-200 dark:border-gray-800 py-4">
                <p class="text-center text-xs text-gray-400 dark:text-gray-500">
                    "SheetForge " {build_info::short_commit_hash()}
                </p>
            </footer>
        </div>
    }
}
