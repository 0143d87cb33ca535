mod account;
mod auth_callback;
mod dashboard;
mod landing;
mod login;
mod not_found;
mod onboarding;
mod pricing;
mod register;
mod reset_password;

pub(crate) use account::AccountPage;
pub(crate) use auth_callback::AuthCallbackPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use landing::LandingPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use onboarding::OnboardingPage;
pub(crate) use pricing::PricingPage;
pub(crate) use register::RegisterPage;
pub(crate) use reset_password::ResetPasswordPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=LandingPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/pricing") view=PricingPage />
            <Route path=path!("/account") view=AccountPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/reset-password") view=ResetPasswordPage />
            <Route path=path!("/onboarding") view=OnboardingPage />
            <Route path=path!("/auth/callback") view=AuthCallbackPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
