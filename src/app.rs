use leptos::prelude::*;
use leptos_router::components::Router;

use crate::features::auth::state::AuthProvider;
use crate::routes::AppRoutes;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Router>
                <AppRoutes />
            </Router>
        </AuthProvider>
    }
}
