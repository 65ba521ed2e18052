//! Dashboard page showing the signed-in user's profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route (`/dashboard`). The router only builds this page when the
//! route guard allows it; the logout button signs out and returns to login.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use authflow::UserProfile;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Label/value rows for the profile card.
#[must_use]
pub fn profile_rows(user: &UserProfile) -> [(&'static str, String); 4] {
    [
        ("Name", user.display_name()),
        ("Email", user.display_email().to_owned()),
        ("User ID", user.display_id().to_owned()),
        ("Auth method", user.auth_method()),
    ]
}

/// Dashboard page. Mounted behind the router's guard check.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let coordinator = expect_context::<crate::app::AppCoordinator>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let on_logout = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let coordinator = coordinator.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                coordinator.logout().await;
                busy.set(false);
                navigate("/", leptos_router::NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (&coordinator, &navigate);
    };

    let rows = move || {
        let user = auth.get().user.unwrap_or_default();
        profile_rows(&user)
            .into_iter()
            .map(|(label, value)| {
                view! {
                    <div class="profile-row">
                        <span class="profile-row__label">{label}</span>
                        <span class="profile-row__value">{value}</span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="dashboard-page">
            <div class="dashboard-card">
                <h1>{move || format!("Welcome, {}", auth.get().user.unwrap_or_default().display_name())}</h1>
                <div class="profile">{rows}</div>
                <button class="login-button" type="button" disabled=move || busy.get() on:click=on_logout>
                    {move || if busy.get() { "Signing out..." } else { "Logout" }}
                </button>
            </div>
        </div>
    }
}
