//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the single coordinator for the page, restores any existing session
//! before the first route renders, and mirrors store updates into the
//! `AuthState` signal that views read. The dashboard route is gated by the
//! route guard, so signed-out visitors never build the protected view.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use authflow::config::{DEFAULT_MAGIC_LINK_EXPIRY_MINUTES, DEFAULT_SESSION_DURATION_MINUTES};
use authflow::{AppRoute, AuthConfig, AuthCoordinator, AuthStore, IdentityProvider};
use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
};

use crate::net::provider::{HttpIdentityProvider, ProviderEndpoints};
use crate::pages::{authenticate::AuthenticatePage, dashboard::DashboardPage, login::LoginPage};
use crate::state::auth::AuthState;
use crate::util::auth::{denied_redirect_path, route_allowed};

/// Coordinator type shared through context.
pub type AppCoordinator = AuthCoordinator<HttpIdentityProvider>;

/// Config for the page origin. Falls back to a same-origin relative callback
/// when the origin is unknown or unusable.
#[must_use]
pub fn app_config(origin: Option<&str>) -> AuthConfig {
    match origin.map(AuthConfig::for_origin) {
        Some(Ok(config)) => config,
        Some(Err(_e)) => {
            #[cfg(feature = "csr")]
            log::warn!("unusable page origin ({_e}); using relative callback");
            fallback_config()
        }
        None => fallback_config(),
    }
}

fn fallback_config() -> AuthConfig {
    AuthConfig {
        callback_url: AppRoute::Authenticate.path().to_owned(),
        session_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
        magic_link_expiry_minutes: DEFAULT_MAGIC_LINK_EXPIRY_MINUTES,
    }
}

fn page_origin() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Root application component.
///
/// Provides the coordinator and auth signal, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let provider = Arc::new(HttpIdentityProvider::new(ProviderEndpoints::from_build_env()));
    let coordinator =
        AppCoordinator::with_store(provider.clone(), AuthStore::default(), app_config(page_origin().as_deref()));

    let auth = RwSignal::new(AuthState::default());
    coordinator
        .store()
        .subscribe(move |authenticated| {
            auth.set(AuthState::from_status(authenticated, provider.current_user()));
        })
        .detach();
    coordinator.check_existing_session();

    // Evaluated before the dashboard view is built; tracking `auth` re-runs
    // it on every status change.
    let guard = coordinator.guard();
    let redirect_guard = guard.clone();
    let dashboard_allowed = move || {
        auth.track();
        Some(route_allowed(AppRoute::Dashboard, &guard))
    };
    let dashboard_redirect = move || denied_redirect_path(AppRoute::Dashboard, &redirect_guard);

    provide_context(coordinator);
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/authflow.css"/>
        <Title text="Sign In"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("authenticate") view=AuthenticatePage/>
                <ProtectedRoute
                    path=StaticSegment("dashboard")
                    view=DashboardPage
                    condition=dashboard_allowed
                    redirect_path=dashboard_redirect
                />
            </Routes>
        </Router>
    }
}
