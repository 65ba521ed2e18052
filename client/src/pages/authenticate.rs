//! Callback landing page for magic-link and OAuth redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider redirects here with `token` and optional
//! `stytch_token_type` query parameters. One resolver runs per page load;
//! success moves on to the dashboard, failure stays here with a message.

#[cfg(test)]
#[path = "authenticate_test.rs"]
mod authenticate_test;

use authflow::CallbackState;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

const LOADING_TEXT: &str = "Authenticating...";
const REDIRECTING_TEXT: &str = "Signed in. Redirecting...";

/// Text shown for a callback state.
#[must_use]
pub fn status_text(state: &CallbackState) -> &str {
    match state {
        CallbackState::Parsing | CallbackState::Exchanging(_) => LOADING_TEXT,
        CallbackState::Succeeded => REDIRECTING_TEXT,
        CallbackState::Failed(message) => message,
    }
}

#[component]
pub fn AuthenticatePage() -> impl IntoView {
    let coordinator = expect_context::<crate::app::AppCoordinator>();
    let location = use_location();
    let state = RwSignal::new(CallbackState::Parsing);

    #[cfg(feature = "csr")]
    {
        use authflow::{CallbackParameters, CallbackResolver};
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        let navigate = use_navigate();
        let params = CallbackParameters::from_query(&location.search.get_untracked());
        leptos::task::spawn_local(async move {
            let outcome = CallbackResolver::new(coordinator).resolve(params).await;
            if let Some(message) = outcome.error_message() {
                log::error!("authentication callback failed: {message}");
            }
            let target = outcome.redirect_target();
            state.set(outcome);
            if let Some(route) = target {
                navigate(route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (coordinator, location);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                {move || {
                    let current = state.get();
                    let failed = current.error_message().is_some();
                    view! {
                        <Show when=move || !failed>
                            <div class="auth-spinner"></div>
                        </Show>
                        <p class=if failed { "auth-message auth-message--error" } else { "auth-message" }>
                            {status_text(&current).to_owned()}
                        </p>
                        <Show when=move || failed>
                            <a class="login-button" href="/">"Back to login"</a>
                        </Show>
                    }
                }}
            </div>
        </div>
    }
}
