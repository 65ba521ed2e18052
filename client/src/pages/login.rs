//! Login page supporting email magic links and third-party OAuth.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route (`/`). Sends magic links and starts OAuth redirects through
//! the shared coordinator; status changes arrive later via the callback page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use authflow::coordinator::EMPTY_EMAIL_MESSAGE;
use authflow::{AuthError, OAuthProvider};
use leptos::prelude::*;

/// Shown after the provider accepts a magic-link request.
pub const SEND_SUCCESS_MESSAGE: &str = "Magic link sent! Check your email.";
const SEND_FAILURE_MESSAGE: &str = "Failed to send magic link. Please try again.";
#[cfg(feature = "csr")]
const MESSAGE_CLEAR_MS: u32 = 5_000;

/// Inline feedback under the login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMessage {
    Success(String),
    Error(String),
}

impl LoginMessage {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success(_) => "login-message login-message--success",
            Self::Error(_) => "login-message login-message--error",
        }
    }
}

/// Message for a failed magic-link send. Input problems are shown verbatim;
/// provider failures get the generic retry text.
#[must_use]
pub fn send_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::Validation(message) => message.clone(),
        _ => SEND_FAILURE_MESSAGE.to_owned(),
    }
}

/// Message for an OAuth redirect that never left the page.
#[must_use]
pub fn oauth_failure_message(provider: OAuthProvider) -> String {
    format!("Failed to login with {}. Please try again.", provider.display_name())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let coordinator = expect_context::<crate::app::AppCoordinator>();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let message = RwSignal::new(None::<LoginMessage>);
    // Bumped per message so a stale clear timer leaves newer text alone.
    let message_seq = RwSignal::new(0_u64);

    let show_message = move |next: LoginMessage| {
        message.set(Some(next));
        message_seq.update(|seq| *seq += 1);
        #[cfg(feature = "csr")]
        {
            let shown = message_seq.get_untracked();
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(MESSAGE_CLEAR_MS).await;
                if message_seq.get_untracked() == shown {
                    message.set(None);
                }
            });
        }
    };

    let send_coordinator = coordinator.clone();
    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        if email_value.trim().is_empty() {
            show_message(LoginMessage::Error(EMPTY_EMAIL_MESSAGE.to_owned()));
            return;
        }
        busy.set(true);
        message.set(None);

        #[cfg(feature = "csr")]
        {
            let coordinator = send_coordinator.clone();
            leptos::task::spawn_local(async move {
                match coordinator.send_magic_link(&email_value).await {
                    Ok(()) => {
                        email.set(String::new());
                        show_message(LoginMessage::Success(SEND_SUCCESS_MESSAGE.to_owned()));
                    }
                    Err(e) => {
                        log::error!("magic link send failed: {e}");
                        show_message(LoginMessage::Error(send_failure_message(&e)));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (&send_coordinator, email_value);
    };

    let oauth_buttons = OAuthProvider::ALL
        .into_iter()
        .map(|provider| {
            let coordinator = coordinator.clone();
            let on_click = move |_: leptos::ev::MouseEvent| {
                if busy.get() {
                    return;
                }
                busy.set(true);

                #[cfg(feature = "csr")]
                {
                    let coordinator = coordinator.clone();
                    leptos::task::spawn_local(async move {
                        // Success navigates away; only failure returns here.
                        if let Err(e) = coordinator.start_oauth(provider).await {
                            log::error!("{provider} login failed: {e}");
                            show_message(LoginMessage::Error(oauth_failure_message(provider)));
                            busy.set(false);
                        }
                    });
                }
                #[cfg(not(feature = "csr"))]
                let _ = &coordinator;
            };
            view! {
                <button
                    class=format!("login-button login-button--{}", provider.as_str())
                    type="button"
                    disabled=move || busy.get()
                    on:click=on_click
                >
                    {format!("Continue with {}", provider.display_name())}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign In"</h1>
                <p class="login-card__subtitle">"We'll email you a magic link"</p>
                <form class="login-form" on:submit=on_send>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        disabled=move || busy.get()
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Sending..." } else { "Send Magic Link" }}
                    </button>
                </form>
                {move || {
                    message
                        .get()
                        .map(|m| view! { <p class=m.css_class()>{m.text().to_owned()}</p> })
                }}
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Or"</p>
                {oauth_buttons}
            </div>
        </div>
    }
}
