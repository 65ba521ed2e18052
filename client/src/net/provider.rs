//! Browser identity provider over HTTP.
//!
//! Browser (csr): real calls via `gloo-net`, OAuth start via
//! `window.location`. Other builds: network methods fail with
//! [`ProviderError::Network`] so native tests never touch a socket.
//!
//! ERROR HANDLING
//! ==============
//! Non-OK responses become [`ProviderError::Rejected`] when the body carries an
//! `error_message`, otherwise [`ProviderError::Unexpected`]. The session cache
//! is cleared on revoke whatever the provider answers.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use authflow::{IdentityProvider, OAuthProvider, ProviderError, Session, UserProfile};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::util::session_storage;

const SESSION_STORAGE_KEY: &str = "authflow_session";
const DEFAULT_PROVIDER_URL: &str = "/api/auth";

/// Where the provider lives and how to identify this app to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub base_url: String,
    pub public_token: String,
}

impl ProviderEndpoints {
    /// Read `AUTHFLOW_PROVIDER_URL` and `AUTHFLOW_PUBLIC_TOKEN` at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("AUTHFLOW_PROVIDER_URL").unwrap_or(DEFAULT_PROVIDER_URL),
            option_env!("AUTHFLOW_PUBLIC_TOKEN").unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn new(base_url: &str, public_token: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), public_token: public_token.to_owned() }
    }

    fn magic_link_send_url(&self) -> String {
        format!("{}/magic_links/email/login_or_create", self.base_url)
    }

    fn magic_link_authenticate_url(&self) -> String {
        format!("{}/magic_links/authenticate", self.base_url)
    }

    fn oauth_authenticate_url(&self) -> String {
        format!("{}/oauth/authenticate", self.base_url)
    }

    fn session_revoke_url(&self) -> String {
        format!("{}/sessions/revoke", self.base_url)
    }

    /// Consent-screen start URL. The callback serves as both the login and
    /// signup return target.
    fn oauth_start_url(&self, provider: OAuthProvider, return_url: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("public_token", &self.public_token)
            .append_pair("login_redirect_url", return_url)
            .append_pair("signup_redirect_url", return_url)
            .finish();
        format!("{}/oauth/{}/start?{query}", self.base_url, provider.as_str())
    }
}

/// Session plus user as returned by a successful token exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct CachedAuth {
    session: Session,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: Option<String>,
}

/// Map a non-OK response body to a provider error.
#[cfg(any(test, feature = "csr"))]
fn rejection_from_body(body: &str) -> ProviderError {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .filter(|m| !m.trim().is_empty())
        .map_or(ProviderError::Unexpected, ProviderError::Rejected)
}

pub struct HttpIdentityProvider {
    endpoints: ProviderEndpoints,
    cache: Mutex<Option<CachedAuth>>,
}

impl HttpIdentityProvider {
    #[must_use]
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        Self { endpoints, cache: Mutex::new(None) }
    }

    fn cache(&self) -> MutexGuard<'_, Option<CachedAuth>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached auth, falling back to `localStorage` after a reload. An expired
    /// session is dropped from both.
    fn cached(&self) -> Option<CachedAuth> {
        let mut cache = self.cache();
        if cache.is_none() {
            *cache = session_storage::load_json::<CachedAuth>(SESSION_STORAGE_KEY);
        }
        if cache.as_ref().is_some_and(|auth| auth.session.is_expired_at(Utc::now())) {
            *cache = None;
            session_storage::remove(SESSION_STORAGE_KEY);
        }
        cache.clone()
    }

    fn store(&self, auth: CachedAuth) {
        session_storage::save_json(SESSION_STORAGE_KEY, &auth);
        *self.cache() = Some(auth);
    }

    fn clear(&self) {
        session_storage::remove(SESSION_STORAGE_KEY);
        *self.cache() = None;
    }

    async fn exchange(&self, url: &str, token: &str, session_duration_minutes: u32) -> Result<Session, ProviderError> {
        let payload = serde_json::json!({
            "token": token,
            "session_duration_minutes": session_duration_minutes,
        });
        let auth: CachedAuth = self.post_json(url, &payload).await?;
        let session = auth.session.clone();
        self.store(auth);
        Ok(session)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(url)
                .header("X-Public-Token", &self.endpoints.public_token)
                .json(payload)
                .map_err(|e| ProviderError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(rejection_from_body(&body));
            }
            resp.json::<T>().await.map_err(|_| ProviderError::Unexpected)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, payload);
            Err(ProviderError::Network("not available outside the browser".to_owned()))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for HttpIdentityProvider {
    fn local_session(&self) -> Result<Option<Session>, ProviderError> {
        Ok(self.cached().map(|auth| auth.session))
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.cached().and_then(|auth| auth.user)
    }

    async fn send_magic_link(&self, email: &str, return_url: &str, expiry_minutes: u32) -> Result<(), ProviderError> {
        let payload = serde_json::json!({
            "email": email,
            "login_magic_link_url": return_url,
            "signup_magic_link_url": return_url,
            "login_expiration_minutes": expiry_minutes,
            "signup_expiration_minutes": expiry_minutes,
        });
        let _: serde_json::Value = self.post_json(&self.endpoints.magic_link_send_url(), &payload).await?;
        Ok(())
    }

    async fn exchange_magic_link_token(
        &self,
        token: &str,
        session_duration_minutes: u32,
    ) -> Result<Session, ProviderError> {
        self.exchange(&self.endpoints.magic_link_authenticate_url(), token, session_duration_minutes)
            .await
    }

    async fn start_oauth_redirect(&self, provider: OAuthProvider, return_url: &str) -> Result<(), ProviderError> {
        let url = self.endpoints.oauth_start_url(provider, return_url);
        #[cfg(feature = "csr")]
        {
            let window = web_sys::window().ok_or(ProviderError::Unexpected)?;
            window
                .location()
                .set_href(&url)
                .map_err(|_| ProviderError::Network(format!("could not navigate to {}", provider.display_name())))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
            Err(ProviderError::Network("not available outside the browser".to_owned()))
        }
    }

    async fn exchange_oauth_token(&self, token: &str, session_duration_minutes: u32) -> Result<Session, ProviderError> {
        self.exchange(&self.endpoints.oauth_authenticate_url(), token, session_duration_minutes)
            .await
    }

    async fn revoke_session(&self) -> Result<(), ProviderError> {
        let result = self
            .post_json::<serde_json::Value>(&self.endpoints.session_revoke_url(), &serde_json::json!({}))
            .await
            .map(|_| ());
        self.clear();
        result
    }
}
