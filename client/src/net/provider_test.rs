use super::*;
use authflow::{AuthConfig, AuthCoordinator};

fn endpoints() -> ProviderEndpoints {
    ProviderEndpoints::new("https://auth.example.com/sdk/v1/", "public-token-test-123")
}

// =============================================================================
// ProviderEndpoints
// =============================================================================

#[test]
fn base_url_trailing_slash_is_trimmed() {
    assert_eq!(endpoints().base_url, "https://auth.example.com/sdk/v1");
}

#[test]
fn endpoint_paths() {
    let e = endpoints();
    assert_eq!(e.magic_link_send_url(), "https://auth.example.com/sdk/v1/magic_links/email/login_or_create");
    assert_eq!(e.magic_link_authenticate_url(), "https://auth.example.com/sdk/v1/magic_links/authenticate");
    assert_eq!(e.oauth_authenticate_url(), "https://auth.example.com/sdk/v1/oauth/authenticate");
    assert_eq!(e.session_revoke_url(), "https://auth.example.com/sdk/v1/sessions/revoke");
}

#[test]
fn oauth_start_url_uses_callback_for_login_and_signup() {
    let url = endpoints().oauth_start_url(OAuthProvider::Google, "http://localhost:4200/authenticate");
    assert!(url.starts_with("https://auth.example.com/sdk/v1/oauth/google/start?"));
    assert!(url.contains("public_token=public-token-test-123"));
    assert!(url.contains("login_redirect_url=http%3A%2F%2Flocalhost%3A4200%2Fauthenticate"));
    assert!(url.contains("signup_redirect_url=http%3A%2F%2Flocalhost%3A4200%2Fauthenticate"));
}

#[test]
fn build_env_defaults_to_same_origin_api() {
    let e = ProviderEndpoints::from_build_env();
    assert!(!e.base_url.is_empty());
}

// =============================================================================
// rejection_from_body
// =============================================================================

#[test]
fn rejection_uses_error_message() {
    let body = r#"{"status_code": 401, "error_message": "token expired"}"#;
    assert_eq!(rejection_from_body(body), ProviderError::Rejected("token expired".into()));
}

#[test]
fn rejection_without_message_is_unexpected() {
    assert_eq!(rejection_from_body(r#"{"status_code": 500}"#), ProviderError::Unexpected);
    assert_eq!(rejection_from_body(r#"{"error_message": "  "}"#), ProviderError::Unexpected);
    assert_eq!(rejection_from_body("<html>bad gateway</html>"), ProviderError::Unexpected);
}

// =============================================================================
// HttpIdentityProvider (non-browser build)
// =============================================================================

#[test]
fn no_local_session_without_cache() {
    let provider = HttpIdentityProvider::new(endpoints());
    assert_eq!(provider.local_session(), Ok(None));
    assert!(provider.current_user().is_none());
}

#[test]
fn cached_exchange_result_is_the_local_session() {
    let provider = HttpIdentityProvider::new(endpoints());
    let session = Session { session_id: "s-1".into(), user_id: "u-1".into(), expires_at: None };
    let user = UserProfile { user_id: "u-1".into(), ..UserProfile::default() };
    provider.store(CachedAuth { session: session.clone(), user: Some(user.clone()) });
    assert_eq!(provider.local_session(), Ok(Some(session)));
    assert_eq!(provider.current_user(), Some(user));
}

#[test]
fn clear_drops_the_cached_session() {
    let provider = HttpIdentityProvider::new(endpoints());
    let session = Session { session_id: "s-1".into(), user_id: "u-1".into(), expires_at: None };
    provider.store(CachedAuth { session, user: None });
    provider.clear();
    assert_eq!(provider.local_session(), Ok(None));
}

#[test]
fn cached_auth_deserializes_exchange_response() {
    let json = r#"{
        "session": {"session_id": "s-9", "user_id": "u-9"},
        "user": {"user_id": "u-9", "emails": [{"email": "a@b.com"}]}
    }"#;
    let auth: CachedAuth = serde_json::from_str(json).unwrap();
    assert_eq!(auth.session.session_id, "s-9");
    assert_eq!(auth.user.unwrap().display_email(), "a@b.com");
}

#[test]
fn expired_session_is_not_a_local_session() {
    let provider = HttpIdentityProvider::new(endpoints());
    let session = Session {
        session_id: "s-old".into(),
        user_id: "u-1".into(),
        expires_at: Some("2000-01-01T00:00:00Z".into()),
    };
    let user = UserProfile { user_id: "u-1".into(), ..UserProfile::default() };
    provider.store(CachedAuth { session, user: Some(user) });

    assert_eq!(provider.local_session(), Ok(None));
    assert!(provider.current_user().is_none());
    assert!(provider.cache().is_none());
}

#[test]
fn expired_session_restores_as_signed_out() {
    let provider = HttpIdentityProvider::new(endpoints());
    let session = Session {
        session_id: "s-old".into(),
        user_id: "u-1".into(),
        expires_at: Some("2000-01-01T00:00:00Z".into()),
    };
    provider.store(CachedAuth { session, user: None });
    let config = AuthConfig::for_origin("http://localhost:4200").unwrap();
    let coordinator = AuthCoordinator::new(provider, config);

    assert!(!coordinator.check_existing_session());
    assert!(!coordinator.guard().can_activate().is_allowed());
}
