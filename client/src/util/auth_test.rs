use super::*;
use authflow::AuthStore;

#[test]
fn dashboard_denied_when_signed_out() {
    let guard = RouteGuard::new(AuthStore::default());
    assert!(!route_allowed(AppRoute::Dashboard, &guard));
    assert_eq!(denied_redirect_path(AppRoute::Dashboard, &guard), "/");
}

#[test]
fn dashboard_allowed_when_signed_in() {
    let guard = RouteGuard::new(AuthStore::new(true));
    assert!(route_allowed(AppRoute::Dashboard, &guard));
}

#[test]
fn public_routes_always_allowed() {
    let guard = RouteGuard::new(AuthStore::default());
    assert!(route_allowed(AppRoute::Login, &guard));
    assert!(route_allowed(AppRoute::Authenticate, &guard));
}
