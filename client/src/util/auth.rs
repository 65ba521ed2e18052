//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes are gated in the router before their view is built, using
//! the `authflow` route guard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authflow::{AppRoute, RouteGuard};

/// Whether `route` is displayed as itself under `guard` rather than
/// redirected elsewhere.
#[must_use]
pub fn route_allowed(route: AppRoute, guard: &RouteGuard) -> bool {
    AppRoute::navigate(route.path(), guard) == route
}

/// Where a denied visit to `route` ends up.
#[must_use]
pub fn denied_redirect_path(route: AppRoute, guard: &RouteGuard) -> &'static str {
    AppRoute::navigate(route.path(), guard).path()
}
