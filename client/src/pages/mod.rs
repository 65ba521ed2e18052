//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates auth decisions to
//! the `authflow` coordinator provided through context.

pub mod authenticate;
pub mod dashboard;
pub mod login;
