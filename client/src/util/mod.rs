//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep browser storage and guard wiring out of page logic.

pub mod auth;
pub mod session_storage;
