//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` is the browser implementation of the identity provider contract
//! consumed by `authflow`.

pub mod provider;
