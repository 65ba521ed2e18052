//! # client
//!
//! Leptos + WASM frontend for passwordless sign-in.
//!
//! This crate contains the login, callback and dashboard pages, the
//! browser-side identity provider client, and the signal that mirrors the
//! `authflow` status store into the view layer.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: mount the app into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
