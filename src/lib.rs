//! # chat-room
//!
//! Leptos + WASM chat-room view for a browser chat client.
//!
//! This crate contains the view controller that binds name entry and message
//! drafts to a chat service, the observable streams it subscribes to, the
//! deferred-effect dispatcher that times DOM reads and writes against the
//! reactive update cycle, and the Leptos components that render it all.
//! Transport and connection lifecycle belong to the collaborator behind the
//! `net::service` traits; `net::in_memory` provides a loopback one.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
