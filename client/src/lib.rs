//! # client
//!
//! Leptos + WASM front-end for the personal portfolio site: blog posts,
//! projects, and the signed-in owner's editing affordances.
//!
//! The crate talks to two external collaborators. The identity provider
//! (`net::identity`, `net::firebase`) issues identities and bearer tokens; the
//! REST backend (`net::api`) owns every resource. Session gating and
//! ownership display live in `state::session` and `util::gate`.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(App);
}
