// src/lib.rs

//! Storefront Admin - catalog, discount, order and blog administration
//! against the storefront REST backend

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]
#![allow(clippy::large_enum_variant)]

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = config::AppConfig::default();
    let level = config
        .logging
        .level
        .parse()
        .unwrap_or(logging::LogLevel::Info);
    if let Err(e) = logging::init(&config.logging, level) {
        web_sys::console::error_1(&format!("Failed to set up tracing: {}", e).into());
    }

    ui::set_launch_config(config);
    dioxus::launch(ui::App);
}

pub mod api;
pub mod auth;
pub mod blog;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod discount;
pub mod error;
pub mod logging;
pub mod orders;
pub mod types;
pub mod ui;

pub use error::{Error, ErrorKind, Result, ResultExt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
