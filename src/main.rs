//! Photo Globe Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod files;
mod markers;
mod metadata;
mod models;
mod store;
mod upload;

use app::App;
use leptos::prelude::*;

/// Lines of recent activity kept for the notice bar
const LOG_CAPACITY: usize = 200;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger(log::LevelFilter::Info, LOG_CAPACITY) {
        web_sys::console::warn_1(&format!("[Main] Logger already installed: {}", e).into());
    }
    mount_to_body(App);
}
