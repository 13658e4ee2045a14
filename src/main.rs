//! Aspire Portal Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod markdown;
mod models;
mod pages;
mod storage;
mod store;
mod tracker;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use tracing::info;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("AspirePortal", AppConfig::log_level()) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }

    let config = AppConfig::load();
    info!(api_base = %config.api_base, "starting portal");
    mount_to_body(move || view! { <App config=config.clone() /> });
}
