/// Tread Lightly - Chrome Extension that warns on sensitive domains
/// Built with Rust + WASM + Yew

pub mod bridge;
pub mod config;
pub mod control;
pub mod domain;
pub mod error;
pub mod page_agent;
pub mod protocol;
pub mod renderer;
pub mod site_data;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

use config::ExtensionConfig;
use ui::control::{ControlPanel, ControlPanelProps};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Domain identity for JavaScript callers; `null` for anything that is not a usable URL string
#[wasm_bindgen]
pub fn extract_domain(url: JsValue) -> Option<String> {
    url.as_string().and_then(|url| domain::extract_domain(&url))
}

// Start the Yew app for the control surface popup
#[wasm_bindgen]
pub fn start_control_surface(config: JsValue) {
    let config = ExtensionConfig::from_js(config);
    log::set_max_level(config.level_filter());

    yew::Renderer::<ControlPanel>::with_props(ControlPanelProps { config }).render();
}

// Start the page agent from the content script
#[wasm_bindgen]
pub fn start_page_agent(config: JsValue) {
    let config = ExtensionConfig::from_js(config);
    log::set_max_level(config.level_filter());

    spawn_local(async move {
        if let Err(e) = bridge::launch_page_agent(config).await {
            log::error!("Page agent failed to start: {}", e);
        }
    });
}
