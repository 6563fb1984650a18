/// Blurbinator - browse, translate and copy marketing blurbs from any page
/// Built with Rust + WASM + Yew

pub mod blurb_data;
pub mod clipboard;
pub mod error;
pub mod host_panel;
pub mod loader;
pub mod navigation;
pub mod preferences;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app inside the panel iframe
#[wasm_bindgen]
pub fn start_app() {
    yew::Renderer::<ui::app::App>::new().render();
}

// Inject the launcher bubble and floating panel from the content script
#[wasm_bindgen]
pub fn start_host_panel() -> Result<(), JsValue> {
    host_panel::install().map_err(|e| JsValue::from_str(&e.to_string()))
}
