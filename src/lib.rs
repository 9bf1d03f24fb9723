mod api;
mod app;
mod components;
mod models;
mod pages;
mod search;
mod state;
mod storage;
mod util;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::logging::log!("SmartBookmark starting");
    mount_to_body(app::App);
}
