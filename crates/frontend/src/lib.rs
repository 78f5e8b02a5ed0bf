pub mod app;
pub mod domain;
pub mod layout;
pub mod shared;
pub mod usecases;

pub use app::AdminPage;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
