#![forbid(unsafe_code)]
//! Browser wiring for navsync: turns the core logic into DOM behavior.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod enhance;
pub mod error;
pub mod logging;
pub mod menu;
pub mod navigation;
pub mod projects;
pub mod scroll;
pub mod scroll_spy;
pub mod storage;
pub mod theme;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let Some(doc) = dom::document() else {
        return;
    };
    let config = config::load_config(&doc);
    logging::init(config.log_level());
    let enhancements = enhance::install(&doc, std::rc::Rc::new(config));
    // Listeners and the observer live for the rest of the page.
    std::mem::forget(enhancements);
}
