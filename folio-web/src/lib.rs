#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod dom;
pub mod input;
pub mod lightbox;
pub mod nav_toggle;
pub mod reveal;
pub mod test_bridge;

pub use app::{MountError, Site};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    app::init_logging();
    app::when_ready(|| {
        let cfg = app::load_config();
        app::apply_log_level(&cfg);
        app::install(Site::mount(&cfg));
        test_bridge::install_test_bridge();
    });
}
