//! 3D LIDAR sweep simulator
//!
//! - `core`: sweep generation, wire format and the client scene model (all platforms)
//! - `server`: axum endpoints serving sweeps and the client document (`--features server`)
//! - browser client: egui app polling `/api/lidar-data` once per second (`--features wasm`)

pub mod core;
pub mod fetch_state;
pub mod time;

#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
pub mod server;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod fetch_wasm;
#[cfg(target_arch = "wasm32")]
mod theme;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
            .get_element_by_id("lidar_canvas")
            .expect("no lidar_canvas element")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("not a canvas element");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::LidarApp::new(cc)))),
            )
            .await
            .expect("Failed to start eframe");
    });
}
