//! Browser render client
//!
//! Owns the render cycle (eframe repaints every display frame) and the resize
//! handler. The update cycle lives in `SweepPoller` and writes into the same
//! shared scene.

mod header;
mod viewport;

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use tracing::{info, warn};

use crate::core::Scene;
use crate::fetch_wasm::{SharedScene, SweepPoller};
use crate::theme::{colors, scene_visuals};

/// Sweep endpoint, relative to the page origin (override with `window.__lidar_data_url`)
pub const DEFAULT_DATA_URL: &str = "/api/lidar-data";

pub struct LidarApp {
    /// Scene shared with the poll callbacks
    pub(crate) scene: SharedScene,
    /// Update-cycle timer (kept alive)
    #[allow(dead_code)]
    poller: Option<SweepPoller>,
    /// FPS counter
    pub(crate) fps_counter: header::FpsCounter,
    /// Last canvas size handed to the scene
    last_size: egui::Vec2,
}

impl LidarApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(scene_visuals());

        let size = cc.egui_ctx.screen_rect().size();
        let scene = Rc::new(RefCell::new(Scene::new(size.x, size.y)));

        let data_url = js_sys::eval("window.__lidar_data_url")
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
        info!(url = %data_url, "Sweep endpoint resolved");

        let poller = match SweepPoller::start(&data_url, scene.clone()) {
            Ok(poller) => Some(poller),
            Err(e) => {
                warn!(?e, "Failed to start sweep polling");
                None
            }
        };

        Self {
            scene,
            poller,
            fps_counter: header::FpsCounter::new(),
            last_size: size,
        }
    }
}

impl eframe::App for LidarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Render cycle: paced by the display, never by the update cycle
        ctx.request_repaint();
        self.fps_counter.tick();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                self.render_scene(ui);
            });

        self.render_info(ctx);
    }
}
