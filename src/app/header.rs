//! Info overlay: point count, lead distance, fetch status and FPS

use eframe::egui;

use super::LidarApp;
use crate::fetch_state::FetchState;
use crate::theme::colors;
use crate::time::now_seconds;

impl LidarApp {
    pub(crate) fn render_info(&self, ctx: &egui::Context) {
        let scene = self.scene.borrow();
        let point_count = scene.primitives().len();
        let distance = format_distance(scene.lead_distance());
        let failed = scene.updates_failed();

        let (status_color, status_text) = match scene.status() {
            FetchState::Live => (colors::STATUS_LIVE, "Live"),
            FetchState::Waiting => (colors::STATUS_WAITING, "Waiting..."),
            FetchState::Failed(_) => (colors::STATUS_FAILED, "Fetch failed"),
        };
        drop(scene);

        egui::Area::new(egui::Id::new("info_overlay"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::BG_OVERLAY)
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new("3D LIDAR Visualization")
                                .color(colors::TEXT_PRIMARY)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(format!("Points: {}", point_count))
                                .color(colors::TEXT_SECONDARY),
                        );
                        ui.label(
                            egui::RichText::new(format!("Distance: {} cm", distance))
                                .color(colors::TEXT_SECONDARY),
                        );

                        ui.horizontal(|ui| {
                            ui.colored_label(status_color, egui::RichText::new(status_text).size(11.0));
                            if failed > 0 {
                                ui.label(
                                    egui::RichText::new(format!("({} failed)", failed))
                                        .color(colors::TEXT_MUTED)
                                        .size(11.0),
                                );
                            }
                            ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED).size(11.0));
                            ui.label(
                                egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                                    .color(colors::TEXT_MUTED)
                                    .monospace()
                                    .size(11.0),
                            );
                        });
                    });
            });
    }
}

/// First point's distance with one decimal, "0" before any sweep
fn format_distance(distance: Option<f64>) -> String {
    distance.map_or_else(|| "0".to_string(), |d| format!("{:.1}", d))
}

/// FPS counter using platform-agnostic time
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    pub fn tick(&mut self) {
        let now = now_seconds() * 1000.0;
        self.frames.push(now);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed == 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
