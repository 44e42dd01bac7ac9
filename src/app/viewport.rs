//! Point-cloud viewport: resize handling, rotation step and point drawing

use eframe::egui;

use super::LidarApp;
use crate::theme::rgb;

impl LidarApp {
    /// One render-cycle frame over the current point set
    pub(crate) fn render_scene(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
        let rect = response.rect;

        let mut scene = self.scene.borrow_mut();

        // Resize notification: only camera aspect and output size change
        if rect.size() != self.last_size {
            scene.resize(rect.width(), rect.height());
            self.last_size = rect.size();
        }

        scene.advance_frame();

        for point in scene.project() {
            painter.circle_filled(
                rect.min + egui::vec2(point.x, point.y),
                point.radius.max(0.5),
                rgb(point.color),
            );
        }
    }
}
