//! Black scene theme for the info overlay

use egui::Color32;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0); // scene clear color
    pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 160);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);

    // === Fetch status ===
    pub const STATUS_LIVE: Color32 = Color32::from_rgb(100, 200, 100);
    pub const STATUS_WAITING: Color32 = Color32::from_rgb(200, 200, 100);
    pub const STATUS_FAILED: Color32 = Color32::from_rgb(200, 100, 100);
}

/// Convert a `[0,1]` RGB triple from the wire into an egui color
pub fn rgb(color: [f32; 3]) -> Color32 {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// Dark egui Visuals with a pure black canvas
pub fn scene_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.override_text_color = Some(TEXT_PRIMARY);

    // No shadows - flat overlay
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
