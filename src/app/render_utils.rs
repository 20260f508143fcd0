use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(0xFB, 0xF8, 0xF1);
pub(super) const STEM: Color32 = Color32::from_rgb(0x2D, 0x5F, 0x4F);
pub(super) const YEAR_BRANCH: Color32 = Color32::from_rgb(0x5A, 0x8F, 0x7B);
pub(super) const FINE_BRANCH: Color32 = Color32::from_rgb(0xD4, 0xA5, 0x74);
pub(super) const ACTUAL_SEED: Color32 = Color32::from_rgb(0x4A, 0x9B, 0x8E);
pub(super) const PREDICTION_SEED: Color32 = Color32::from_rgb(0x90, 0xC4, 0xB8);
pub(super) const TEXT: Color32 = Color32::from_rgb(0x2C, 0x3E, 0x50);
pub(super) const SELECTION: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const SEARCH_HIGHLIGHT: Color32 = Color32::from_rgb(103, 196, 255);

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, center: Pos2, world: Pos2) -> Pos2 {
    rect.center() + pan + (world - center) * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, center: Pos2, screen: Pos2) -> Pos2 {
    center + (screen - rect.center() - pan) / zoom
}

pub(super) fn tapered_polyline(
    painter: &Painter,
    points: &[Pos2],
    start_width: f32,
    end_width: f32,
    color: Color32,
) {
    if points.len() < 2 {
        return;
    }

    let segments = points.len() - 1;
    for index in 0..segments {
        let t = index as f32 / segments as f32;
        let width = start_width * (1.0 - t) + end_width * t;
        painter.line_segment(
            [points[index], points[index + 1]],
            Stroke::new(width.max(0.2), color),
        );
    }
}
