use eframe::egui::Pos2;

use super::layout::SeedAnchor;

const HIT_RADIUS_SCALE: f32 = 1.5;

/// Nearest seed whose padded radius covers the pointer, against current
/// (possibly wind-displaced) positions. None clears the selection.
pub fn hit_test(pointer: Pos2, seeds: &[SeedAnchor]) -> Option<usize> {
    seeds
        .iter()
        .enumerate()
        .filter_map(|(index, seed)| {
            let distance = seed.current_pos.distance(pointer);
            (distance <= seed.radius() * HIT_RADIUS_SCALE).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _distance)| index)
}
