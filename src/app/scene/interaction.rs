use eframe::egui::{self, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_scene_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, self.layout.center, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(8.0, 400.0);
        self.pan = pointer - rect.center() - (world_before - self.layout.center) * self.zoom;
    }

    pub(in crate::app) fn handle_scene_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Pointer input is sampled once per frame; the latest position wins.
    pub(in crate::app) fn track_pointer(&mut self, ui: &Ui, rect: Rect) {
        let hover = ui.input(|input| input.pointer.hover_pos());
        self.pointer_world = match hover {
            Some(position) if rect.contains(position) => Some(screen_to_world(
                rect,
                self.pan,
                self.zoom,
                self.layout.center,
                position,
            )),
            _ => None,
        };
    }

    pub(in crate::app) fn apply_scene_selection(&mut self, selected: Option<usize>) {
        self.set_selected(selected);
    }
}
