use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::bloom::{GrowthStage, hit_test, reset_positions, step_dispersal};
use crate::util::{format_wind, short_label};

use super::super::ViewModel;
use super::super::render_utils::{
    ACTUAL_SEED, BACKGROUND, FINE_BRANCH, PREDICTION_SEED, SEARCH_HIGHLIGHT, SELECTION, STEM,
    TEXT, YEAR_BRANCH, blend_color, tapered_polyline, with_alpha, world_to_screen,
};

const YEAR_BRANCH_POINTS: usize = 25;
const FINE_BRANCH_POINTS: usize = 15;
const FLUFF_FILAMENTS: usize = 10;

// Stroke widths in world units; multiplied by zoom at draw time.
const STEM_WIDTH: (f32, f32) = (0.16, 0.07);
const YEAR_BRANCH_WIDTH: (f32, f32) = (0.10, 0.04);
const FINE_BRANCH_WIDTH: (f32, f32) = (0.035, 0.012);

fn curved_branch_points(center: Pos2, tip: Pos2, radius: f32) -> Vec<Pos2> {
    let delta = tip - center;
    let norm = delta.length() + 1e-6;
    let perp = vec2(-delta.y, delta.x) / norm;

    (0..YEAR_BRANCH_POINTS)
        .map(|index| {
            let t = index as f32 / (YEAR_BRANCH_POINTS - 1) as f32;
            let bulge = 0.4 * (PI * t).sin() * radius * 0.3;
            center.lerp(tip, t) + perp * bulge
        })
        .collect()
}

fn wobbled_fine_points(start: Pos2, end: Pos2, time: f32) -> Vec<Pos2> {
    (0..FINE_BRANCH_POINTS)
        .map(|index| {
            let t = index as f32 / (FINE_BRANCH_POINTS - 1) as f32;
            let wobble = 0.15 * (time * 2.5 + end.x * 7.0).sin() * t;
            start.lerp(end, t) + vec2(wobble * 0.7, wobble * 0.4)
        })
        .collect()
}

fn reveal_count(total: usize, progress: f32) -> usize {
    ((total as f32) * progress).ceil() as usize
}

impl ViewModel {
    fn advance(&mut self, dt: f32) {
        self.time += dt;
        if self.clock.tick(dt, &self.lifecycle) {
            reset_positions(&mut self.layout.seeds, &mut self.layout.fine_branches);
        }
        if self.clock.wind_active {
            let wind_progress = self.clock.wind_progress(&self.lifecycle);
            step_dispersal(
                &mut self.layout.seeds,
                &mut self.layout.fine_branches,
                wind_progress,
                dt,
                &self.dispersal,
                &mut self.jitter_rng,
            );
        }
    }

    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                matcher
                    .fuzzy_match(&record.name, query)
                    .or_else(|| {
                        matcher.fuzzy_match(
                            &record.name.to_ascii_lowercase(),
                            &query.to_ascii_lowercase(),
                        )
                    })
                    .map(|_score| index)
            })
            .collect();
        Some(matches)
    }

    pub(in crate::app) fn draw_scene(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.handle_scene_zoom(ui, rect, &response);
        self.handle_scene_pan(&response);
        self.track_pointer(ui, rect);

        let dt = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        if self.animate {
            self.advance(dt);
            ui.ctx().request_repaint();
        }

        let growth = self.clock.growth_progress(&self.lifecycle);
        let fade = self.clock.fade_progress(&self.lifecycle);
        let structure_alpha = 1.0 - fade;
        let dispersing = self.clock.wind_active;
        let pan = self.pan;
        let zoom = self.zoom;
        let center = self.layout.center;
        let time = self.time;

        let stem_reveal = reveal_count(self.layout.stem.len(), GrowthStage::Stem.progress(growth));
        if stem_reveal >= 2 {
            let points: Vec<Pos2> = self.layout.stem[..stem_reveal]
                .iter()
                .map(|&point| world_to_screen(rect, pan, zoom, center, point))
                .collect();
            tapered_polyline(
                &painter,
                &points,
                STEM_WIDTH.0 * zoom,
                STEM_WIDTH.1 * zoom,
                with_alpha(STEM, 0.9 * structure_alpha),
            );
        }
        if stem_reveal == self.layout.stem.len() {
            painter.circle_filled(
                world_to_screen(rect, pan, zoom, center, center),
                0.25 * zoom,
                with_alpha(STEM, 0.9 * structure_alpha),
            );
        }

        let year_sways: Vec<Vec2> = self
            .layout
            .years
            .iter()
            .map(|anchor| {
                self.sway
                    .sway(anchor.year, anchor.position, self.pointer_world, time)
            })
            .collect();
        let year_tips: Vec<Pos2> = self
            .layout
            .years
            .iter()
            .zip(&year_sways)
            .map(|(anchor, &sway)| anchor.position + sway)
            .collect();

        let year_reveal = reveal_count(
            self.layout.years.len(),
            GrowthStage::YearBranches.progress(growth),
        );
        for (anchor, &tip) in self.layout.years.iter().zip(&year_tips).take(year_reveal) {
            let branch: Vec<Pos2> = curved_branch_points(anchor.center, tip, anchor.radius)
                .into_iter()
                .map(|point| world_to_screen(rect, pan, zoom, center, point))
                .collect();
            tapered_polyline(
                &painter,
                &branch,
                YEAR_BRANCH_WIDTH.0 * zoom,
                YEAR_BRANCH_WIDTH.1 * zoom,
                with_alpha(YEAR_BRANCH, 0.8 * structure_alpha),
            );

            if self.show_year_labels && structure_alpha > 0.05 {
                let label_pos = tip + vec2(anchor.angle.cos(), anchor.angle.sin()) * 0.45;
                painter.text(
                    world_to_screen(rect, pan, zoom, center, label_pos),
                    Align2::CENTER_CENTER,
                    anchor.year.to_string(),
                    FontId::proportional(12.0),
                    with_alpha(TEXT, structure_alpha),
                );
            }
        }

        // The scene owns the per-tick seed position table: during dispersal the
        // physics step already wrote it; otherwise seeds ride their year branch
        // sway (amplified toward the tip) plus a micro wobble.
        if !dispersing {
            for seed in &mut self.layout.seeds {
                let sway = year_sways[seed.year_index];
                let wobble = vec2(
                    0.08 * (time * 3.0 + seed.original_pos.x * 10.0).sin(),
                    0.05 * (time * 3.5 + seed.original_pos.y * 10.0).cos(),
                );
                seed.current_pos = seed.original_pos + sway * 1.8 + wobble;
            }
        }

        let seed_reveal = reveal_count(
            self.layout.seeds.len(),
            GrowthStage::Seeds.progress(growth),
        );
        let revealed_seeds = &self.layout.seeds[..seed_reveal.min(self.layout.seeds.len())];

        let matches = self.search_matches();
        let hovered = self
            .pointer_world
            .and_then(|pointer| hit_test(pointer, revealed_seeds));

        let fine_reveal = reveal_count(
            self.layout.seeds.len(),
            GrowthStage::FineBranches.progress(growth),
        );
        for (index, (seed, branch)) in self
            .layout
            .seeds
            .iter()
            .zip(&self.layout.fine_branches)
            .enumerate()
            .take(fine_reveal)
        {
            if branch.alpha <= 0.01 {
                continue;
            }
            let start = year_tips[seed.year_index];
            // Until its seed pops in, the branch points at the seed's resting spot.
            let end = if index < seed_reveal {
                seed.current_pos
            } else {
                start + branch.offset
            };
            let points: Vec<Pos2> = wobbled_fine_points(start, end, time)
                .into_iter()
                .map(|point| world_to_screen(rect, pan, zoom, center, point))
                .collect();
            tapered_polyline(
                &painter,
                &points,
                FINE_BRANCH_WIDTH.0 * zoom,
                FINE_BRANCH_WIDTH.1 * zoom,
                with_alpha(FINE_BRANCH, branch.alpha),
            );
        }

        let mut drawn = 0usize;
        for (index, seed) in self.layout.seeds.iter().enumerate().take(seed_reveal) {
            if seed.alpha <= 0.003 {
                continue;
            }

            let record = &self.records[seed.record];
            let base_color = if record.is_prediction {
                PREDICTION_SEED
            } else {
                ACTUAL_SEED
            };
            let is_match = matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&seed.record));
            let color = if is_match {
                blend_color(base_color, SEARCH_HIGHLIGHT, 0.6)
            } else {
                base_color
            };

            let position = world_to_screen(rect, pan, zoom, center, seed.current_pos);
            let radius = seed.radius() * zoom;

            if self.show_fluff {
                for filament in 0..FLUFF_FILAMENTS {
                    let angle = TAU * filament as f32 / FLUFF_FILAMENTS as f32
                        + 0.25 * (time * 2.8 + filament as f32 * 0.5).sin();
                    let direction = vec2(angle.cos(), angle.sin());
                    painter.line_segment(
                        [
                            position + direction * (radius * 0.85),
                            position + direction * (radius * 2.5),
                        ],
                        Stroke::new(0.6, with_alpha(color, 0.5 * seed.alpha)),
                    );
                }
            }

            painter.circle_filled(position, radius, with_alpha(color, seed.alpha));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(0.5, with_alpha(Color32::WHITE, seed.alpha)),
            );

            let is_selected = self.selected == Some(index);
            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.6, with_alpha(SELECTION, seed.alpha.max(0.4))),
                );
            }

            if is_selected || hovered == Some(index) || radius > 9.0 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    short_label(&record.name, 4),
                    FontId::proportional(9.0),
                    with_alpha(Color32::WHITE, seed.alpha),
                );
            }
            drawn += 1;
        }
        self.visible_seed_count = drawn;

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if let Some(index) = hovered
            && let Some(seed) = self.layout.seeds.get(index)
        {
            let record = &self.records[seed.record];
            let readout = format!(
                "{}  |  {}  |  {}  |  {}",
                record.name,
                format_wind(record.max_wind_speed),
                record.category.label(),
                record.year
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                readout,
                FontId::proportional(13.0),
                TEXT,
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            let revealed = &self.layout.seeds[..seed_reveal.min(self.layout.seeds.len())];
            let clicked = self
                .pointer_world
                .and_then(|pointer| hit_test(pointer, revealed));
            self.apply_scene_selection(clicked);
        }
    }
}
