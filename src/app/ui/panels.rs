use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bloom::{DispersalConfig, LifecycleClock, LifecycleConfig, SwayField, compute_layout};
use crate::cyclone::{CycloneRecord, SourceConfig};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const INITIAL_RANKING_ROWS: usize = 20;
    pub(in crate::app) const RANKING_PAGE_ROWS: usize = 20;
    pub(in crate::app) const RANKING_PREFETCH_MARGIN: usize = 4;

    pub(in crate::app) fn new(source: SourceConfig, records: Vec<CycloneRecord>) -> Self {
        let mut rng = StdRng::seed_from_u64(source.seed);
        let layout = compute_layout(&records, &mut rng);
        let sway = SwayField::new(&layout.years, &mut rng);

        let mut intensity_ranking: Vec<usize> = (0..records.len()).collect();
        intensity_ranking.sort_by(|&a, &b| {
            records[b]
                .max_wind_speed
                .total_cmp(&records[a].max_wind_speed)
                .then_with(|| records[a].name.cmp(&records[b].name))
        });

        Self {
            edit_start_year: source.start_year,
            edit_end_year: source.end_year,
            edit_seed: source.seed,
            source,
            records,
            layout,
            sway,
            clock: LifecycleClock::new(),
            lifecycle: LifecycleConfig::default(),
            dispersal: DispersalConfig::default(),
            jitter_rng: rng,
            time: 0.0,
            animate: true,
            pointer_world: None,
            selected: None,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 56.0,
            show_fluff: true,
            show_year_labels: true,
            intensity_ranking,
            ranking_rows_visible: Self::INITIAL_RANKING_ROWS,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            visible_seed_count: 0,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_request: &mut Option<SourceConfig>,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("typhoon-dandelion");
                    ui.separator();
                    ui.label(format!(
                        "seasons: {}-{}",
                        self.source.start_year, self.source.end_year
                    ));
                    ui.label(format!("records: {}", self.records.len()));
                    ui.label(format!("phase: {}", self.clock.phase.label()));
                    let regenerate_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Regenerate"));
                    if regenerate_button.clicked() {
                        *reload_request = Some(self.edited_source());
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("visible: {} seeds", self.visible_seed_count));
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Collecting cyclone records...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_scene(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected.filter(|&index| index < self.layout.seeds.len());
    }

    fn edited_source(&self) -> SourceConfig {
        SourceConfig {
            start_year: self.edit_start_year.min(self.edit_end_year),
            end_year: self.edit_start_year.max(self.edit_end_year),
            seed: self.edit_seed,
            current_year: self.source.current_year,
            records_path: self.source.records_path.clone(),
        }
    }
}
