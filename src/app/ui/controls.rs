use eframe::egui::{self, Align, Layout, Ui};

use crate::bloom::{LifecycleClock, reset_positions};
use crate::util::format_wind;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Dandelion Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search cyclone names")
            .on_hover_text("Fuzzy-highlight matching seeds without changing the layout.");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Type a name fragment, then click a highlighted seed to select it.");

        ui.separator();

        ui.label("Dataset");
        ui.add(
            egui::Slider::new(&mut self.edit_start_year, 1980..=2040)
                .text("First season")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Earliest season included when regenerating records.");
        ui.add(
            egui::Slider::new(&mut self.edit_end_year, 1980..=2040)
                .text("Last season")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Latest season included when regenerating records.");
        ui.add(
            egui::Slider::new(&mut self.edit_seed, 0..=99_999u64)
                .text("Seed")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Drives record generation and layout jitter; same seed, same bloom.");
        ui.small("Press Regenerate in the top bar to rebuild the bloom.");

        ui.separator();

        ui.checkbox(&mut self.animate, "Run animation")
            .on_hover_text("Pause to freeze the lifecycle at its current moment.");
        ui.checkbox(&mut self.show_fluff, "Seed fluff")
            .on_hover_text("Draw the pappus filaments around every seed.");
        ui.checkbox(&mut self.show_year_labels, "Year labels")
            .on_hover_text("Label each year branch at its tip.");
        ui.checkbox(&mut self.show_fps_bar, "FPS display")
            .on_hover_text("Show a live FPS readout in the header.");

        ui.collapsing("Lifecycle tuning", |ui| {
            ui.add(
                egui::Slider::new(&mut self.lifecycle.regrow_secs, 1.0..=10.0)
                    .text("Regrow seconds")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How long the structure takes to grow back.");
            ui.add(
                egui::Slider::new(&mut self.lifecycle.stable_secs, 0.5..=10.0)
                    .text("Stable seconds")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How long the bloom rests before the wind rises.");
            ui.add(
                egui::Slider::new(&mut self.lifecycle.wind_secs, 1.0..=10.0)
                    .text("Wind seconds")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Duration of the dispersal phase.");
            ui.add(
                egui::Slider::new(&mut self.lifecycle.fade_delay_secs, 0.0..=5.0)
                    .text("Fade delay")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Seconds into dispersal before the stem starts fading.");
            ui.add(
                egui::Slider::new(&mut self.lifecycle.fade_secs, 0.5..=5.0)
                    .text("Fade seconds")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How long the stem and branches take to fade out.");

            ui.small(format!("Full cycle: {:.1} s", self.lifecycle.cycle_secs()));

            if ui
                .button("Restart cycle")
                .on_hover_text("Jump back to the start of the growing phase.")
                .clicked()
            {
                self.clock = LifecycleClock::new();
                reset_positions(&mut self.layout.seeds, &mut self.layout.fine_branches);
            }
        });

        ui.collapsing("Wind tuning", |ui| {
            ui.add(
                egui::Slider::new(&mut self.dispersal.wind_bias.x, -30.0..=0.0)
                    .text("Bias x")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Horizontal wind push applied to dispersing seeds.");
            ui.add(
                egui::Slider::new(&mut self.dispersal.wind_bias.y, -10.0..=10.0)
                    .text("Bias y")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Vertical wind push applied to dispersing seeds.");
            ui.add(
                egui::Slider::new(&mut self.dispersal.jitter, 0.0..=10.0)
                    .text("Jitter")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Random acceleration spread; higher looks gustier.");
            ui.add(
                egui::Slider::new(&mut self.dispersal.drag, 0.9..=0.995)
                    .text("Drag")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Velocity kept per tick; lower stops seeds sooner.");
        });

        ui.separator();

        egui::CollapsingHeader::new("Strongest cyclones")
            .default_open(true)
            .show(ui, |ui| self.draw_intensity_ranking(ui));
    }

    fn draw_intensity_ranking(&mut self, ui: &mut Ui) {
        let total_rows = self.intensity_ranking.len();
        let row_count = total_rows.min(self.ranking_rows_visible);
        let mut should_load_more = false;
        let mut picked_record = None;

        egui::ScrollArea::vertical()
            .id_salt("intensity_ranking_scroll")
            .max_height(220.0)
            .auto_shrink([false, false])
            .show_rows(ui, 22.0, row_count, |ui, row_range| {
                if row_range.end + Self::RANKING_PREFETCH_MARGIN >= row_count {
                    should_load_more = true;
                }

                for index in row_range {
                    let Some(&record_index) = self.intensity_ranking.get(index) else {
                        continue;
                    };
                    let Some(record) = self.records.get(record_index) else {
                        continue;
                    };

                    let is_selected = self
                        .selected
                        .and_then(|seed_index| self.layout.seeds.get(seed_index))
                        .is_some_and(|seed| seed.record == record_index);
                    let label = format!("{} ({})", record.name, record.year);

                    let row_clicked = ui
                        .horizontal(|ui| {
                            let clicked = ui.selectable_label(is_selected, label).clicked();
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(format_wind(record.max_wind_speed));
                            });
                            clicked
                        })
                        .inner;

                    if row_clicked {
                        picked_record = Some(record_index);
                    }
                }
            });

        if let Some(record_index) = picked_record {
            let seed_index = self
                .layout
                .seeds
                .iter()
                .position(|seed| seed.record == record_index);
            self.set_selected(seed_index);
        }

        if should_load_more && row_count < total_rows {
            self.ranking_rows_visible = (row_count + Self::RANKING_PAGE_ROWS).min(total_rows);
        }
    }
}
