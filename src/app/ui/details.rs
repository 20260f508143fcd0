use eframe::egui::{Align, Layout, RichText, Ui};

use crate::cyclone::Category;
use crate::util::{format_pressure, format_wind};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Cyclone Details");
        ui.add_space(6.0);

        let selected_seed = self
            .selected
            .and_then(|index| self.layout.seeds.get(index));

        if let Some(seed) = selected_seed {
            let record = &self.records[seed.record];
            ui.label(RichText::new(record.name.as_str()).strong());
            ui.small(format!("id {}", record.id));
            ui.add_space(6.0);

            ui.label(format!("Formed: {}", record.formation_date));
            ui.label(format!("Peak wind: {}", format_wind(record.max_wind_speed)));
            ui.label(format!(
                "Min pressure: {}",
                format_pressure(record.min_pressure)
            ));
            ui.label(format!("Category: {}", record.category.label()));
            ui.label(format!("Season: {}", record.year));
            ui.label(if record.is_prediction {
                "Forecast record"
            } else {
                "Historical record"
            });
        } else {
            ui.label("Click a seed to inspect its cyclone.");
        }

        ui.separator();
        ui.label(RichText::new("Intensity scale").strong());
        for category in Category::all() {
            ui.horizontal(|ui| {
                ui.label(RichText::new(category.short_label()).monospace());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(category.wind_range_label());
                });
            });
        }

        ui.separator();
        ui.label(RichText::new("Season overview").strong());
        if self.layout.years.is_empty() {
            ui.label("No records in the current dataset.");
            return;
        }

        for (year_index, anchor) in self.layout.years.iter().enumerate() {
            let strongest = self
                .layout
                .seeds
                .iter()
                .filter(|seed| seed.year_index == year_index)
                .max_by(|a, b| {
                    self.records[a.record]
                        .max_wind_speed
                        .total_cmp(&self.records[b.record].max_wind_speed)
                });

            let summary = match strongest {
                Some(seed) => {
                    let record = &self.records[seed.record];
                    format!(
                        "{}: {} cyclones, peak {} ({})",
                        anchor.year,
                        anchor.record_count,
                        record.name,
                        format_wind(record.max_wind_speed)
                    )
                }
                None => format!("{}: {} cyclones", anchor.year, anchor.record_count),
            };
            ui.label(summary);
        }
    }
}
