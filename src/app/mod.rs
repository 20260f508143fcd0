use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};
use rand::rngs::StdRng;

use crate::bloom::{DispersalConfig, Layout, LifecycleClock, LifecycleConfig, SwayField};
use crate::cyclone::{CycloneRecord, SourceConfig, collect_records};

mod render_utils;
mod scene;
mod ui;

type LoadResult = Result<(SourceConfig, Vec<CycloneRecord>), String>;

pub struct DandelionApp {
    source: SourceConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    source: SourceConfig,
    records: Vec<CycloneRecord>,
    layout: Layout,
    sway: SwayField,
    clock: LifecycleClock,
    lifecycle: LifecycleConfig,
    dispersal: DispersalConfig,
    jitter_rng: StdRng,
    time: f32,
    animate: bool,
    pointer_world: Option<Pos2>,
    selected: Option<usize>,
    search: String,
    pan: Vec2,
    zoom: f32,
    show_fluff: bool,
    show_year_labels: bool,
    edit_start_year: i32,
    edit_end_year: i32,
    edit_seed: u64,
    intensity_ranking: Vec<usize>,
    ranking_rows_visible: usize,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
    visible_seed_count: usize,
}

impl DandelionApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: SourceConfig) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: SourceConfig) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = collect_records(&source)
                .map(|records| (source.clone(), records))
                .map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: SourceConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for DandelionApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok((source, records)) => {
                            AppState::Ready(Box::new(ViewModel::new(source, records)))
                        }
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Collecting cyclone records...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to collect cyclone records");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_request = None;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_request, is_reloading);

                if let Some(config) = reload_request
                    && self.reload_rx.is_none()
                {
                    self.source = config.clone();
                    self.reload_rx = Some(Self::spawn_load(config));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok((source, records)) => {
                                    AppState::Ready(Box::new(ViewModel::new(source, records)))
                                }
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background record loader disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
