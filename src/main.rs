mod app;
mod bloom;
mod cyclone;
mod util;

use clap::Parser;

use crate::cyclone::SourceConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value_t = 2014)]
    start_year: i32,
    #[arg(long, default_value_t = 2024)]
    end_year: i32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 2026)]
    current_year: i32,
    #[arg(long)]
    records: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let source = SourceConfig {
        start_year: args.start_year.min(args.end_year),
        end_year: args.start_year.max(args.end_year),
        seed: args.seed,
        current_year: args.current_year,
        records_path: args.records,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "typhoon-dandelion",
        options,
        Box::new(move |cc| Ok(Box::new(app::DandelionApp::new(cc, source)))),
    )
}
