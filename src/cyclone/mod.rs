mod generate;
mod load;
mod record;

pub use generate::generate_season_records;
pub use load::load_records_file;
pub use record::{Category, CycloneRecord, FormationDate, seed_size};

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug)]
pub struct SourceConfig {
    pub start_year: i32,
    pub end_year: i32,
    pub seed: u64,
    pub current_year: i32,
    pub records_path: Option<String>,
}

pub fn collect_records(config: &SourceConfig) -> Result<Vec<CycloneRecord>> {
    let records = match &config.records_path {
        Some(path) => {
            let records = load_records_file(path, config.current_year)?;
            log::info!("loaded {} cyclone records from {path}", records.len());
            records
        }
        None => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let mut records = Vec::new();
            for year in config.start_year..=config.end_year {
                records.extend(generate_season_records(year, config.current_year, &mut rng));
            }
            log::info!(
                "generated {} cyclone records for seasons {}-{}",
                records.len(),
                config.start_year,
                config.end_year
            );
            records
        }
    };

    if records.is_empty() {
        log::warn!("record source produced an empty dataset; the bloom will show a bare stem");
    }

    Ok(records)
}
