use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, vec2};
use rand::Rng;

use crate::cyclone::{CycloneRecord, seed_size};

pub const BLOOM_CENTER: Pos2 = Pos2::new(5.0, 5.0);
pub const SEED_ALPHA: f32 = 0.85;
pub const BRANCH_ALPHA: f32 = 0.75;

const STEM_POINTS: usize = 40;
const MAX_CLUSTERS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct YearAnchor {
    pub year: i32,
    pub position: Pos2,
    pub angle: f32,
    pub radius: f32,
    pub center: Pos2,
    pub record_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeedAnchor {
    /// Index of the owning record in the dataset slice; never reassigned.
    pub record: usize,
    /// Index of the owning year anchor in `Layout::years`; never reassigned.
    pub year_index: usize,
    pub original_pos: Pos2,
    pub current_pos: Pos2,
    pub velocity: Vec2,
    pub alpha: f32,
    pub size: f32,
}

impl SeedAnchor {
    pub fn radius(&self) -> f32 {
        self.size / 1200.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FineBranchAnchor {
    /// Offset from the owning year anchor to the seed's original position.
    pub offset: Vec2,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub stem: Vec<Pos2>,
    pub center: Pos2,
    pub years: Vec<YearAnchor>,
    pub seeds: Vec<SeedAnchor>,
    /// Parallel to `seeds`: `fine_branches[i]` links `seeds[i]` to its year anchor.
    pub fine_branches: Vec<FineBranchAnchor>,
}

fn stem_polyline() -> Vec<Pos2> {
    (0..STEM_POINTS)
        .map(|index| {
            let t = index as f32 / (STEM_POINTS - 1) as f32;
            let curve = 0.3 * (TAU * t).sin();
            Pos2::new(
                BLOOM_CENTER.x * t + curve * 0.3,
                BLOOM_CENTER.y * t + curve * 0.2,
            )
        })
        .collect()
}

fn count_scale(count: usize, min_count: usize, max_count: usize) -> f32 {
    if max_count == min_count {
        1.0
    } else {
        0.5 + 0.5 * ((count - min_count) as f32 / (max_count - min_count) as f32)
    }
}

pub fn compute_layout(records: &[CycloneRecord], rng: &mut impl Rng) -> Layout {
    let stem = stem_polyline();
    let center = BLOOM_CENTER;

    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        by_year.entry(record.year).or_default().push(index);
    }

    if by_year.is_empty() {
        return Layout {
            stem,
            center,
            years: Vec::new(),
            seeds: Vec::new(),
            fine_branches: Vec::new(),
        };
    }

    let min_count = by_year.values().map(Vec::len).min().unwrap_or(1);
    let max_count = by_year.values().map(Vec::len).max().unwrap_or(1);
    let year_count = by_year.len();

    let mut years = Vec::with_capacity(year_count);
    let mut seeds = Vec::with_capacity(records.len());
    let mut fine_branches = Vec::with_capacity(records.len());

    for (year_index, (&year, members)) in by_year.iter().enumerate() {
        let chronology = year_index as f32 / year_count as f32;
        let angle = -TAU * chronology + rng.random_range(-0.2..0.2);
        let spiral_growth = 0.3 * chronology;
        let radius = (2.5 + spiral_growth + rng.random_range(0.0..0.5))
            * count_scale(members.len(), min_count, max_count);
        let position = center + radius * vec2(angle.cos(), angle.sin());

        years.push(YearAnchor {
            year,
            position,
            angle,
            radius,
            center,
            record_count: members.len(),
        });

        let cluster_count = members.len().min(MAX_CLUSTERS);
        for cluster_index in 0..cluster_count {
            let cluster_angle = angle + (cluster_index as f32 - cluster_count as f32 / 2.0) * 0.4;
            let cluster_radius = radius + 1.5 + rng.random_range(0.0..1.0);
            let cluster_pos = center + cluster_radius * vec2(cluster_angle.cos(), cluster_angle.sin());

            // Round-robin split so intensities mix between clusters.
            for &record_index in members.iter().skip(cluster_index).step_by(cluster_count) {
                let offset_angle = rng.random_range(0.0..TAU);
                let offset_radius = rng.random_range(0.1..0.4);
                let original_pos =
                    cluster_pos + offset_radius * vec2(offset_angle.cos(), offset_angle.sin());

                fine_branches.push(FineBranchAnchor {
                    offset: original_pos - position,
                    alpha: BRANCH_ALPHA,
                });
                seeds.push(SeedAnchor {
                    record: record_index,
                    year_index,
                    original_pos,
                    current_pos: original_pos,
                    velocity: Vec2::ZERO,
                    alpha: SEED_ALPHA,
                    size: seed_size(records[record_index].max_wind_speed),
                });
            }
        }
    }

    Layout {
        stem,
        center,
        years,
        seeds,
        fine_branches,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::cyclone::{Category, FormationDate};

    use super::*;

    fn record(year: i32, wind: f32) -> CycloneRecord {
        CycloneRecord::new(
            format!("{year}01"),
            "Trami".to_owned(),
            FormationDate {
                year,
                month: 9,
                day: 20,
            },
            wind,
            960.0,
            2026,
        )
    }

    fn sample_records() -> Vec<CycloneRecord> {
        vec![
            record(2020, 70.0),
            record(2020, 130.0),
            record(2021, 200.0),
        ]
    }

    #[test]
    fn layout_is_deterministic_for_a_fixed_seed() {
        let records = sample_records();
        let a = compute_layout(&records, &mut StdRng::seed_from_u64(7));
        let b = compute_layout(&records, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_yields_a_stem_only_layout() {
        let layout = compute_layout(&[], &mut StdRng::seed_from_u64(1));
        assert_eq!(layout.stem.len(), STEM_POINTS);
        assert!(layout.years.is_empty());
        assert!(layout.seeds.is_empty());
        assert!(layout.fine_branches.is_empty());
    }

    #[test]
    fn stem_runs_from_origin_to_the_bloom_center() {
        let layout = compute_layout(&[], &mut StdRng::seed_from_u64(1));
        assert_eq!(layout.stem[0], Pos2::new(0.0, 0.0));
        assert!((layout.stem[STEM_POINTS - 1] - BLOOM_CENTER).length() < 1e-5);
        assert_eq!(layout.center, BLOOM_CENTER);
    }

    #[test]
    fn three_record_dataset_builds_two_years_and_three_owned_seeds() {
        let records = sample_records();
        assert_eq!(records[0].category, Category::TropicalStorm);
        assert_eq!(records[1].category, Category::Typhoon);
        assert_eq!(records[2].category, Category::SuperTyphoon);

        let layout = compute_layout(&records, &mut StdRng::seed_from_u64(42));
        assert_eq!(layout.years.len(), 2);
        assert_eq!(layout.seeds.len(), 3);
        assert_eq!(layout.fine_branches.len(), 3);

        for seed in &layout.seeds {
            let anchor = &layout.years[seed.year_index];
            assert_eq!(records[seed.record].year, anchor.year);
            assert_eq!(seed.current_pos, seed.original_pos);
            assert_eq!(seed.velocity, Vec2::ZERO);
            assert_eq!(seed.alpha, SEED_ALPHA);
        }
        let mut owned: Vec<usize> = layout.seeds.iter().map(|seed| seed.record).collect();
        owned.sort_unstable();
        assert_eq!(owned, vec![0, 1, 2]);
    }

    #[test]
    fn fine_branch_offsets_point_from_year_anchor_to_seed() {
        let records = sample_records();
        let layout = compute_layout(&records, &mut StdRng::seed_from_u64(13));
        for (seed, branch) in layout.seeds.iter().zip(&layout.fine_branches) {
            let anchor = &layout.years[seed.year_index];
            let reconstructed = anchor.position + branch.offset;
            assert!((reconstructed - seed.original_pos).length() < 1e-5);
            assert_eq!(branch.alpha, BRANCH_ALPHA);
        }
    }

    #[test]
    fn count_scale_stays_within_bounds() {
        assert_eq!(count_scale(4, 4, 4), 1.0);
        assert_eq!(count_scale(4, 4, 9), 0.5);
        assert_eq!(count_scale(9, 4, 9), 1.0);
        let mid = count_scale(6, 4, 9);
        assert!((0.5..=1.0).contains(&mid));
    }

    #[test]
    fn year_radii_scale_with_record_counts() {
        let mut records = Vec::new();
        for _ in 0..8 {
            records.push(record(2020, 85.0));
        }
        records.push(record(2021, 85.0));

        let layout = compute_layout(&records, &mut StdRng::seed_from_u64(21));
        let busy = layout.years.iter().find(|year| year.year == 2020).unwrap();
        let quiet = layout.years.iter().find(|year| year.year == 2021).unwrap();
        assert!(busy.record_count > quiet.record_count);
        // Quiet year collapses toward the 0.5 floor; radii stay positive either way.
        assert!(quiet.radius < busy.radius * 1.2);
        assert!(quiet.radius > 0.0);
    }
}
