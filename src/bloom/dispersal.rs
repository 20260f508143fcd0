use std::f32::consts::FRAC_PI_2;

use eframe::egui::{Pos2, Rect, Vec2, vec2};
use rand::Rng;

use super::layout::{BRANCH_ALPHA, FineBranchAnchor, SEED_ALPHA, SeedAnchor};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispersalConfig {
    /// Directional wind bias; seeds blow predominantly one way.
    pub wind_bias: Vec2,
    /// Half-width of the uniform per-axis acceleration jitter.
    pub jitter: f32,
    /// Multiplicative velocity drag per nominal 60 Hz tick.
    pub drag: f32,
    /// Seeds outside this region fade out instead of tracking wind progress.
    pub bounds: Rect,
    pub offscreen_fade_rate: f32,
}

impl Default for DispersalConfig {
    fn default() -> Self {
        Self {
            wind_bias: vec2(-12.0, 3.0),
            jitter: 4.0,
            drag: 0.98,
            bounds: Rect::from_min_max(Pos2::new(-6.0, -6.0), Pos2::new(16.0, 16.0)),
            offscreen_fade_rate: 1.5,
        }
    }
}

/// Eases the wind in over the dispersal phase.
pub fn wind_strength(wind_progress: f32) -> f32 {
    (wind_progress.clamp(0.0, 1.0) * FRAC_PI_2).sin().sqrt()
}

pub fn step_dispersal(
    seeds: &mut [SeedAnchor],
    branches: &mut [FineBranchAnchor],
    wind_progress: f32,
    dt: f32,
    config: &DispersalConfig,
    rng: &mut impl Rng,
) {
    let wind_progress = wind_progress.clamp(0.0, 1.0);
    let strength = wind_strength(wind_progress);
    let damping = config.drag.powf(dt * 60.0);

    for (seed, branch) in seeds.iter_mut().zip(branches.iter_mut()) {
        // random_range rejects an empty range, so a zero jitter skips the draw
        let jitter = if config.jitter > 0.0 {
            vec2(
                rng.random_range(-config.jitter..config.jitter),
                rng.random_range(-config.jitter..config.jitter),
            )
        } else {
            Vec2::ZERO
        };
        let acceleration = config.wind_bias * strength + jitter;

        seed.velocity = (seed.velocity + acceleration * dt) * damping;
        seed.current_pos += seed.velocity * dt;

        if config.bounds.contains(seed.current_pos) {
            seed.alpha = SEED_ALPHA * (1.0 - 0.8 * wind_progress);
        } else {
            seed.alpha = (seed.alpha - config.offscreen_fade_rate * dt).max(0.0);
        }
        branch.alpha = seed.alpha;
    }
}

pub fn reset_positions(seeds: &mut [SeedAnchor], branches: &mut [FineBranchAnchor]) {
    for seed in seeds.iter_mut() {
        seed.current_pos = seed.original_pos;
        seed.velocity = Vec2::ZERO;
        seed.alpha = SEED_ALPHA;
    }
    for branch in branches.iter_mut() {
        branch.alpha = BRANCH_ALPHA;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn seed_at(x: f32, y: f32) -> SeedAnchor {
        SeedAnchor {
            record: 0,
            year_index: 0,
            original_pos: Pos2::new(x, y),
            current_pos: Pos2::new(x, y),
            velocity: Vec2::ZERO,
            alpha: SEED_ALPHA,
            size: 160.0,
        }
    }

    fn branch() -> FineBranchAnchor {
        FineBranchAnchor {
            offset: vec2(1.0, 0.5),
            alpha: BRANCH_ALPHA,
        }
    }

    #[test]
    fn wind_strength_eases_in_and_saturates() {
        assert_eq!(wind_strength(0.0), 0.0);
        assert!(wind_strength(0.2) < wind_strength(0.8));
        assert!((wind_strength(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(wind_strength(3.0), 1.0);
    }

    #[test]
    fn seeds_drift_with_the_wind_bias() {
        let config = DispersalConfig {
            jitter: 0.0,
            ..DispersalConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let mut seeds = vec![seed_at(7.0, 6.0)];
        let mut branches = vec![branch()];

        let mut elapsed = 0.0_f32;
        while elapsed < 1.5 {
            let progress = elapsed / 3.0;
            step_dispersal(&mut seeds, &mut branches, progress, 1.0 / 60.0, &config, &mut rng);
            elapsed += 1.0 / 60.0;
        }

        assert!(seeds[0].current_pos.x < seeds[0].original_pos.x);
        assert!(seeds[0].current_pos.y > seeds[0].original_pos.y);
        assert!(seeds[0].velocity.x < 0.0);
    }

    #[test]
    fn alpha_stays_in_unit_range_and_mirrors_branches() {
        let config = DispersalConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut seeds = vec![seed_at(7.0, 6.0), seed_at(3.0, 4.0)];
        let mut branches = vec![branch(), branch()];

        for step in 0..240 {
            let progress = step as f32 / 240.0;
            step_dispersal(&mut seeds, &mut branches, progress, 1.0 / 60.0, &config, &mut rng);
            for (seed, branch) in seeds.iter().zip(&branches) {
                assert!((0.0..=1.0).contains(&seed.alpha));
                assert_eq!(branch.alpha, seed.alpha);
            }
        }
    }

    #[test]
    fn seeds_outside_the_bounds_fade_to_zero() {
        let config = DispersalConfig {
            bounds: Rect::from_min_max(Pos2::new(-0.5, -0.5), Pos2::new(0.5, 0.5)),
            ..DispersalConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(15);
        let mut seeds = vec![seed_at(5.0, 5.0)];
        let mut branches = vec![branch()];

        for _ in 0..120 {
            step_dispersal(&mut seeds, &mut branches, 0.5, 1.0 / 60.0, &config, &mut rng);
        }
        assert_eq!(seeds[0].alpha, 0.0);
        assert_eq!(branches[0].alpha, 0.0);
    }

    #[test]
    fn a_full_cycle_restores_the_bloom() {
        use super::super::lifecycle::{LifecycleClock, LifecycleConfig, LifecyclePhase};

        let lifecycle = LifecycleConfig::default();
        let config = DispersalConfig::default();
        let mut clock = LifecycleClock::new();
        let mut rng = StdRng::seed_from_u64(31);
        let mut seeds = vec![seed_at(7.0, 6.0), seed_at(4.0, 7.5)];
        let mut branches = vec![branch(), branch()];

        let dt = 1.0 / 60.0;
        let steps = (lifecycle.cycle_secs() / dt).round() as usize + 2;
        for _ in 0..steps {
            if clock.tick(dt, &lifecycle) {
                reset_positions(&mut seeds, &mut branches);
            }
            if clock.phase == LifecyclePhase::Dispersing {
                let progress = clock.wind_progress(&lifecycle);
                step_dispersal(&mut seeds, &mut branches, progress, dt, &config, &mut rng);
            }
        }

        assert_eq!(clock.phase, LifecyclePhase::Growing);
        for seed in &seeds {
            assert_eq!(seed.current_pos, seed.original_pos);
            assert_eq!(seed.velocity, Vec2::ZERO);
            assert_eq!(seed.alpha, SEED_ALPHA);
        }
        for branch in &branches {
            assert_eq!(branch.alpha, BRANCH_ALPHA);
        }
    }

    #[test]
    fn reset_restores_originals_and_is_idempotent() {
        let config = DispersalConfig::default();
        let mut rng = StdRng::seed_from_u64(23);
        let mut seeds = vec![seed_at(7.0, 6.0)];
        let mut branches = vec![branch()];

        for _ in 0..60 {
            step_dispersal(&mut seeds, &mut branches, 0.9, 1.0 / 60.0, &config, &mut rng);
        }
        assert_ne!(seeds[0].current_pos, seeds[0].original_pos);

        reset_positions(&mut seeds, &mut branches);
        let once = (seeds.clone(), branches.clone());

        reset_positions(&mut seeds, &mut branches);
        assert_eq!(seeds, once.0);
        assert_eq!(branches, once.1);

        assert_eq!(seeds[0].current_pos, seeds[0].original_pos);
        assert_eq!(seeds[0].velocity, Vec2::ZERO);
        assert_eq!(seeds[0].alpha, SEED_ALPHA);
        assert_eq!(branches[0].alpha, BRANCH_ALPHA);
    }
}
