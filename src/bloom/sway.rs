use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Pos2, Vec2, vec2};
use rand::Rng;

use super::layout::YearAnchor;

const POINTER_RANGE: f32 = 3.0;
const POINTER_FALLOFF: f32 = 1.5;
const POINTER_PUSH: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
struct SwayParams {
    phase: f32,
    amplitude: f32,
    frequency: f32,
}

/// Per-year oscillation parameters, drawn once per layout and fixed afterwards.
pub struct SwayField {
    params: HashMap<i32, SwayParams>,
}

impl SwayField {
    pub fn new(years: &[YearAnchor], rng: &mut impl Rng) -> Self {
        let params = years
            .iter()
            .map(|anchor| {
                (
                    anchor.year,
                    SwayParams {
                        phase: rng.random_range(0.0..TAU),
                        amplitude: rng.random_range(0.12..0.28),
                        frequency: rng.random_range(0.7..1.3),
                    },
                )
            })
            .collect();
        Self { params }
    }

    pub fn sway(&self, year: i32, base: Pos2, pointer: Option<Pos2>, time: f32) -> Vec2 {
        let Some(params) = self.params.get(&year) else {
            return Vec2::ZERO;
        };

        let wind = vec2(
            params.amplitude * (time * params.frequency + params.phase).sin(),
            params.amplitude * 0.3 * (time * params.frequency * 1.3 + params.phase).cos(),
        );

        wind + pointer.map_or(Vec2::ZERO, |pointer| pointer_repulsion(base, pointer))
    }
}

fn pointer_repulsion(base: Pos2, pointer: Pos2) -> Vec2 {
    let delta = base - pointer;
    let distance = delta.length();
    if distance >= POINTER_RANGE {
        return Vec2::ZERO;
    }
    delta * ((-distance / POINTER_FALLOFF).exp() * POINTER_PUSH)
}
