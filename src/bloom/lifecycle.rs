const MIN_PHASE_SECS: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    Growing,
    Stable,
    Dispersing,
}

impl LifecyclePhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Stable => "stable",
            Self::Dispersing => "dispersing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifecycleConfig {
    pub regrow_secs: f32,
    pub stable_secs: f32,
    pub wind_secs: f32,
    pub fade_delay_secs: f32,
    pub fade_secs: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            regrow_secs: 4.0,
            stable_secs: 3.0,
            wind_secs: 3.0,
            fade_delay_secs: 2.0,
            fade_secs: 2.0,
        }
    }
}

impl LifecycleConfig {
    pub fn cycle_secs(&self) -> f32 {
        self.regrow_secs + self.stable_secs + self.wind_secs
    }
}

/// Reveal order during the Growing phase; each stage owns a slice of growth progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthStage {
    Stem,
    YearBranches,
    FineBranches,
    Seeds,
}

impl GrowthStage {
    fn window(self) -> (f32, f32) {
        match self {
            Self::Stem => (0.0, 0.3),
            Self::YearBranches => (0.3, 0.3),
            Self::FineBranches => (0.6, 0.25),
            Self::Seeds => (0.85, 0.15),
        }
    }

    pub fn progress(self, growth_progress: f32) -> f32 {
        let (start, span) = self.window();
        ((growth_progress - start) / span).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifecycleClock {
    pub phase: LifecyclePhase,
    /// Seconds since entering the current phase.
    pub elapsed: f32,
    pub wind_active: bool,
}

impl Default for LifecycleClock {
    fn default() -> Self {
        Self {
            phase: LifecyclePhase::Growing,
            elapsed: 0.0,
            wind_active: false,
        }
    }
}

impl LifecycleClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the cycle by `dt` seconds. Transitions carry overshoot forward,
    /// so the end state depends only on accumulated time, not tick granularity.
    /// Returns true when the cycle wrapped back into Growing and the host must
    /// hard-reset seed and branch anchors.
    pub fn tick(&mut self, dt: f32, config: &LifecycleConfig) -> bool {
        let mut restarted = false;
        self.elapsed += dt.max(0.0);

        loop {
            let duration = self.phase_duration(config);
            if self.elapsed < duration {
                break;
            }
            self.elapsed -= duration;
            self.phase = match self.phase {
                LifecyclePhase::Growing => LifecyclePhase::Stable,
                LifecyclePhase::Stable => {
                    self.wind_active = true;
                    LifecyclePhase::Dispersing
                }
                LifecyclePhase::Dispersing => {
                    self.wind_active = false;
                    restarted = true;
                    LifecyclePhase::Growing
                }
            };
        }

        restarted
    }

    fn phase_duration(&self, config: &LifecycleConfig) -> f32 {
        let duration = match self.phase {
            LifecyclePhase::Growing => config.regrow_secs,
            LifecyclePhase::Stable => config.stable_secs,
            LifecyclePhase::Dispersing => config.wind_secs,
        };
        duration.max(MIN_PHASE_SECS)
    }

    pub fn growth_progress(&self, config: &LifecycleConfig) -> f32 {
        match self.phase {
            LifecyclePhase::Growing => {
                (self.elapsed / config.regrow_secs.max(MIN_PHASE_SECS)).min(1.0)
            }
            _ => 1.0,
        }
    }

    /// Fades stem and year branches late in the dispersal phase; seeds fade on
    /// their own velocity-linked schedule instead.
    pub fn fade_progress(&self, config: &LifecycleConfig) -> f32 {
        if self.phase != LifecyclePhase::Dispersing || self.elapsed < config.fade_delay_secs {
            return 0.0;
        }
        ((self.elapsed - config.fade_delay_secs) / config.fade_secs.max(MIN_PHASE_SECS))
            .clamp(0.0, 1.0)
    }

    pub fn wind_progress(&self, config: &LifecycleConfig) -> f32 {
        match self.phase {
            LifecyclePhase::Dispersing => {
                (self.elapsed / config.wind_secs.max(MIN_PHASE_SECS)).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}
