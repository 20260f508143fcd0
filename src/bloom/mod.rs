mod dispersal;
mod hittest;
mod layout;
mod lifecycle;
mod sway;

pub use dispersal::{DispersalConfig, reset_positions, step_dispersal};
pub use hittest::hit_test;
pub use layout::{
    BRANCH_ALPHA, FineBranchAnchor, Layout, SEED_ALPHA, SeedAnchor, YearAnchor, compute_layout,
};
pub use lifecycle::{GrowthStage, LifecycleClock, LifecycleConfig, LifecyclePhase};
pub use sway::SwayField;
