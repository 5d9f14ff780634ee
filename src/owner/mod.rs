//! Owner rule engine: who owns the pole, and what separation they require.

pub mod classify;
pub mod floor;

pub use classify::{
    classify_owner, matches_first_energy_hint, ClassificationSource, OwnerClassification,
    OwnershipSignal, FIRST_ENERGY_HINTS,
};
pub use floor::{effective_separation, separation_floor, EffectiveSeparation, SeparationFloor};
