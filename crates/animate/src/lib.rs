//! Per-frame animation controllers.
//!
//! Each controller resolves the handles it needs once, at construction,
//! and is then driven by `update(scene, dt)` once per frame.
//!
//! # Invariants
//! - Displacement is always computed from the rest pose, never accumulated.
//! - A missing optional collaborator skips the feature and records a diagnostic.

mod color;
mod light;
mod oscillator;
mod wave;

pub use color::{ColorController, OBJECT_COLOR};
pub use light::{LIGHT_ON, LIGHT_POSITION, LightParams, OrbitingLight};
pub use oscillator::{GrowShrinkAnimator, OscillatorParams, ScaleOscillator, ScalePhase};
pub use wave::{BaseVertexSet, TerrainAnimator, WaveDisplacement, WaveParams, displace};

pub fn crate_info() -> &'static str {
    "archscape-animate v0.1.0"
}
