//! Scene: authoritative per-object state for the archscape controllers.
//!
//! # Invariants
//! - Each mesh and transform has exactly one owner (its scene object).
//! - Raycasts read committed collider state, never a half-replaced buffer.
//! - All mutations flow through explicit operations and append a `SceneEvent`.

mod clock;
mod collider;
mod error;
mod material;
mod raycast;
mod scene;
mod summary;

pub use clock::FrameClock;
pub use collider::MeshCollider;
pub use error::SceneError;
pub use material::{Material, MaterialId, UniformValue};
pub use raycast::{Ray, RayHit, intersect_aabb, intersect_triangle};
pub use scene::{Scene, SceneEvent, SceneObject};
pub use summary::SceneSummary;

pub fn crate_info() -> &'static str {
    "archscape-scene v0.1.0"
}
