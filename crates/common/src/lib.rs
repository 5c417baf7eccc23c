//! Shared types for the archscape scene.
//!
//! # Invariants
//! - Types here carry no engine state; they are plain values passed between crates.

mod color;
mod diagnostics;
mod types;

pub use color::Color;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use types::{ObjectId, Tag, Transform};

pub fn crate_info() -> &'static str {
    "archscape-common v0.1.0"
}
