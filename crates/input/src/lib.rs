//! Input-driven controllers.
//!
//! # Invariants
//! - Controllers consume an [`InputFrame`] snapshot, never a live device.
//! - Mode changes go through pure transition functions fed by [`Action`]s.

mod action;
mod camera;
mod controller;
mod drag;
mod frame;
mod help;
mod rotate;

pub use action::{Action, actions};
pub use camera::Camera;
pub use controller::{CameraController, CameraMode, CameraParams, FirstPersonParams, OrbitParams};
pub use drag::DragController;
pub use frame::{ButtonState, InputFrame, Key};
pub use help::HelpToggle;
pub use rotate::{RotateController, RotateParams};

pub fn crate_info() -> &'static str {
    "archscape-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
