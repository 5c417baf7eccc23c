use archscape_common::{ObjectId, Transform};
use archscape_scene::Scene;
use glam::{Quat, Vec2};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::frame::InputFrame;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateParams {
    pub degrees_per_pixel: f32,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.25,
        }
    }
}

/// Spin an object around the world axes by dragging on it.
///
/// Horizontal pointer motion turns it around world Y, vertical motion
/// around world X (dragging up tips the top away from the viewer).
#[derive(Debug, Clone)]
pub struct RotateController {
    target: ObjectId,
    params: RotateParams,
    engaged: bool,
    last_pointer: Option<Vec2>,
}

impl RotateController {
    pub fn new(target: ObjectId, params: RotateParams) -> Self {
        Self {
            target,
            params,
            engaged: false,
            last_pointer: None,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn update(&mut self, scene: &mut Scene, camera: &Camera, viewport: Vec2, input: &InputFrame) {
        if input.primary.pressed {
            let hit = camera
                .screen_point_to_ray(input.pointer, viewport)
                .and_then(|ray| scene.raycast(&ray, f32::INFINITY));
            if let Some(hit) = hit {
                self.engaged = hit.object == self.target;
            }
        }

        if self.engaged && input.primary.held {
            let delta = input.pointer - self.last_pointer.unwrap_or(input.pointer);
            if delta != Vec2::ZERO {
                let step = self.params.degrees_per_pixel;
                let yaw = Quat::from_rotation_y((-delta.x * step).to_radians());
                let tilt = Quat::from_rotation_x((-delta.y * step).to_radians());
                let target = self.target;
                let rotated = scene.transform(target).and_then(|current| {
                    scene.set_transform(
                        target,
                        Transform {
                            rotation: (tilt * yaw * current.rotation).normalize(),
                            ..current
                        },
                    )
                });
                if let Err(e) = rotated {
                    tracing::debug!(error = %e, "rotate target gone");
                    self.engaged = false;
                }
            }
        }

        self.last_pointer = Some(input.pointer);
        if input.primary.released {
            self.engaged = false;
        }
    }
}
