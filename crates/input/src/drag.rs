use archscape_common::{ObjectId, Transform};
use archscape_scene::Scene;
use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::frame::InputFrame;

/// Click-and-drag an object across whatever surface is under the pointer.
///
/// The grab offset is kept so the object does not jump to the cursor, and
/// the object's height never changes while dragging.
#[derive(Debug, Clone)]
pub struct DragController {
    object: ObjectId,
    grab_offset: Option<Vec3>,
}

impl DragController {
    pub fn new(object: ObjectId) -> Self {
        Self {
            object,
            grab_offset: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    pub fn update(&mut self, scene: &mut Scene, camera: &Camera, viewport: Vec2, input: &InputFrame) {
        let hit = camera
            .screen_point_to_ray(input.pointer, viewport)
            .and_then(|ray| scene.raycast(&ray, f32::INFINITY));

        if input.primary.pressed {
            if let (Some(hit), Ok(current)) = (&hit, scene.transform(self.object)) {
                if hit.object == self.object {
                    self.grab_offset = Some(hit.point - current.position);
                    tracing::debug!(object = %self.object.short(), "drag started");
                }
            }
        }

        if let Some(offset) = self.grab_offset {
            let moved = match &hit {
                Some(hit) => scene.transform(self.object).and_then(|current| {
                    let mut position = hit.point - offset;
                    position.y = current.position.y;
                    scene.set_transform(
                        self.object,
                        Transform {
                            position,
                            ..current
                        },
                    )
                }),
                None => scene.transform(self.object).map(|_| ()),
            };
            if let Err(e) = moved {
                tracing::debug!(error = %e, "drag target gone, drag ended");
                self.grab_offset = None;
            }
        }

        if input.primary.released {
            self.grab_offset = None;
        }
    }
}
