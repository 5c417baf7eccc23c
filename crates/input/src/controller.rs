use archscape_common::ObjectId;
use archscape_scene::Scene;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::action::{Action, actions};
use crate::camera::Camera;
use crate::frame::InputFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    AutoOrbit,
}

impl CameraMode {
    /// Apply mode-switch actions in order; the last one wins.
    pub fn transition(self, actions: &[Action]) -> Self {
        actions.iter().fold(self, |mode, action| match action {
            Action::SelectFirstPerson => CameraMode::FirstPerson,
            Action::SelectAutoOrbit => CameraMode::AutoOrbit,
            Action::ToggleHelp => mode,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstPersonParams {
    /// Units per second at full axis deflection.
    pub move_speed: f32,
    /// Degrees per unit of look axis.
    pub look_speed: f32,
}

impl Default for FirstPersonParams {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_speed: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    pub distance: f32,
    /// Degrees per second.
    pub speed: f32,
    /// Degrees above the horizon.
    pub elevation: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            distance: 10.0,
            speed: 10.0,
            elevation: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub mode: CameraMode,
    pub first_person: FirstPersonParams,
    pub orbit: OrbitParams,
}

/// Two-mode camera driver.
///
/// The current mode is applied first, then this frame's actions may switch
/// the mode for the next frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    params: CameraParams,
    mode: CameraMode,
    orbit_yaw: f32,
    target: Option<ObjectId>,
    warned: bool,
}

impl CameraController {
    pub fn new(params: CameraParams) -> Self {
        Self {
            mode: params.mode,
            params,
            orbit_yaw: 0.0,
            target: None,
            warned: false,
        }
    }

    pub fn with_target(mut self, target: ObjectId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_params(&mut self, params: CameraParams) {
        self.params = params;
    }

    /// Orbit angle in degrees.
    pub fn orbit_yaw(&self) -> f32 {
        self.orbit_yaw
    }

    pub fn update(&mut self, camera: &mut Camera, scene: &mut Scene, input: &InputFrame, dt: f32) {
        let dt = dt.max(0.0);
        match self.mode {
            CameraMode::FirstPerson => self.first_person(camera, input, dt),
            CameraMode::AutoOrbit => self.auto_orbit(camera, scene, dt),
        }

        let next = self.mode.transition(&actions(input));
        if next != self.mode {
            tracing::debug!(from = ?self.mode, to = ?next, "camera mode changed");
            self.mode = next;
        }
    }

    fn first_person(&self, camera: &mut Camera, input: &InputFrame, dt: f32) {
        let p = &self.params.first_person;
        camera.yaw += (p.look_speed * input.look.x).to_radians();
        camera.pitch = (camera.pitch + (p.look_speed * input.look.y).to_radians())
            .clamp(-90.0_f32.to_radians(), 90.0_f32.to_radians());

        let motion = camera.forward() * input.movement.y + camera.right() * input.movement.x;
        camera.position += motion * p.move_speed * dt;
    }

    fn auto_orbit(&mut self, camera: &mut Camera, scene: &mut Scene, dt: f32) {
        let target = match self.target.map(|id| scene.transform(id)) {
            Some(Ok(t)) => t.position,
            Some(Err(e)) => return self.warn_once(scene, e.to_string()),
            None => return self.warn_once(scene, "orbit target not assigned".into()),
        };

        let p = &self.params.orbit;
        self.orbit_yaw += p.speed * dt;
        camera.position = target + orbit_offset(self.orbit_yaw, p.elevation, p.distance);
        camera.look_at(target);
    }

    fn warn_once(&mut self, scene: &mut Scene, message: String) {
        if !self.warned {
            scene.diagnostics_mut().record("camera", message);
            self.warned = true;
        }
    }
}

/// Offset from the target for an orbit angle and elevation, both in degrees.
///
/// At yaw 0 the camera sits behind the target on -Z, raised by the elevation.
fn orbit_offset(yaw_deg: f32, elevation_deg: f32, distance: f32) -> Vec3 {
    let (sy, cy) = yaw_deg.to_radians().sin_cos();
    let (se, ce) = elevation_deg.to_radians().sin_cos();
    Vec3::new(-distance * ce * sy, distance * se, -distance * ce * cy)
}
