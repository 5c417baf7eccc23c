use archscape_common::{ObjectId, Transform};
use archscape_scene::{MaterialId, Scene, UniformValue};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Uniform receiving the light position (w = 0).
pub const LIGHT_POSITION: &str = "_LightPosition";
/// Uniform receiving 1.0 when the light is on, 0.0 otherwise.
pub const LIGHT_ON: &str = "_LightOn";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightParams {
    /// Angular speed in radians per second.
    pub speed: f32,
    pub radius: f32,
    pub height: f32,
    pub on: bool,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            speed: 2.0,
            radius: 5.0,
            height: 3.0,
            on: true,
        }
    }
}

/// Point light circling the origin on the XZ plane.
///
/// Moves an optional marker object and broadcasts its position and on/off
/// state to a list of materials every frame.
#[derive(Debug, Clone, Default)]
pub struct OrbitingLight {
    params: LightParams,
    time: f32,
    marker: Option<ObjectId>,
    materials: Vec<MaterialId>,
    warned: bool,
    materials_warned: bool,
}

impl OrbitingLight {
    pub fn new(params: LightParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn with_marker(mut self, marker: ObjectId) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_materials(mut self, materials: Vec<MaterialId>) -> Self {
        self.materials = materials;
        self
    }

    pub fn params(&self) -> &LightParams {
        &self.params
    }

    pub fn set_params(&mut self, params: LightParams) {
        self.params = params;
    }

    pub fn set_on(&mut self, on: bool) {
        self.params.on = on;
    }

    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.time.sin_cos();
        Vec3::new(
            self.params.radius * cos,
            self.params.height,
            self.params.radius * sin,
        )
    }

    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> Vec3 {
        self.time += dt.max(0.0) * self.params.speed;
        let position = self.position();

        if let Some(marker) = self.marker {
            let moved = scene.transform(marker).and_then(|t| {
                scene.set_transform(
                    marker,
                    Transform {
                        position,
                        ..t
                    },
                )
            });
            if let Err(e) = moved {
                if !self.warned {
                    scene.diagnostics_mut().record("light", e.to_string());
                    self.warned = true;
                }
            }
        }

        let mut unknown = scene.broadcast_uniform(
            &self.materials,
            LIGHT_POSITION,
            UniformValue::Vector(position.extend(0.0)),
        );
        unknown.extend(scene.broadcast_uniform(
            &self.materials,
            LIGHT_ON,
            UniformValue::Float(if self.params.on { 1.0 } else { 0.0 }),
        ));
        if !unknown.is_empty() && !self.materials_warned {
            unknown.sort();
            unknown.dedup();
            scene
                .diagnostics_mut()
                .record("light", format!("unknown materials {unknown:?}"));
            self.materials_warned = true;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archscape_scene::{Material, SceneObject};
    use glam::Vec4;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn starts_on_positive_x() {
        let light = OrbitingLight::new(LightParams::default());
        assert_eq!(light.position(), Vec3::new(5.0, 3.0, 0.0));
    }

    #[test]
    fn quarter_turn_moves_marker_and_uniforms() {
        let mut scene = Scene::new();
        let marker = scene.spawn(SceneObject::new("light sphere"));
        let a = scene.add_material(Material::new("terrain"));
        let b = scene.add_material(Material::new("arch"));
        let mut light = OrbitingLight::new(LightParams {
            speed: 1.0,
            ..LightParams::default()
        })
        .with_marker(marker)
        .with_materials(vec![a, b]);

        let pos = light.update(&mut scene, FRAC_PI_2);
        assert!((pos - Vec3::new(0.0, 3.0, 5.0)).length() < 1e-5);
        assert_eq!(scene.transform(marker).unwrap().position, pos);
        for id in [a, b] {
            let m = scene.material(id).unwrap();
            assert_eq!(m.vector(LIGHT_POSITION), Some(Vec4::new(pos.x, pos.y, pos.z, 0.0)));
            assert_eq!(m.float(LIGHT_ON), Some(1.0));
        }
    }

    #[test]
    fn off_writes_zero() {
        let mut scene = Scene::new();
        let a = scene.add_material(Material::new("terrain"));
        let mut light = OrbitingLight::new(LightParams::default()).with_materials(vec![a]);
        light.set_on(false);
        light.update(&mut scene, 0.1);
        assert_eq!(scene.material(a).unwrap().float(LIGHT_ON), Some(0.0));
    }

    #[test]
    fn missing_marker_is_diagnosed_once() {
        let mut scene = Scene::new();
        let mut light = OrbitingLight::new(LightParams::default()).with_marker(ObjectId::new());
        light.update(&mut scene, 0.1);
        light.update(&mut scene, 0.1);
        assert_eq!(scene.diagnostics().len(), 1);
    }

    #[test]
    fn unknown_material_is_diagnosed_once() {
        let mut scene = Scene::new();
        let known = scene.add_material(Material::new("terrain"));
        let mut light = OrbitingLight::new(LightParams::default())
            .with_materials(vec![MaterialId(42), known]);
        for _ in 0..100 {
            light.update(&mut scene, 0.1);
        }
        assert_eq!(scene.diagnostics().len(), 1);
        assert!(scene.diagnostics().entries()[0].message.contains("42"));
        assert_eq!(scene.material(known).unwrap().float(LIGHT_ON), Some(1.0));
    }
}
