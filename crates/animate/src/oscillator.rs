use archscape_common::{ObjectId, Tag, Transform};
use archscape_scene::{Ray, Scene, SceneError};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Grow/shrink configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorParams {
    /// Growth stops at `initial * max_factor`.
    pub max_factor: f32,
    /// Scale change per second, in both phases.
    pub rate: f32,
    /// Scale never drops below `initial * min_factor`.
    pub min_factor: f32,
    /// Ground probe length as a fraction of the current vertical scale.
    pub probe_length_factor: f32,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            max_factor: 2.0,
            rate: 0.25,
            min_factor: 0.1,
            probe_length_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalePhase {
    #[default]
    Growing,
    Shrinking,
}

/// Two-phase uniform scale oscillator.
///
/// Growing runs until the maximum and then flips; shrinking runs until the
/// ground probe reports contact. There is no terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOscillator {
    params: OscillatorParams,
    initial: f32,
    scale: f32,
    phase: ScalePhase,
}

impl ScaleOscillator {
    pub fn new(initial_scale: f32, params: OscillatorParams) -> Self {
        Self {
            params,
            initial: initial_scale,
            scale: initial_scale,
            phase: ScalePhase::Growing,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn phase(&self) -> ScalePhase {
        self.phase
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn params(&self) -> &OscillatorParams {
        &self.params
    }

    pub fn set_params(&mut self, params: OscillatorParams) {
        self.params = params;
    }

    pub fn max_scale(&self) -> f32 {
        self.initial * self.params.max_factor
    }

    pub fn min_scale(&self) -> f32 {
        self.initial * self.params.min_factor
    }

    /// Advance one frame.
    ///
    /// `ground_contact` is only consulted while shrinking, after the scale
    /// has been reduced, and receives the new scale.
    pub fn step(&mut self, dt: f32, ground_contact: impl FnOnce(f32) -> bool) -> ScalePhase {
        let delta = self.params.rate * dt.max(0.0);
        match self.phase {
            ScalePhase::Growing => {
                self.scale += delta;
                if self.scale >= self.max_scale() {
                    self.scale = self.max_scale();
                    self.phase = ScalePhase::Shrinking;
                    tracing::debug!(scale = self.scale, "reached max scale, shrinking");
                }
            }
            ScalePhase::Shrinking => {
                self.scale -= delta;
                if ground_contact(self.scale) {
                    self.phase = ScalePhase::Growing;
                    tracing::debug!(scale = self.scale, "ground contact, growing");
                }
            }
        }
        self.scale = self.scale.max(self.min_scale());
        self.phase
    }
}

/// Drives an object's uniform scale with a [`ScaleOscillator`] and probes
/// the scene for terrain below it.
#[derive(Debug, Clone)]
pub struct GrowShrinkAnimator {
    object: ObjectId,
    oscillator: ScaleOscillator,
    warned: bool,
}

impl GrowShrinkAnimator {
    /// Start from the object's current X scale.
    pub fn attach(
        scene: &Scene,
        object: ObjectId,
        params: OscillatorParams,
    ) -> Result<Self, SceneError> {
        let initial = scene.transform(object)?.scale.x;
        Ok(Self {
            object,
            oscillator: ScaleOscillator::new(initial, params),
            warned: false,
        })
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn oscillator(&self) -> &ScaleOscillator {
        &self.oscillator
    }

    pub fn set_params(&mut self, params: OscillatorParams) {
        self.oscillator.set_params(params);
    }

    /// Advance one frame. Returns `None` when the object is gone.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> Option<ScalePhase> {
        let transform = match scene.transform(self.object) {
            Ok(t) => t,
            Err(e) => {
                if !self.warned {
                    scene.diagnostics_mut().record("grow_shrink", e.to_string());
                    self.warned = true;
                }
                return None;
            }
        };

        let object = self.object;
        let probe_factor = self.oscillator.params().probe_length_factor;
        let phase = {
            let scene = &*scene;
            self.oscillator.step(dt, |scale| {
                touches_terrain(scene, object, &transform, scale, probe_factor)
            })
        };

        let scaled = Transform {
            scale: Vec3::splat(self.oscillator.scale()),
            ..transform
        };
        scene.set_transform(object, scaled).ok()?;
        Some(phase)
    }
}

/// Cast two rays straight down from either side of the object and report
/// whether either nearest hit is tagged as terrain.
fn touches_terrain(
    scene: &Scene,
    object: ObjectId,
    transform: &Transform,
    scale: f32,
    probe_factor: f32,
) -> bool {
    let offset = transform.right() * scale * 0.5;
    let length = scale * probe_factor;
    [transform.position - offset, transform.position + offset]
        .into_iter()
        .any(|origin| {
            scene
                .raycast_filtered(&Ray::down(origin), length, |id, _| id != object)
                .is_some_and(|hit| hit.tag == Tag::Terrain)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use archscape_mesh::{GridTerrainBuilder, TerrainParams};
    use archscape_scene::SceneObject;

    #[test]
    fn grows_then_flips_at_max() {
        let mut osc = ScaleOscillator::new(1.0, OscillatorParams::default());
        assert_eq!(osc.phase(), ScalePhase::Growing);
        let mut frames = 0;
        while osc.phase() == ScalePhase::Growing {
            osc.step(0.1, |_| panic!("probe must not run while growing"));
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(osc.scale(), 2.0);
        assert_eq!(osc.phase(), ScalePhase::Shrinking);
    }

    #[test]
    fn large_step_clamps_exactly_to_max() {
        let mut osc = ScaleOscillator::new(1.5, OscillatorParams::default());
        osc.step(100.0, |_| false);
        assert_eq!(osc.scale(), 3.0);
        assert_eq!(osc.phase(), ScalePhase::Shrinking);
    }

    #[test]
    fn shrinking_never_goes_below_floor() {
        let mut osc = ScaleOscillator::new(1.0, OscillatorParams::default());
        osc.step(100.0, |_| false);
        for dt in [0.5, 3.0, 100.0, 1e6, 0.0] {
            osc.step(dt, |_| false);
            assert!(osc.scale() >= osc.min_scale());
            assert_eq!(osc.phase(), ScalePhase::Shrinking);
        }
        assert!((osc.scale() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn contact_flips_back_to_growing_at_any_scale() {
        let mut osc = ScaleOscillator::new(1.0, OscillatorParams::default());
        osc.step(100.0, |_| false);
        let mut probed = None;
        let phase = osc.step(1.0, |s| {
            probed = Some(s);
            true
        });
        assert_eq!(phase, ScalePhase::Growing);
        assert_eq!(probed, Some(1.75));
        assert_eq!(osc.scale(), 1.75);
    }

    fn ground_scene(arch_height: f32) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let terrain = GridTerrainBuilder::new(TerrainParams {
            width_segments: 4,
            length_segments: 4,
            world_width: 8.0,
            world_length: 8.0,
        })
        .build()
        .unwrap();
        scene.spawn(
            SceneObject::new("terrain")
                .with_transform(Transform::from_position(Vec3::new(-4.0, 0.0, -4.0)))
                .with_tag(Tag::Terrain)
                .with_mesh(terrain)
                .with_collider(),
        );
        let arch = scene.spawn(
            SceneObject::new("arch")
                .with_transform(Transform::from_position(Vec3::new(0.3, arch_height, 0.2))),
        );
        (scene, arch)
    }

    #[test]
    fn probe_detects_terrain_within_reach() {
        let (scene, arch) = ground_scene(0.5);
        let t = scene.transform(arch).unwrap();
        assert!(touches_terrain(&scene, arch, &t, 1.0, 0.6));
        assert!(!touches_terrain(&scene, arch, &t, 0.5, 0.6));
    }

    #[test]
    fn probe_ignores_untagged_ground() {
        let (mut scene, arch) = ground_scene(0.5);
        let ids: Vec<ObjectId> = scene.objects().keys().copied().collect();
        for id in ids {
            if let Some(o) = scene.get_mut(id) {
                o.tag = Tag::Untagged;
            }
        }
        let t = scene.transform(arch).unwrap();
        assert!(!touches_terrain(&scene, arch, &t, 1.0, 0.6));
    }

    #[test]
    fn animator_applies_uniform_scale() {
        let (mut scene, arch) = ground_scene(10.0);
        let mut anim = GrowShrinkAnimator::attach(&scene, arch, OscillatorParams::default()).unwrap();
        assert_eq!(anim.update(&mut scene, 1.0), Some(ScalePhase::Growing));
        assert_eq!(scene.transform(arch).unwrap().scale, Vec3::splat(1.25));
    }

    #[test]
    fn animator_reports_missing_object_once() {
        let (mut scene, arch) = ground_scene(10.0);
        let mut anim = GrowShrinkAnimator::attach(&scene, arch, OscillatorParams::default()).unwrap();
        scene.despawn(arch);
        assert_eq!(anim.update(&mut scene, 0.1), None);
        assert_eq!(anim.update(&mut scene, 0.1), None);
        assert_eq!(scene.diagnostics().len(), 1);
    }
}
