use archscape_common::ObjectId;
use archscape_mesh::{CollisionShapeSink, Mesh, MeshError};
use archscape_scene::{Scene, SceneError};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sine wave configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Peak height of the wave.
    pub amplitude: f32,
    /// Spatial and temporal frequency multiplier.
    pub frequency: f32,
    /// Time scale applied to each frame's delta.
    pub speed: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 0.5,
            speed: 1.0,
        }
    }
}

/// Rest-pose vertex positions captured once at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseVertexSet(Box<[Vec3]>);

impl BaseVertexSet {
    pub fn capture(mesh: &Mesh) -> Self {
        Self(mesh.vertices().into())
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Vec3>> for BaseVertexSet {
    fn from(v: Vec<Vec3>) -> Self {
        Self(v.into_boxed_slice())
    }
}

/// Displace `base` vertically: `y = amplitude * sin((x + z + time) * frequency)`.
///
/// X and Z are copied from `base` unchanged.
pub fn displace(base: &[Vec3], params: &WaveParams, time: f32) -> Vec<Vec3> {
    base.iter()
        .map(|v| {
            let y = params.amplitude * ((v.x + v.z + time) * params.frequency).sin();
            Vec3::new(v.x, y, v.z)
        })
        .collect()
}

/// Time-accumulating wave over a fixed rest pose.
#[derive(Debug, Clone)]
pub struct WaveDisplacement {
    base: BaseVertexSet,
    params: WaveParams,
    time: f32,
}

impl WaveDisplacement {
    pub fn new(base: BaseVertexSet, params: WaveParams) -> Self {
        Self {
            base,
            params,
            time: 0.0,
        }
    }

    pub fn from_mesh(mesh: &Mesh, params: WaveParams) -> Self {
        Self::new(BaseVertexSet::capture(mesh), params)
    }

    pub fn base(&self) -> &BaseVertexSet {
        &self.base
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Change parameters between frames. Accumulated time is kept.
    pub fn set_params(&mut self, params: WaveParams) {
        self.params = params;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Accumulate `speed * dt`. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.time += self.params.speed * dt.max(0.0);
        self.time
    }

    /// Displaced vertices at the current accumulated time.
    pub fn sample(&self) -> Vec<Vec3> {
        displace(self.base.as_slice(), &self.params, self.time)
    }

    /// Advance one frame and write the result into `mesh`.
    ///
    /// Normals are recomputed, then the collision shape is cleared and
    /// reassigned so any cached acceleration data is rebuilt. On error
    /// neither the mesh nor the accumulated time changes.
    pub fn apply(
        &mut self,
        dt: f32,
        mesh: &mut Mesh,
        collider: Option<&mut dyn CollisionShapeSink>,
    ) -> Result<(), MeshError> {
        let time = self.time + self.params.speed * dt.max(0.0);
        mesh.replace_vertices(displace(self.base.as_slice(), &self.params, time))?;
        self.time = time;
        mesh.recompute_normals();
        if let Some(collider) = collider {
            collider.clear();
            collider.assign(mesh);
        }
        Ok(())
    }
}

/// Animates one scene object's mesh with a [`WaveDisplacement`].
#[derive(Debug, Clone)]
pub struct TerrainAnimator {
    object: ObjectId,
    wave: WaveDisplacement,
    warned: bool,
}

impl TerrainAnimator {
    /// Capture the rest pose of `object`'s mesh.
    pub fn attach(scene: &Scene, object: ObjectId, params: WaveParams) -> Result<Self, SceneError> {
        let mesh = scene
            .get(object)
            .ok_or(SceneError::ObjectNotFound(object))?
            .mesh
            .as_ref()
            .ok_or(SceneError::MissingMesh(object))?;
        Ok(Self {
            object,
            wave: WaveDisplacement::from_mesh(mesh, params),
            warned: false,
        })
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn wave(&self) -> &WaveDisplacement {
        &self.wave
    }

    pub fn set_params(&mut self, params: WaveParams) {
        self.wave.set_params(params);
    }

    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        let _span = tracing::trace_span!("terrain_animate").entered();
        let (updated, problem) = match scene.mesh_and_collider_mut(self.object) {
            Ok((mesh, collider)) => {
                let has_collider = collider.is_some();
                let sink = collider.map(|c| c as &mut dyn CollisionShapeSink);
                match self.wave.apply(dt, mesh, sink) {
                    Ok(()) if has_collider => (true, None),
                    Ok(()) => (
                        true,
                        Some("no collider attached; collision shape not refreshed".to_string()),
                    ),
                    Err(e) => (false, Some(e.to_string())),
                }
            }
            Err(e) => (false, Some(e.to_string())),
        };

        match problem {
            Some(message) if !self.warned => {
                scene.diagnostics_mut().record("terrain", message);
                self.warned = true;
            }
            _ => {}
        }
        if updated {
            scene.mark_mesh_updated(self.object);
            tracing::trace!(time = self.wave.time(), "terrain displaced");
        }
    }
}
