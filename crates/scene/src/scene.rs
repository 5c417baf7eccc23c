use std::collections::BTreeMap;

use archscape_common::{Diagnostics, ObjectId, Tag, Transform};
use archscape_mesh::{CollisionShapeSink, Mesh};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::collider::MeshCollider;
use crate::error::SceneError;
use crate::material::{Material, MaterialId, UniformValue};
use crate::raycast::{Ray, RayHit};
use crate::summary::SceneSummary;

/// An event record produced by every explicit scene mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    Spawned { id: ObjectId, name: String },
    Despawned { id: ObjectId },
    TransformUpdated {
        id: ObjectId,
        old: Transform,
        new: Transform,
    },
    ActiveChanged { id: ObjectId, active: bool },
    MeshAttached { id: ObjectId, vertices: usize },
    /// Vertices were replaced; `collider_refreshed` is false when no collider is attached.
    MeshUpdated {
        id: ObjectId,
        revision: u64,
        collider_refreshed: bool,
    },
    UniformWritten { material: MaterialId, name: String },
}

/// One object in the scene. It exclusively owns its mesh and collider.
#[derive(Debug, Clone, Default)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub tag: Tag,
    pub active: bool,
    pub mesh: Option<Mesh>,
    pub collider: Option<MeshCollider>,
    pub material: Option<MaterialId>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            ..Self::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Attach a collider built from the current mesh, or an empty one if there is none.
    pub fn with_collider(mut self) -> Self {
        self.collider = Some(match &self.mesh {
            Some(mesh) => MeshCollider::from_mesh(mesh),
            None => MeshCollider::new(),
        });
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }
}

/// The authoritative scene state.
///
/// Objects live in a BTreeMap so iteration (and therefore raycast tie
/// breaking) is deterministic.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneObject>,
    materials: BTreeMap<MaterialId, Material>,
    next_material: u64,
    clock: FrameClock,
    diagnostics: Diagnostics,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Frame clock ---

    /// Advance the frame clock. Returns the sanitized delta to feed controllers.
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.clock.tick(delta)
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    // --- Events and diagnostics ---

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    // --- Objects ---

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &BTreeMap<ObjectId, SceneObject> {
        &self.objects
    }

    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId::new();
        self.spawn_with_id(id, object);
        id
    }

    pub fn spawn_with_id(&mut self, id: ObjectId, object: SceneObject) {
        tracing::debug!(id = %id.short(), name = %object.name, "spawned object");
        self.events.push(SceneEvent::Spawned {
            id,
            name: object.name.clone(),
        });
        self.objects.insert(id, object);
    }

    /// Remove an object; its mesh and collider are dropped with it.
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            self.events.push(SceneEvent::Despawned { id });
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn transform(&self, id: ObjectId) -> Result<Transform, SceneError> {
        self.get(id)
            .map(|o| o.transform)
            .ok_or(SceneError::ObjectNotFound(id))
    }

    pub fn set_transform(&mut self, id: ObjectId, new: Transform) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        let old = object.transform;
        object.transform = new;
        self.events
            .push(SceneEvent::TransformUpdated { id, old, new });
        Ok(())
    }

    pub fn set_active(&mut self, id: ObjectId, active: bool) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        if object.active != active {
            object.active = active;
            self.events.push(SceneEvent::ActiveChanged { id, active });
        }
        Ok(())
    }

    /// Give an object its own mesh, replacing any previous one.
    ///
    /// An attached collider is rebuilt from the new mesh.
    pub fn attach_mesh(&mut self, id: ObjectId, mesh: Mesh) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        let vertices = mesh.vertex_count();
        if let Some(collider) = object.collider.as_mut() {
            collider.clear();
            collider.assign(&mesh);
        }
        object.mesh = Some(mesh);
        self.events.push(SceneEvent::MeshAttached { id, vertices });
        Ok(())
    }

    /// Add a collider shaped like the object's current mesh.
    pub fn attach_collider(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        let mesh = object.mesh.as_ref().ok_or(SceneError::MissingMesh(id))?;
        object.collider = Some(MeshCollider::from_mesh(mesh));
        Ok(())
    }

    /// Split borrow of an object's mesh and optional collider for in-place animation.
    pub fn mesh_and_collider_mut(
        &mut self,
        id: ObjectId,
    ) -> Result<(&mut Mesh, Option<&mut MeshCollider>), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        let mesh = object.mesh.as_mut().ok_or(SceneError::MissingMesh(id))?;
        Ok((mesh, object.collider.as_mut()))
    }

    /// Log that an object's vertices were replaced in place.
    pub fn mark_mesh_updated(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get(&id) else {
            return;
        };
        let Some(mesh) = &object.mesh else {
            return;
        };
        let collider_refreshed = object
            .collider
            .as_ref()
            .is_some_and(|c| !c.is_stale(mesh));
        self.events.push(SceneEvent::MeshUpdated {
            id,
            revision: mesh.revision(),
            collider_refreshed,
        });
    }

    // --- Materials ---

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.next_material);
        self.next_material += 1;
        self.materials.insert(id, material);
        id
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn set_uniform(
        &mut self,
        id: MaterialId,
        name: &str,
        value: UniformValue,
    ) -> Result<(), SceneError> {
        let material = self
            .materials
            .get_mut(&id)
            .ok_or(SceneError::MaterialNotFound(id))?;
        material.set(name, value);
        self.events.push(SceneEvent::UniformWritten {
            material: id,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Write the same uniform to every listed material.
    ///
    /// Each write is independent of the others. Returns the handles that
    /// matched no material; reporting them is left to the caller so a
    /// per-frame writer can do it once.
    pub fn broadcast_uniform(
        &mut self,
        targets: &[MaterialId],
        name: &str,
        value: UniformValue,
    ) -> Vec<MaterialId> {
        targets
            .iter()
            .copied()
            .filter(|&id| self.set_uniform(id, name, value).is_err())
            .collect()
    }

    // --- Queries ---

    /// Nearest hit against every active object with a collider.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.raycast_filtered(ray, max_distance, |_, _| true)
    }

    /// Nearest hit among active colliders for which `accept` returns true.
    pub fn raycast_filtered(
        &self,
        ray: &Ray,
        max_distance: f32,
        mut accept: impl FnMut(ObjectId, &SceneObject) -> bool,
    ) -> Option<RayHit> {
        let mut best: Option<(f32, ObjectId)> = None;
        for (&id, object) in &self.objects {
            if !object.active || !accept(id, object) {
                continue;
            }
            let Some(collider) = &object.collider else {
                continue;
            };
            if object.transform.scale.cmpeq(Vec3::ZERO).any() {
                continue;
            }

            // Affine maps preserve the ray parameter, so `t` stays a world distance.
            let to_local = object.transform.to_matrix().inverse();
            let origin = to_local.transform_point3(ray.origin);
            let direction = to_local.transform_vector3(ray.direction);
            let limit = best.map_or(max_distance, |(t, _)| t);
            if let Some(t) = collider.raycast_local(origin, direction, limit) {
                if best.is_none_or(|(b, _)| t < b) {
                    best = Some((t, id));
                }
            }
        }

        let (distance, id) = best?;
        let object = &self.objects[&id];
        Some(RayHit {
            object: id,
            tag: object.tag.clone(),
            point: ray.at(distance),
            distance,
        })
    }

    pub fn summary(&self) -> SceneSummary {
        let meshes = self.objects.values().filter_map(|o| o.mesh.as_ref());
        let (vertices, triangles) = meshes.fold((0, 0), |(v, t), m| {
            (v + m.vertex_count(), t + m.triangle_count())
        });
        SceneSummary {
            frame: self.clock.frame(),
            elapsed: self.clock.elapsed(),
            objects: self.objects.len(),
            active_objects: self.objects.values().filter(|o| o.active).count(),
            vertices,
            triangles,
            colliders: self
                .objects
                .values()
                .filter(|o| o.collider.is_some())
                .count(),
            materials: self.materials.len(),
            diagnostics: self.diagnostics.len(),
        }
    }
}
