use archscape_mesh::{CollisionShapeSink, Mesh};
use glam::Vec3;

use crate::raycast::{intersect_aabb, intersect_triangle};

/// Cached triangle soup built from a mesh at assignment time.
#[derive(Debug, Clone)]
struct CollisionShape {
    triangles: Vec<[Vec3; 3]>,
    min: Vec3,
    max: Vec3,
    revision: u64,
}

/// Mesh-derived collision shape in the owning object's local space.
///
/// The shape is a snapshot: vertex changes on the source mesh are not seen
/// until the owner clears and reassigns it.
#[derive(Debug, Clone, Default)]
pub struct MeshCollider {
    shape: Option<CollisionShape>,
    assignments: u64,
}

impl MeshCollider {
    /// An empty collider with no shape assigned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut collider = Self::new();
        collider.assign(mesh);
        collider
    }

    pub fn is_assigned(&self) -> bool {
        self.shape.is_some()
    }

    /// Mesh revision the cached shape was built from.
    pub fn revision(&self) -> Option<u64> {
        self.shape.as_ref().map(|s| s.revision)
    }

    /// Number of times a shape has been assigned.
    pub fn assignments(&self) -> u64 {
        self.assignments
    }

    /// Whether the cached shape lags behind `mesh`.
    pub fn is_stale(&self, mesh: &Mesh) -> bool {
        self.revision() != Some(mesh.revision())
    }

    pub fn triangle_count(&self) -> usize {
        self.shape.as_ref().map_or(0, |s| s.triangles.len())
    }

    pub fn local_bounds(&self) -> Option<(Vec3, Vec3)> {
        self.shape.as_ref().map(|s| (s.min, s.max))
    }

    /// Nearest hit parameter along a local-space ray, within `max_t`.
    pub fn raycast_local(&self, origin: Vec3, dir: Vec3, max_t: f32) -> Option<f32> {
        let shape = self.shape.as_ref()?;
        let entry = intersect_aabb(origin, dir, shape.min, shape.max)?;
        if entry > max_t {
            return None;
        }
        shape
            .triangles
            .iter()
            .filter_map(|tri| intersect_triangle(origin, dir, *tri))
            .filter(|t| *t <= max_t)
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl CollisionShapeSink for MeshCollider {
    fn clear(&mut self) {
        self.shape = None;
    }

    fn assign(&mut self, mesh: &Mesh) {
        let (min, max) = mesh.bounds().unwrap_or((Vec3::ZERO, Vec3::ZERO));
        self.shape = Some(CollisionShape {
            triangles: mesh.triangles().collect(),
            min,
            max,
            revision: mesh.revision(),
        });
        self.assignments += 1;
        tracing::trace!(
            mesh = mesh.name(),
            revision = mesh.revision(),
            "collision shape assigned"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archscape_mesh::{GridTerrainBuilder, TerrainParams};

    fn terrain() -> Mesh {
        GridTerrainBuilder::new(TerrainParams {
            width_segments: 4,
            length_segments: 4,
            world_width: 4.0,
            world_length: 4.0,
        })
        .build()
        .unwrap()
    }

    #[test]
    fn assigned_collider_hits_surface() {
        let collider = MeshCollider::from_mesh(&terrain());
        assert!(collider.is_assigned());
        assert_eq!(collider.triangle_count(), 32);
        let t = collider
            .raycast_local(Vec3::new(1.3, 2.0, 2.7), Vec3::NEG_Y, 10.0)
            .unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn respects_max_distance() {
        let collider = MeshCollider::from_mesh(&terrain());
        assert!(
            collider
                .raycast_local(Vec3::new(1.2, 2.0, 0.9), Vec3::NEG_Y, 1.5)
                .is_none()
        );
    }

    #[test]
    fn cleared_collider_never_hits() {
        let mut collider = MeshCollider::from_mesh(&terrain());
        collider.clear();
        assert!(!collider.is_assigned());
        assert!(
            collider
                .raycast_local(Vec3::new(1.2, 2.0, 0.9), Vec3::NEG_Y, 10.0)
                .is_none()
        );
    }

    #[test]
    fn snapshot_goes_stale_until_reassigned() {
        let mut mesh = terrain();
        let mut collider = MeshCollider::from_mesh(&mesh);

        let raised: Vec<Vec3> = mesh.vertices().iter().map(|v| *v + Vec3::Y).collect();
        mesh.replace_vertices(raised).unwrap();
        assert!(collider.is_stale(&mesh));

        // Still answers with the old surface at y = 0.
        let t = collider
            .raycast_local(Vec3::new(2.3, 5.0, 1.6), Vec3::NEG_Y, 10.0)
            .unwrap();
        assert!((t - 5.0).abs() < 1e-5);

        collider.clear();
        collider.assign(&mesh);
        assert!(!collider.is_stale(&mesh));
        assert_eq!(collider.assignments(), 2);
        let t = collider
            .raycast_local(Vec3::new(2.3, 5.0, 1.6), Vec3::NEG_Y, 10.0)
            .unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }
}
