use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, buffer_len};
use crate::mesh::Mesh;

/// Grid terrain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Number of cells along X.
    pub width_segments: u32,
    /// Number of cells along Z.
    pub length_segments: u32,
    /// World-space extent along X.
    pub world_width: f32,
    /// World-space extent along Z.
    pub world_length: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width_segments: 10,
            length_segments: 10,
            world_width: 10.0,
            world_length: 10.0,
        }
    }
}

/// Builds a flat rectangular lattice on the XZ plane.
///
/// Vertices are emitted row by row (Z outer, X inner), so vertex
/// `z * (width_segments + 1) + x` sits at lattice point `(x, z)`.
#[derive(Debug, Clone, Default)]
pub struct GridTerrainBuilder {
    params: TerrainParams,
}

impl GridTerrainBuilder {
    pub fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Check the parameters and return the vertex and index buffer lengths.
    fn validate(&self) -> Result<(usize, usize), MeshError> {
        let p = &self.params;
        if p.width_segments == 0 {
            return Err(MeshError::invalid("width_segments", "must be at least 1"));
        }
        if p.length_segments == 0 {
            return Err(MeshError::invalid("length_segments", "must be at least 1"));
        }
        if !(p.world_width.is_finite() && p.world_width > 0.0) {
            return Err(MeshError::invalid(
                "world_width",
                format!("must be finite and positive, got {}", p.world_width),
            ));
        }
        if !(p.world_length.is_finite() && p.world_length > 0.0) {
            return Err(MeshError::invalid(
                "world_length",
                format!("must be finite and positive, got {}", p.world_length),
            ));
        }
        let (w, l) = (u64::from(p.width_segments), u64::from(p.length_segments));
        let name = "width_segments x length_segments";
        let vertices = buffer_len(name, "vertices", (w + 1) * (l + 1))?;
        let indices = buffer_len(name, "indices", w * l * 6)?;
        Ok((vertices, indices))
    }

    pub fn build(&self) -> Result<Mesh, MeshError> {
        let (vertex_count, index_count) = self.validate()?;
        let p = &self.params;
        let (w, l) = (p.width_segments, p.length_segments);
        let columns = w + 1;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for z in 0..=l {
            for x in 0..=w {
                vertices.push(Vec3::new(
                    x as f32 * p.world_width / w as f32,
                    0.0,
                    z as f32 * p.world_length / l as f32,
                ));
                uvs.push(Vec2::new(x as f32 / w as f32, z as f32 / l as f32));
            }
        }

        let mut indices = Vec::with_capacity(index_count);
        for z in 0..l {
            for x in 0..w {
                let near_left = z * columns + x;
                let near_right = near_left + 1;
                let far_left = near_left + columns;
                let far_right = far_left + 1;

                // Split along the near_right/far_left diagonal; both faces point +Y.
                indices.extend_from_slice(&[near_left, far_left, near_right]);
                indices.extend_from_slice(&[near_right, far_left, far_right]);
            }
        }

        tracing::debug!(
            width_segments = w,
            length_segments = l,
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "built grid terrain"
        );
        Mesh::from_buffers("Terrain", vertices, uvs, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(w: u32, l: u32, ww: f32, wl: f32) -> Result<Mesh, MeshError> {
        GridTerrainBuilder::new(TerrainParams {
            width_segments: w,
            length_segments: l,
            world_width: ww,
            world_length: wl,
        })
        .build()
    }

    #[test]
    fn two_by_two_scenario() {
        let mesh = build(2, 2, 2.0, 2.0).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.indices().len(), 24);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.vertices()[0], Vec3::ZERO);
        assert_eq!(mesh.vertices()[8], Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn counts_and_index_range() {
        for (w, l) in [(1, 1), (1, 7), (3, 2), (10, 10), (16, 5)] {
            let mesh = build(w, l, 4.0, 9.0).unwrap();
            assert_eq!(mesh.vertex_count(), ((w + 1) * (l + 1)) as usize);
            assert_eq!(mesh.indices().len(), (6 * w * l) as usize);
            assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
            assert_eq!(mesh.uvs().len(), mesh.vertex_count());
            assert_eq!(mesh.normals().len(), mesh.vertex_count());
        }
    }

    #[test]
    fn lattice_spans_world_extents() {
        let mesh = build(4, 2, 8.0, 3.0).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(8.0, 0.0, 3.0));
        // Vertex (x=1, z=1) is index 1 * 5 + 1.
        assert_eq!(mesh.vertices()[6], Vec3::new(2.0, 0.0, 1.5));
        assert_eq!(mesh.uvs()[6], Vec2::new(0.25, 0.5));
    }

    #[test]
    fn flat_grid_faces_up() {
        let mesh = build(3, 3, 3.0, 3.0).unwrap();
        for [a, b, c] in mesh.triangles() {
            assert!((b - a).cross(c - a).y > 0.0);
        }
        for n in mesh.normals() {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn zero_segments_rejected() {
        assert!(matches!(
            build(0, 2, 1.0, 1.0),
            Err(MeshError::InvalidParameter {
                name: "width_segments",
                ..
            })
        ));
        assert!(matches!(
            build(2, 0, 1.0, 1.0),
            Err(MeshError::InvalidParameter {
                name: "length_segments",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_extent_rejected() {
        assert!(build(2, 2, 0.0, 1.0).is_err());
        assert!(build(2, 2, 1.0, f32::NAN).is_err());
    }

    #[test]
    fn oversized_grid_rejected_before_allocating() {
        // 65537^2 vertices do not fit in u32 ids.
        assert!(matches!(
            build(65536, 65536, 1.0, 1.0),
            Err(MeshError::InvalidParameter {
                name: "width_segments x length_segments",
                ..
            })
        ));
        // Vertices fit but 30000^2 * 6 indices do not.
        let err = build(30000, 30000, 1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("indices"), "{err}");
        assert!(build(u32::MAX, u32::MAX, 1.0, 1.0).is_err());
    }

    #[test]
    fn default_params() {
        let mesh = GridTerrainBuilder::default().build().unwrap();
        assert_eq!(mesh.vertex_count(), 121);
        assert_eq!(mesh.triangle_count(), 200);
    }
}
