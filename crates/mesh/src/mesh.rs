use glam::{Vec2, Vec3};

use crate::error::MeshError;

/// Interleaved vertex record handed to a GPU-style mesh sink.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex, index, uv and normal buffers owned by exactly one scene object.
///
/// Triangles are stored as a flat index list, three indices per triangle,
/// wound counter-clockwise when viewed from the side the normal faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    /// Bumped on every vertex replacement so derived shapes can detect staleness.
    revision: u64,
}

impl Mesh {
    /// Assemble a mesh from authored buffers and derive its normals.
    pub fn from_buffers(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        if uvs.len() != vertices.len() {
            return Err(MeshError::UvCountMismatch {
                vertices: vertices.len(),
                uvs: uvs.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let mut mesh = Self {
            name: name.into(),
            normals: vec![Vec3::ZERO; vertices.len()],
            vertices,
            indices,
            uvs,
            revision: 0,
        };
        mesh.recompute_normals();
        Ok(mesh)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// Axis-aligned bounds of the vertex buffer, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }

    /// Swap in a new vertex buffer with the same length and topology.
    ///
    /// Normals are left untouched; call [`Mesh::recompute_normals`] afterwards.
    pub fn replace_vertices(&mut self, vertices: Vec<Vec3>) -> Result<(), MeshError> {
        if vertices.len() != self.vertices.len() {
            return Err(MeshError::VertexCountMismatch {
                expected: self.vertices.len(),
                actual: vertices.len(),
            });
        }
        self.vertices = vertices;
        self.revision += 1;
        Ok(())
    }

    /// Recompute smooth per-vertex normals from the current triangles.
    ///
    /// Each face adds its unnormalized cross product (area weighted) to its
    /// three corners. Vertices touched only by degenerate faces get `+Y`.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.vertices[b] - self.vertices[a]).cross(self.vertices[c] - self.vertices[a]);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        self.normals = accum
            .into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO { Vec3::Y } else { n }
            })
            .collect();
    }

    /// Pack positions, normals and uvs into interleaved records.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// Raw bytes of the interleaved vertex buffer.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_buffers(
            "quad",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE],
            vec![0, 2, 1, 1, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn normals_derived_on_construction() {
        let mesh = quad();
        assert_eq!(mesh.normals().len(), 4);
        for n in mesh.normals() {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::from_buffers("bad", vec![Vec3::ZERO; 2], vec![Vec2::ZERO; 2], vec![0, 1, 2])
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = Mesh::from_buffers("bad", vec![Vec3::ZERO; 3], vec![Vec2::ZERO; 3], vec![0, 1])
            .unwrap_err();
        assert_eq!(err, MeshError::IncompleteTriangle(2));
    }

    #[test]
    fn rejects_uv_mismatch() {
        let err =
            Mesh::from_buffers("bad", vec![Vec3::ZERO; 3], vec![Vec2::ZERO; 2], vec![]).unwrap_err();
        assert!(matches!(err, MeshError::UvCountMismatch { .. }));
    }

    #[test]
    fn replace_vertices_bumps_revision_and_checks_length() {
        let mut mesh = quad();
        assert_eq!(mesh.revision(), 0);

        let lifted: Vec<Vec3> = mesh.vertices().iter().map(|v| *v + Vec3::Y).collect();
        mesh.replace_vertices(lifted).unwrap();
        assert_eq!(mesh.revision(), 1);
        assert_eq!(mesh.vertices()[0], Vec3::Y);

        let err = mesh.replace_vertices(vec![Vec3::ZERO]).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexCountMismatch {
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn recompute_follows_tilted_geometry() {
        let mut mesh = quad();
        // Raise the +X edge so the surface tilts toward -X.
        let tilted: Vec<Vec3> = mesh
            .vertices()
            .iter()
            .map(|v| Vec3::new(v.x, v.x, v.z))
            .collect();
        mesh.replace_vertices(tilted).unwrap();
        mesh.recompute_normals();
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for n in mesh.normals() {
            assert!((*n - expected).length() < 1e-5);
        }
    }

    #[test]
    fn isolated_vertex_gets_up_normal() {
        let mesh = Mesh::from_buffers("point", vec![Vec3::ONE], vec![Vec2::ZERO], vec![]).unwrap();
        assert_eq!(mesh.normals(), &[Vec3::Y]);
        assert_eq!(mesh.bounds(), Some((Vec3::ONE, Vec3::ONE)));
    }

    #[test]
    fn interleaved_layout() {
        let mesh = quad();
        let packed = mesh.interleaved();
        assert_eq!(packed.len(), 4);
        assert_eq!(packed[3].position, [1.0, 0.0, 1.0]);
        assert_eq!(packed[3].uv, [1.0, 1.0]);
        assert_eq!(mesh.vertex_bytes().len(), 4 * std::mem::size_of::<MeshVertex>());
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }
}
