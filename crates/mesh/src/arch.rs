use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, buffer_len};
use crate::mesh::Mesh;

/// Arch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchParams {
    /// Angular steps across the half ring.
    pub segments: u32,
    /// Radius of the outer surface.
    pub inner_radius: f32,
    /// Radial thickness; also the depth of the arch along Z.
    pub thickness: f32,
    /// Vertical offset of the ring centre.
    pub height: f32,
}

impl Default for ArchParams {
    fn default() -> Self {
        Self {
            segments: 32,
            inner_radius: 2.0,
            thickness: 0.5,
            height: 3.0,
        }
    }
}

/// Builds a half-ring solid swept from angle 0 to PI in the XY plane.
///
/// Each step emits four vertices in the order outer-front, outer-back,
/// inner-front, inner-back. Front sits at `z = +thickness / 2`.
#[derive(Debug, Clone, Default)]
pub struct ArchBuilder {
    params: ArchParams,
}

const OUTER_FRONT: u32 = 0;
const OUTER_BACK: u32 = 1;
const INNER_FRONT: u32 = 2;
const INNER_BACK: u32 = 3;
const STRIDE: u32 = 4;

impl ArchBuilder {
    pub fn new(params: ArchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ArchParams {
        &self.params
    }

    /// Check the parameters and return the vertex and index buffer lengths.
    fn validate(&self) -> Result<(usize, usize), MeshError> {
        let p = &self.params;
        if p.segments == 0 {
            return Err(MeshError::invalid("segments", "must be at least 1"));
        }
        if !(p.inner_radius.is_finite() && p.inner_radius > 0.0) {
            return Err(MeshError::invalid(
                "inner_radius",
                format!("must be finite and positive, got {}", p.inner_radius),
            ));
        }
        if !(p.thickness.is_finite() && p.thickness > 0.0) {
            return Err(MeshError::invalid(
                "thickness",
                format!("must be finite and positive, got {}", p.thickness),
            ));
        }
        if p.thickness >= p.inner_radius {
            return Err(MeshError::invalid(
                "thickness",
                format!(
                    "must be smaller than inner_radius ({} >= {})",
                    p.thickness, p.inner_radius
                ),
            ));
        }
        if !p.height.is_finite() {
            return Err(MeshError::invalid("height", "must be finite"));
        }
        let segments = u64::from(p.segments);
        let vertices = buffer_len("segments", "vertices", u64::from(STRIDE) * (segments + 1))?;
        let indices = buffer_len("segments", "indices", segments * 8 * 3)?;
        Ok((vertices, indices))
    }

    pub fn build(&self) -> Result<Mesh, MeshError> {
        let (vertex_count, index_count) = self.validate()?;
        let p = &self.params;
        let outer = p.inner_radius;
        let inner = p.inner_radius - p.thickness;
        let half_depth = p.thickness / 2.0;
        let step = PI / p.segments as f32;

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for i in 0..=p.segments {
            let (sin, cos) = (i as f32 * step).sin_cos();
            let at = |r: f32, z: f32| Vec3::new(cos * r, sin * r + p.height, z);
            vertices.extend_from_slice(&[
                at(outer, half_depth),
                at(outer, -half_depth),
                at(inner, half_depth),
                at(inner, -half_depth),
            ]);

            let u = i as f32 / p.segments as f32;
            uvs.extend_from_slice(&[
                Vec2::new(u, 0.0),
                Vec2::new(u, 1.0),
                Vec2::new(u, 0.0),
                Vec2::new(u, 1.0),
            ]);
        }

        let mut indices = Vec::with_capacity(index_count);
        for i in 0..p.segments {
            let cur = |k: u32| i * STRIDE + k;
            let next = |k: u32| (i + 1) * STRIDE + k;

            // Front face, +Z.
            indices.extend_from_slice(&[cur(OUTER_FRONT), next(OUTER_FRONT), cur(INNER_FRONT)]);
            indices.extend_from_slice(&[cur(INNER_FRONT), next(OUTER_FRONT), next(INNER_FRONT)]);
            // Back face, -Z.
            indices.extend_from_slice(&[cur(OUTER_BACK), cur(INNER_BACK), next(OUTER_BACK)]);
            indices.extend_from_slice(&[cur(INNER_BACK), next(INNER_BACK), next(OUTER_BACK)]);
            // Outer curved side, away from the ring centre.
            indices.extend_from_slice(&[cur(OUTER_FRONT), cur(OUTER_BACK), next(OUTER_FRONT)]);
            indices.extend_from_slice(&[next(OUTER_FRONT), cur(OUTER_BACK), next(OUTER_BACK)]);
            // Inner curved side, toward the ring centre.
            indices.extend_from_slice(&[cur(INNER_FRONT), next(INNER_FRONT), cur(INNER_BACK)]);
            indices.extend_from_slice(&[next(INNER_FRONT), next(INNER_BACK), cur(INNER_BACK)]);
        }

        tracing::debug!(
            segments = p.segments,
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "built arch"
        );
        Mesh::from_buffers("Arch", vertices, uvs, indices)
    }
}
