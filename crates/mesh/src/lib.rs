//! Procedural mesh construction.
//!
//! # Invariants
//! - `uvs`, `normals` and `vertices` always have the same length.
//! - Every index is in range and the index count is a multiple of 3.
//! - Normals are derived from triangle geometry, never authored.
//! - Builders validate their parameters before allocating any buffer.

mod arch;
mod error;
mod mesh;
mod sink;
mod terrain;

pub use arch::{ArchBuilder, ArchParams};
pub use error::{MAX_BUFFER_LEN, MeshError};
pub use mesh::{Mesh, MeshVertex};
pub use sink::CollisionShapeSink;
pub use terrain::{GridTerrainBuilder, TerrainParams};

pub fn crate_info() -> &'static str {
    "archscape-mesh v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("mesh"));
    }
}
