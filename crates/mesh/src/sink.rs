use crate::mesh::Mesh;

/// Collision-side consumer of a mesh.
///
/// Implementations may cache acceleration data keyed on the mesh they were
/// given; after any vertex change the owner must `clear` and then `assign`.
pub trait CollisionShapeSink {
    fn clear(&mut self);
    fn assign(&mut self, mesh: &Mesh);
}
