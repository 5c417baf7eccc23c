use archscape_common::ObjectId;
use archscape_mesh::MeshError;

use crate::material::MaterialId;

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("object {0:?} not found")]
    ObjectNotFound(ObjectId),
    #[error("material {0:?} not found")]
    MaterialNotFound(MaterialId),
    #[error("object {0:?} has no mesh")]
    MissingMesh(ObjectId),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
