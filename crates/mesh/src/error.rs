/// Errors from mesh construction and buffer replacement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("vertex count mismatch: expected {expected}, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
    #[error("uv count {uvs} does not match vertex count {vertices}")]
    UvCountMismatch { vertices: usize, uvs: usize },
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

impl MeshError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Largest vertex or index buffer a builder will allocate. Vertex ids are
/// stored as `u32`, so neither buffer may outgrow that range.
pub const MAX_BUFFER_LEN: u64 = u32::MAX as u64;

/// Check a buffer length computed in `u64` before anything is allocated.
pub(crate) fn buffer_len(name: &'static str, what: &str, len: u64) -> Result<usize, MeshError> {
    if len > MAX_BUFFER_LEN {
        return Err(MeshError::invalid(
            name,
            format!("needs {len} {what}, more than the limit of {MAX_BUFFER_LEN}"),
        ));
    }
    usize::try_from(len)
        .map_err(|_| MeshError::invalid(name, format!("{len} {what} do not fit in memory")))
}
