use thiserror::Error;

/// Errors raised while assembling region geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate in {context} at index {index}")]
    NonFiniteVertex { context: &'static str, index: usize },

    #[error("triangle {triangle} references vertex {vertex}, but the mesh has {count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        vertex: u32,
        count: usize,
    },

    #[error("mesh would hold {count} vertices, more than a u32 index can address")]
    TooManyVertices { count: usize },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
