use crate::mesh::ComponentType;

/// Indicates that the buffers of a mesh can’t be read as triangles.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshDataError {
    /// Index buffers must contain 16-bits or 32-bits integers.
    #[error("unsupported index component type {0:?}, expected a 16-bits or 32-bits integer.")]
    UnsupportedIndexComponentType(ComponentType),
    /// The vertex stride must not be zero.
    #[error("the vertex buffer stride must not be zero.")]
    ZeroStride,
    /// A vertex attribute doesn’t fit in a single vertex.
    #[error("the attribute {name} ({size} bytes at offset {offset}) doesn’t fit in the vertex stride {stride}.")]
    AttributeOutOfStride {
        /// The attribute name.
        name: &'static str,
        /// The attribute offset within a vertex, in bytes.
        offset: u32,
        /// The attribute size, in bytes.
        size: u32,
        /// The vertex stride, in bytes.
        stride: u32,
    },
    /// The index buffer length isn’t a multiple of the index size.
    #[error("the index buffer length {len} isn’t a multiple of the index size {component_size}.")]
    MisalignedIndexBuffer {
        /// The index buffer length, in bytes.
        len: usize,
        /// The size of one index, in bytes.
        component_size: usize,
    },
    /// A buffer holds more vertices or indices than a `u32` can address.
    #[error("{len} elements can't be addressed with 32-bits indices.")]
    TooManyElements {
        /// The number of elements of the buffer.
        len: usize,
    },
    /// There must be exactly one texture coordinate per vertex.
    #[error("got {tex_coords} texture coordinates for {positions} vertices.")]
    TexCoordCountMismatch {
        /// The number of vertex positions.
        positions: usize,
        /// The number of texture coordinates.
        tex_coords: usize,
    },
    /// An index references a vertex past the end of the vertex buffer.
    #[error("the index at position {position} references the vertex {index} but there are only {vertex_count} vertices.")]
    IndexOutOfBounds {
        /// The position of the faulty index in the index buffer.
        position: u32,
        /// The faulty index value.
        index: u32,
        /// The number of vertices in the vertex buffer.
        vertex_count: u32,
    },
}
