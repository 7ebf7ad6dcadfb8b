//! Access to the triangles of a mesh stored in raw vertex and index buffers.
//!
//! The BVH builder never looks at the binary layout of a mesh directly. It goes through the
//! [`MeshAccessor`] trait which yields, for each index, the vertex it references and, for each
//! vertex, its position and texture coordinates. Two implementations are provided:
//!
//! - [`MeshBufferAccessor`] reads interleaved vertex buffers and 16 or 32-bit index buffers,
//!   either described by a [`Mesh`] or given directly as a [`RawGeometry`].
//! - [`IndexedPositions`] reads already-decoded positions, texture coordinates and triangle
//!   indices, e.g., from procedurally generated geometry.
//!
//! All the byte-level conversions are confined to the [`decode`] module.

pub use self::buffer_accessor::{MeshBufferAccessor, RawGeometry};
pub use self::decode::IndexFormat;
pub use self::indexed_positions::IndexedPositions;
pub use self::mesh::{
    ComponentType, DrawMode, IndexBuffer, Mesh, MeshSubset, VertexBuffer, VertexBufferEntry,
};
pub use self::mesh_accessor::MeshAccessor;
pub use self::mesh_data_error::MeshDataError;

mod buffer_accessor;
pub mod decode;
mod indexed_positions;
mod mesh;
mod mesh_accessor;
mod mesh_data_error;
