use alloc::string::String;
use alloc::vec::Vec;

/// The primitive topology used to draw a mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Isolated points.
    Points,
    /// Connected line segments.
    LineStrip,
    /// Connected line segments, closed.
    LineLoop,
    /// Isolated line segments.
    Lines,
    /// Connected triangles sharing an edge with their predecessor.
    TriangleStrip,
    /// Connected triangles sharing a vertex with the first one.
    TriangleFan,
    /// Isolated triangles: every three consecutive indices form a triangle.
    #[default]
    Triangles,
}

/// The scalar type of the components of a buffer attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Unsigned 8-bits integer.
    UnsignedInt8,
    /// Signed 8-bits integer.
    Int8,
    /// Unsigned 16-bits integer.
    UnsignedInt16,
    /// Signed 16-bits integer.
    Int16,
    /// Unsigned 32-bits integer.
    UnsignedInt32,
    /// Signed 32-bits integer.
    Int32,
    /// Unsigned 64-bits integer.
    UnsignedInt64,
    /// Signed 64-bits integer.
    Int64,
    /// Half-precision float.
    Float16,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
}

impl ComponentType {
    /// The size, in bytes, of one component of this type.
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::UnsignedInt8 | Self::Int8 => 1,
            Self::UnsignedInt16 | Self::Int16 | Self::Float16 => 2,
            Self::UnsignedInt32 | Self::Int32 | Self::Float32 => 4,
            Self::UnsignedInt64 | Self::Int64 | Self::Float64 => 8,
        }
    }
}

/// Description of one attribute interleaved in a [`VertexBuffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexBufferEntry {
    /// The attribute name, e.g., [`Mesh::POSITION_ATTR_NAME`].
    pub name: String,
    /// The scalar type of each component.
    pub component_type: ComponentType,
    /// The number of components of the attribute.
    pub component_count: u32,
    /// Offset, in bytes, of the attribute from the start of a vertex.
    pub offset: u32,
}

/// Interleaved vertex data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexBuffer {
    /// The number of bytes between the starts of two consecutive vertices.
    pub stride: u32,
    /// The attributes stored for each vertex.
    pub entries: Vec<VertexBufferEntry>,
    /// The raw vertex bytes.
    pub data: Vec<u8>,
}

/// Index data referencing the vertices of a [`VertexBuffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexBuffer {
    /// The integer type of each index.
    pub component_type: ComponentType,
    /// The raw index bytes.
    pub data: Vec<u8>,
}

/// A contiguous draw range of a mesh, typically associated to one material.
///
/// Both `offset` and `count` are expressed in indices (or in vertices if the mesh isn’t indexed),
/// not in triangles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshSubset {
    /// The first index of this subset.
    pub offset: u32,
    /// The number of indices in this subset.
    pub count: u32,
}

impl MeshSubset {
    /// Creates a subset covering `count` indices starting at `offset`.
    pub fn new(offset: u32, count: u32) -> Self {
        Self { offset, count }
    }

    /// The index of the first triangle covered by this subset.
    pub fn triangle_offset(&self) -> u32 {
        self.offset / 3
    }

    /// The number of triangles covered by this subset.
    pub fn triangle_count(&self) -> u32 {
        self.count / 3
    }
}

/// A mesh as loaded by an asset importer: vertex and index buffers and a list of subsets.
///
/// If `index_buffer` is `None`, the mesh is drawn in vertex-buffer order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mesh {
    /// The primitive topology of the mesh.
    pub draw_mode: DrawMode,
    /// The interleaved vertex data.
    pub vertex_buffer: VertexBuffer,
    /// The optional index data.
    pub index_buffer: Option<IndexBuffer>,
    /// The draw ranges of the mesh.
    pub subsets: Vec<MeshSubset>,
}

impl Mesh {
    /// Name of the vertex position attribute.
    pub const POSITION_ATTR_NAME: &'static str = "attr_pos";
    /// Name of the first texture coordinates attribute.
    pub const UV0_ATTR_NAME: &'static str = "attr_uv0";
    /// Name of the second texture coordinates attribute.
    pub const UV1_ATTR_NAME: &'static str = "attr_uv1";

    /// Finds the vertex buffer entry with the given name.
    pub fn vertex_entry(&self, name: &str) -> Option<&VertexBufferEntry> {
        self.vertex_buffer.entries.iter().find(|e| e.name == name)
    }
}
