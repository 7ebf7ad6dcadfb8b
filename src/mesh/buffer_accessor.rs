use crate::math::{Point, Real, TexCoord};
use crate::mesh::decode::{self, IndexFormat};
use crate::mesh::{ComponentType, DrawMode, Mesh, MeshAccessor, MeshDataError, MeshSubset};

const POSITION_SIZE: u32 = 3 * core::mem::size_of::<f32>() as u32;
const TEX_COORD_SIZE: u32 = 2 * core::mem::size_of::<f32>() as u32;

/// Raw buffers of a geometry lacking full mesh metadata, e.g., geometry generated at runtime.
///
/// Geometry given this way is always drawn as a triangle list and has no subsets.
#[derive(Copy, Clone, Debug)]
pub struct RawGeometry<'a> {
    /// The interleaved vertex bytes.
    pub vertex_data: &'a [u8],
    /// The number of bytes between the starts of two consecutive vertices.
    pub stride: u32,
    /// Offset, in bytes, of the position (three `f32`) within a vertex.
    pub position_offset: u32,
    /// Offset, in bytes, of the texture coordinates (two `f32`) within a vertex, if any.
    pub uv_offset: Option<u32>,
    /// The index bytes and their component type, if the geometry is indexed.
    pub indices: Option<(&'a [u8], ComponentType)>,
}

/// A [`MeshAccessor`] reading interleaved vertex buffers and 16 or 32-bit index buffers.
#[derive(Copy, Clone, Debug)]
pub struct MeshBufferAccessor<'a> {
    draw_mode: DrawMode,
    vertex_data: &'a [u8],
    stride: u32,
    vertex_count: u32,
    index_count: u32,
    position_offset: Option<u32>,
    uv_offset: Option<u32>,
    indices: Option<(&'a [u8], IndexFormat)>,
    subsets: Option<&'a [MeshSubset]>,
}

impl<'a> MeshBufferAccessor<'a> {
    /// Creates an accessor for the buffers of `mesh`.
    ///
    /// Vertex attributes are located by name. Texture coordinates are read from
    /// [`Mesh::UV0_ATTR_NAME`], or from [`Mesh::UV1_ATTR_NAME`] if the former is missing. A mesh
    /// without [`Mesh::POSITION_ATTR_NAME`] attribute is accepted: all its vertices are then at
    /// the origin.
    ///
    /// A mesh with an empty subset list is handled as a single subset covering all its
    /// triangles.
    pub fn from_mesh(mesh: &'a Mesh) -> Result<Self, MeshDataError> {
        let stride = mesh.vertex_buffer.stride;
        if stride == 0 {
            return Err(MeshDataError::ZeroStride);
        }

        let position_offset = mesh
            .vertex_entry(Mesh::POSITION_ATTR_NAME)
            .map(|e| check_attribute(Mesh::POSITION_ATTR_NAME, e.offset, POSITION_SIZE, stride))
            .transpose()?;
        let uv_offset = mesh
            .vertex_entry(Mesh::UV0_ATTR_NAME)
            .map(|e| (Mesh::UV0_ATTR_NAME, e))
            .or_else(|| {
                mesh.vertex_entry(Mesh::UV1_ATTR_NAME)
                    .map(|e| (Mesh::UV1_ATTR_NAME, e))
            })
            .map(|(name, e)| check_attribute(name, e.offset, TEX_COORD_SIZE, stride))
            .transpose()?;
        let indices = mesh
            .index_buffer
            .as_ref()
            .map(|ib| check_indices(&ib.data, ib.component_type))
            .transpose()?;
        let (vertex_count, index_count) =
            element_counts(&mesh.vertex_buffer.data, stride, indices)?;

        Ok(Self {
            draw_mode: mesh.draw_mode,
            vertex_data: &mesh.vertex_buffer.data,
            stride,
            vertex_count,
            index_count,
            position_offset,
            uv_offset,
            indices,
            subsets: (!mesh.subsets.is_empty()).then_some(&mesh.subsets[..]),
        })
    }

    /// Creates an accessor for raw geometry buffers.
    pub fn from_raw(geometry: RawGeometry<'a>) -> Result<Self, MeshDataError> {
        let stride = geometry.stride;
        if stride == 0 {
            return Err(MeshDataError::ZeroStride);
        }

        let position_offset = check_attribute(
            Mesh::POSITION_ATTR_NAME,
            geometry.position_offset,
            POSITION_SIZE,
            stride,
        )?;
        let uv_offset = geometry
            .uv_offset
            .map(|offset| check_attribute(Mesh::UV0_ATTR_NAME, offset, TEX_COORD_SIZE, stride))
            .transpose()?;
        let indices = geometry
            .indices
            .map(|(data, component_type)| check_indices(data, component_type))
            .transpose()?;
        let (vertex_count, index_count) =
            element_counts(geometry.vertex_data, stride, indices)?;

        Ok(Self {
            draw_mode: DrawMode::Triangles,
            vertex_data: geometry.vertex_data,
            stride,
            vertex_count,
            index_count,
            position_offset: Some(position_offset),
            uv_offset,
            indices,
            subsets: None,
        })
    }

    /// The index format, if this mesh is indexed.
    pub fn index_format(&self) -> Option<IndexFormat> {
        self.indices.map(|(_, format)| format)
    }

    #[inline]
    fn vertex_byte_offset(&self, vertex: u32, attribute_offset: u32) -> usize {
        vertex as usize * self.stride as usize + attribute_offset as usize
    }
}

fn check_attribute(
    name: &'static str,
    offset: u32,
    size: u32,
    stride: u32,
) -> Result<u32, MeshDataError> {
    if offset.checked_add(size).map_or(true, |end| end > stride) {
        Err(MeshDataError::AttributeOutOfStride {
            name,
            offset,
            size,
            stride,
        })
    } else {
        Ok(offset)
    }
}

fn check_indices(
    data: &[u8],
    component_type: ComponentType,
) -> Result<(&[u8], IndexFormat), MeshDataError> {
    let format = IndexFormat::try_from(component_type)?;
    if data.len() % format.size_in_bytes() != 0 {
        return Err(MeshDataError::MisalignedIndexBuffer {
            len: data.len(),
            component_size: format.size_in_bytes(),
        });
    }

    Ok((data, format))
}

// Non-indexed meshes have one index per vertex.
fn element_counts(
    vertex_data: &[u8],
    stride: u32,
    indices: Option<(&[u8], IndexFormat)>,
) -> Result<(u32, u32), MeshDataError> {
    let vertex_count = decode::element_count(vertex_data.len() / stride as usize)?;
    let index_count = match indices {
        Some((data, format)) => format.index_count(data)?,
        None => vertex_count,
    };
    Ok((vertex_count, index_count))
}

impl MeshAccessor for MeshBufferAccessor<'_> {
    #[inline]
    fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    #[inline]
    fn subsets(&self) -> Option<&[MeshSubset]> {
        self.subsets
    }

    #[inline]
    fn index_count(&self) -> u32 {
        self.index_count
    }

    #[inline]
    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    fn vertex_index(&self, i: u32) -> u32 {
        match self.indices {
            Some((data, format)) => format.read(data, i),
            None => i,
        }
    }

    #[inline]
    fn position(&self, vertex: u32) -> Point<Real> {
        match self.position_offset {
            Some(offset) => decode::read_vector(
                self.vertex_data,
                self.vertex_byte_offset(vertex, offset),
            )
            .into(),
            None => Point::origin(),
        }
    }

    #[inline]
    fn has_tex_coords(&self) -> bool {
        self.uv_offset.is_some()
    }

    #[inline]
    fn tex_coord(&self, vertex: u32) -> TexCoord {
        match self.uv_offset {
            Some(offset) => decode::read_tex_coord(
                self.vertex_data,
                self.vertex_byte_offset(vertex, offset),
            ),
            None => TexCoord::origin(),
        }
    }
}
