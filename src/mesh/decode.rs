//! Conversions from raw buffer bytes to typed values.
//!
//! This is the only place where vertex and index bytes are reinterpreted. Values are read
//! unaligned, in native byte order, exactly as a GPU would consume the same buffers.
//!
//! Reading past the end of a buffer is a contract violation of the mesh data provider: it
//! panics instead of returning garbage.

use crate::math::{Real, TexCoord, Vector};
use crate::mesh::{ComponentType, MeshDataError};

/// The integer width of the indices of an index buffer.
///
/// Signed index types are read as unsigned ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// 16-bits indices.
    U16,
    /// 32-bits indices.
    U32,
}

impl IndexFormat {
    /// The size, in bytes, of one index.
    #[inline]
    pub fn size_in_bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// The number of indices stored in `data`.
    #[inline]
    pub fn index_count(self, data: &[u8]) -> Result<u32, MeshDataError> {
        element_count(data.len() / self.size_in_bytes())
    }

    /// Reads the `i`-th index of `data`.
    #[inline]
    pub fn read(self, data: &[u8], i: u32) -> u32 {
        let start = i as usize * self.size_in_bytes();
        debug_assert!(
            start + self.size_in_bytes() <= data.len(),
            "index {} is past the end of the index buffer ({} bytes)",
            i,
            data.len()
        );

        match self {
            Self::U16 => bytemuck::pod_read_unaligned::<u16>(&data[start..start + 2]) as u32,
            Self::U32 => bytemuck::pod_read_unaligned::<u32>(&data[start..start + 4]),
        }
    }
}

impl TryFrom<ComponentType> for IndexFormat {
    type Error = MeshDataError;

    fn try_from(component_type: ComponentType) -> Result<Self, Self::Error> {
        match component_type {
            ComponentType::UnsignedInt16 | ComponentType::Int16 => Ok(Self::U16),
            ComponentType::UnsignedInt32 | ComponentType::Int32 => Ok(Self::U32),
            other => Err(MeshDataError::UnsupportedIndexComponentType(other)),
        }
    }
}

/// Converts a number of vertices or indices to the `u32` used to address them.
#[inline]
pub fn element_count(len: usize) -> Result<u32, MeshDataError> {
    u32::try_from(len).map_err(|_| MeshDataError::TooManyElements { len })
}

/// Reads three packed floats starting at `byte_offset`.
#[inline]
pub fn read_vector(data: &[u8], byte_offset: usize) -> Vector<Real> {
    let [x, y, z]: [f32; 3] = bytemuck::pod_read_unaligned(attribute_bytes(data, byte_offset, 3));
    Vector::new(x, y, z)
}

/// Reads two packed floats starting at `byte_offset`.
#[inline]
pub fn read_tex_coord(data: &[u8], byte_offset: usize) -> TexCoord {
    let [u, v]: [f32; 2] = bytemuck::pod_read_unaligned(attribute_bytes(data, byte_offset, 2));
    TexCoord::new(u, v)
}

#[inline]
fn attribute_bytes(data: &[u8], byte_offset: usize, num_floats: usize) -> &[u8] {
    let end = byte_offset + num_floats * core::mem::size_of::<f32>();
    debug_assert!(
        end <= data.len(),
        "vertex attribute at byte {} is past the end of the vertex buffer ({} bytes)",
        byte_offset,
        data.len()
    );
    &data[byte_offset..end]
}
