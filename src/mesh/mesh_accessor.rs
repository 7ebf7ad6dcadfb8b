use crate::math::{Point, Real, TexCoord};
use crate::mesh::{DrawMode, MeshDataError, MeshSubset};

/// Read access to the triangles of a mesh, independently from its binary layout.
///
/// Indices are numbered from `0` to [`Self::index_count`]. The vertex referenced by the index
/// `i` is [`Self::vertex_index`]`(i)`, and three consecutive indices starting at a multiple of
/// three form a triangle.
pub trait MeshAccessor {
    /// The primitive topology of the mesh.
    ///
    /// Only [`DrawMode::Triangles`] meshes can be partitioned.
    fn draw_mode(&self) -> DrawMode {
        DrawMode::Triangles
    }

    /// The draw ranges of the mesh, in index space.
    ///
    /// Returns `None` if the mesh carries no subset information, in which case the whole mesh
    /// is handled as a single implicit subset.
    fn subsets(&self) -> Option<&[MeshSubset]> {
        None
    }

    /// The number of indices of the mesh.
    ///
    /// For non-indexed meshes, this is the number of vertices.
    fn index_count(&self) -> u32;

    /// The number of vertices of the mesh.
    fn vertex_count(&self) -> u32;

    /// The vertex referenced by the `i`-th index.
    fn vertex_index(&self, i: u32) -> u32;

    /// The position of the `vertex`-th vertex.
    ///
    /// Meshes without position attribute yield the origin.
    fn position(&self, vertex: u32) -> Point<Real>;

    /// Does this mesh have texture coordinates?
    fn has_tex_coords(&self) -> bool;

    /// The texture coordinates of the `vertex`-th vertex.
    ///
    /// Meshes without texture coordinates yield zero.
    fn tex_coord(&self, vertex: u32) -> TexCoord;

    /// The vertices of the triangle formed by the three indices starting at `first_index`.
    #[inline]
    fn triangle_vertices(&self, first_index: u32) -> [u32; 3] {
        [
            self.vertex_index(first_index),
            self.vertex_index(first_index + 1),
            self.vertex_index(first_index + 2),
        ]
    }

    /// Checks that every index references an existing vertex.
    ///
    /// Out-of-bounds indices are a contract violation which makes BVH construction panic, so
    /// mesh data coming from an untrusted source should be checked with this method first.
    fn validate_indices(&self) -> Result<(), MeshDataError> {
        let vertex_count = self.vertex_count();

        for position in 0..self.index_count() {
            let index = self.vertex_index(position);
            if index >= vertex_count {
                return Err(MeshDataError::IndexOutOfBounds {
                    position,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}

impl<T: MeshAccessor + ?Sized> MeshAccessor for &T {
    #[inline]
    fn draw_mode(&self) -> DrawMode {
        (**self).draw_mode()
    }
    #[inline]
    fn subsets(&self) -> Option<&[MeshSubset]> {
        (**self).subsets()
    }
    #[inline]
    fn index_count(&self) -> u32 {
        (**self).index_count()
    }
    #[inline]
    fn vertex_count(&self) -> u32 {
        (**self).vertex_count()
    }
    #[inline]
    fn vertex_index(&self, i: u32) -> u32 {
        (**self).vertex_index(i)
    }
    #[inline]
    fn position(&self, vertex: u32) -> Point<Real> {
        (**self).position(vertex)
    }
    #[inline]
    fn has_tex_coords(&self) -> bool {
        (**self).has_tex_coords()
    }
    #[inline]
    fn tex_coord(&self, vertex: u32) -> TexCoord {
        (**self).tex_coord(vertex)
    }
}
