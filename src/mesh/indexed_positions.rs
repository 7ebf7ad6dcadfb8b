use crate::math::{Point, Real, TexCoord};
use crate::mesh::{MeshAccessor, MeshDataError};

/// A [`MeshAccessor`] over already decoded vertex positions.
///
/// This is the simplest way to build a BVH for geometry generated on the CPU, without going
/// through byte buffers. It has no subsets and is always drawn as a triangle list.
///
/// Meshes are addressed with `u32` indices: there can be at most `u32::MAX` positions, and at
/// most `u32::MAX / 3` triangles.
#[derive(Copy, Clone, Debug)]
pub struct IndexedPositions<'a> {
    positions: &'a [Point<Real>],
    tex_coords: Option<&'a [TexCoord]>,
    indices: Option<&'a [[u32; 3]]>,
}

impl<'a> IndexedPositions<'a> {
    /// Triangles given by three consecutive positions each.
    pub fn new(positions: &'a [Point<Real>]) -> Self {
        debug_assert!(
            positions.len() <= u32::MAX as usize,
            "too many vertices: {}",
            positions.len()
        );
        Self {
            positions,
            tex_coords: None,
            indices: None,
        }
    }

    /// Triangles given by triplets of indices into `positions`.
    pub fn with_indices(positions: &'a [Point<Real>], indices: &'a [[u32; 3]]) -> Self {
        debug_assert!(
            indices.len() <= u32::MAX as usize / 3,
            "too many triangles: {}",
            indices.len()
        );
        Self {
            indices: Some(indices),
            ..Self::new(positions)
        }
    }

    /// Attaches per-vertex texture coordinates.
    ///
    /// Fails if `tex_coords` and the positions have different lengths.
    pub fn tex_coords(mut self, tex_coords: &'a [TexCoord]) -> Result<Self, MeshDataError> {
        if tex_coords.len() != self.positions.len() {
            return Err(MeshDataError::TexCoordCountMismatch {
                positions: self.positions.len(),
                tex_coords: tex_coords.len(),
            });
        }

        self.tex_coords = Some(tex_coords);
        Ok(self)
    }

    /// The vertex positions.
    #[inline]
    pub fn positions(&self) -> &'a [Point<Real>] {
        self.positions
    }

    /// The triangles, if they are indexed.
    #[inline]
    pub fn indices(&self) -> Option<&'a [[u32; 3]]> {
        self.indices
    }
}

impl MeshAccessor for IndexedPositions<'_> {
    #[inline]
    fn index_count(&self) -> u32 {
        match self.indices {
            Some(indices) => indices.len() as u32 * 3,
            None => self.positions.len() as u32,
        }
    }

    #[inline]
    fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    #[inline]
    fn vertex_index(&self, i: u32) -> u32 {
        match self.indices {
            Some(indices) => indices[i as usize / 3][i as usize % 3],
            None => i,
        }
    }

    #[inline]
    fn position(&self, vertex: u32) -> Point<Real> {
        self.positions[vertex as usize]
    }

    #[inline]
    fn has_tex_coords(&self) -> bool {
        self.tex_coords.is_some()
    }

    #[inline]
    fn tex_coord(&self, vertex: u32) -> TexCoord {
        self.tex_coords
            .map(|uvs| uvs[vertex as usize])
            .unwrap_or_else(TexCoord::origin)
    }
}
