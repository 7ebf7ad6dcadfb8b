use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, TexCoord};

/// A triangle of a mesh, with its vertices, texture coordinates and bounds.
///
/// The triangles of a [`MeshBvh`](crate::partitioning::MeshBvh) are reordered while the tree
/// is built. [`Self::index`] gives back the position of the triangle in the original mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshBvhTriangle {
    /// The index of this triangle in the mesh it was read from.
    pub index: u32,
    /// The positions of the three vertices.
    pub vertices: [Point<Real>; 3],
    /// The texture coordinates of the three vertices, zero if the mesh has none.
    pub tex_coords: [TexCoord; 3],
    /// The smallest AABB containing the three vertices.
    pub bounds: Aabb,
}

impl MeshBvhTriangle {
    /// Creates a triangle and computes its bounds.
    pub fn new(index: u32, vertices: [Point<Real>; 3], tex_coords: [TexCoord; 3]) -> Self {
        Self {
            index,
            vertices,
            tex_coords,
            bounds: Aabb::from_points_ref(&vertices),
        }
    }
}
