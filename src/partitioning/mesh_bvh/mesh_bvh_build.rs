use super::{MeshBvh, MeshBvhNode, MeshBvhTriangle};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Real, TexCoord, DIM};
use crate::mesh::{DrawMode, Mesh, MeshAccessor, MeshBufferAccessor, MeshDataError, RawGeometry};
use alloc::vec::Vec;

/// Nodes covering fewer triangles than this are not split any further.
pub const MAX_LEAF_TRIANGLES: u32 = 10;
/// Nodes at this depth are not split any further.
pub const MAX_TREE_DEPTH: u32 = 40;

/// Parameters controlling when the builder stops splitting nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshBvhBuildOptions {
    /// A node covering strictly fewer triangles than this becomes a leaf.
    pub max_leaf_triangles: u32,
    /// A node at this depth (or deeper) becomes a leaf. Roots have a depth of zero.
    pub max_tree_depth: u32,
}

impl Default for MeshBvhBuildOptions {
    fn default() -> Self {
        Self {
            max_leaf_triangles: MAX_LEAF_TRIANGLES,
            max_tree_depth: MAX_TREE_DEPTH,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) struct Split {
    pub axis: usize,
    pub pos: Real,
}

/// Builds a [`MeshBvh`] over the triangles of a mesh.
///
/// Nodes are split along the longest axis of their AABB, at the mean of the centers of their
/// triangles’ AABBs. Construction is deterministic: building the same mesh twice yields the
/// same trees.
#[derive(Clone, Debug)]
pub struct MeshBvhBuilder<A> {
    accessor: A,
    options: MeshBvhBuildOptions,
}

impl<'a> MeshBvhBuilder<MeshBufferAccessor<'a>> {
    /// Prepares the construction of one tree per subset of `mesh`.
    pub fn from_mesh(mesh: &'a Mesh) -> Result<Self, MeshDataError> {
        MeshBufferAccessor::from_mesh(mesh).map(Self::new)
    }

    /// Prepares the construction of a single tree over raw geometry buffers.
    pub fn from_raw_buffers(geometry: RawGeometry<'a>) -> Result<Self, MeshDataError> {
        MeshBufferAccessor::from_raw(geometry).map(Self::new)
    }
}

impl<A: MeshAccessor> MeshBvhBuilder<A> {
    /// Prepares the construction of a BVH over the triangles given by `accessor`.
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            options: MeshBvhBuildOptions::default(),
        }
    }

    /// Replaces the default build options.
    #[must_use]
    pub fn with_options(mut self, options: MeshBvhBuildOptions) -> Self {
        self.options = options;
        self
    }

    /// The mesh this builder reads from.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// The options used to build the trees.
    pub fn options(&self) -> &MeshBvhBuildOptions {
        &self.options
    }

    /// Builds one tree per subset of the mesh, or a single tree over all its triangles if it has
    /// no subsets (or an empty list of subsets).
    ///
    /// Returns `None` if the mesh isn’t drawn as a triangle list.
    ///
    /// # Panics
    ///
    /// If an index references a vertex past the end of the vertex buffer, or if a subset extends
    /// past the end of the index buffer. See [`MeshAccessor::validate_indices`].
    pub fn build_tree(&self) -> Option<MeshBvh> {
        let draw_mode = self.accessor.draw_mode();
        if draw_mode != DrawMode::Triangles {
            log::debug!("Not building a BVH for a mesh drawn as {:?}.", draw_mode);
            return None;
        }

        // Bounds are computed once for the whole mesh, then shared by all the subsets.
        let triangles = self.calculate_triangle_bounds(0, self.accessor.index_count());
        let mut bvh = MeshBvh {
            nodes: Vec::new(),
            roots: Vec::new(),
            triangles,
            has_tex_coords: self.accessor.has_tex_coords(),
        };

        match self.accessor.subsets().filter(|subsets| !subsets.is_empty()) {
            Some(subsets) => {
                for (subset_id, subset) in subsets.iter().enumerate() {
                    let root = bvh.build_root(
                        subset.triangle_offset(),
                        subset.triangle_count(),
                        &self.options,
                    );
                    log::trace!(
                        "Built BVH root {} for subset {} ({} triangles, depth {}).",
                        root,
                        subset_id,
                        subset.triangle_count(),
                        bvh.depth(root)
                    );
                }
            }
            None => {
                let triangle_count = bvh.triangles.len() as u32;
                let root = bvh.build_root(0, triangle_count, &self.options);
                log::trace!(
                    "Built BVH root {} ({} triangles, depth {}).",
                    root,
                    triangle_count,
                    bvh.depth(root)
                );
            }
        }

        Some(bvh)
    }

    /// Reads the `index_count / 3` triangles starting at the index `index_offset`, in order, and
    /// computes their bounds.
    pub fn calculate_triangle_bounds(
        &self,
        index_offset: u32,
        index_count: u32,
    ) -> Vec<MeshBvhTriangle> {
        let has_tex_coords = self.accessor.has_tex_coords();

        (0..index_count / 3)
            .map(|i| {
                let first_index = i * 3 + index_offset;
                let ids = self.accessor.triangle_vertices(first_index);
                let vertices = ids.map(|id| self.accessor.position(id));
                let tex_coords = if has_tex_coords {
                    ids.map(|id| self.accessor.tex_coord(id))
                } else {
                    [TexCoord::origin(); 3]
                };

                MeshBvhTriangle::new(first_index / 3, vertices, tex_coords)
            })
            .collect()
    }
}

impl MeshBvh {
    fn push_node(&mut self, offset: u32, count: u32) -> u32 {
        let id = self.nodes.len() as u32;
        let bounds = self.bounds(offset, count);
        self.nodes.push(MeshBvhNode::new(bounds, offset, count));
        id
    }

    pub(super) fn build_root(
        &mut self,
        offset: u32,
        count: u32,
        options: &MeshBvhBuildOptions,
    ) -> u32 {
        let root = self.push_node(offset, count);
        self.roots.push(root);
        self.split_node(root, 0, options);
        root
    }

    /// Recursively splits the node `node_id`.
    ///
    /// The node is left as a leaf if it is small enough, deep enough, if its bounds are unusable,
    /// or if all its triangles end up on the same side of the split.
    fn split_node(&mut self, node_id: u32, depth: u32, options: &MeshBvhBuildOptions) {
        let node = self.nodes[node_id as usize];
        let (offset, count) = (node.offset, node.count);

        if count < options.max_leaf_triangles || depth >= options.max_tree_depth {
            return;
        }

        let Some(split) = self.optimal_split(&node.bounds, offset, count) else {
            log::debug!(
                "Degenerate BVH node bounds {:?}: keeping {} triangles in a single leaf.",
                node.bounds,
                count
            );
            return;
        };

        // Reorders the triangles so that the ones left of the split come first.
        let split_offset = self.partition(offset, count, split);

        if split_offset == offset || split_offset == offset + count {
            return;
        }

        let left_count = split_offset - offset;
        let left = self.push_node(offset, left_count);
        self.split_node(left, depth + 1, options);

        let right = self.push_node(split_offset, count - left_count);
        self.split_node(right, depth + 1, options);

        self.nodes[node_id as usize].children = Some([left, right]);
    }

    /// The union of the bounds of the `count` triangles starting at `offset`.
    pub(super) fn bounds(&self, offset: u32, count: u32) -> Aabb {
        let range = offset as usize..(offset + count) as usize;
        self.triangles[range]
            .iter()
            .fold(Aabb::new_invalid(), |acc, tri| acc.merged(&tri.bounds))
    }

    pub(super) fn optimal_split(&self, bounds: &Aabb, offset: u32, count: u32) -> Option<Split> {
        let axis = longest_axis(bounds)?;
        let pos = self.average_center(offset, count, axis);
        Some(Split { axis, pos })
    }

    /// The mean of the centers of the triangles’ bounds along `axis`.
    fn average_center(&self, offset: u32, count: u32, axis: usize) -> Real {
        debug_assert!(count != 0);
        let range = offset as usize..(offset + count) as usize;
        let sum = self.triangles[range]
            .iter()
            .fold(0.0, |acc, tri| acc + tri.bounds.center_along(axis));
        sum / count as Real
    }

    /// Hoare partition of the `count` triangles starting at `offset`.
    ///
    /// Returns the index of the first triangle with a center at or after `split.pos`.
    pub(super) fn partition(&mut self, offset: u32, count: u32, split: Split) -> u32 {
        let center = |tri: &MeshBvhTriangle| tri.bounds.center_along(split.axis);
        let mut left = offset as i64;
        let mut right = (offset + count) as i64 - 1;

        loop {
            while left <= right && center(&self.triangles[left as usize]) < split.pos {
                left += 1;
            }

            while left <= right && center(&self.triangles[right as usize]) >= split.pos {
                right -= 1;
            }

            if left < right {
                self.triangles.swap(left as usize, right as usize);
                left += 1;
                right -= 1;
            } else {
                return left as u32;
            }
        }
    }
}

/// The axis along which `bounds` is the widest.
///
/// Ties are broken in favor of X, then Y. Returns `None` if `bounds` is empty, non-finite, or
/// reduced to a point.
pub(super) fn longest_axis(bounds: &Aabb) -> Option<usize> {
    if !bounds.is_finite() || bounds.is_empty() {
        return None;
    }

    let delta = bounds.extents();
    let mut axis = None;
    let mut largest = Real::MIN_POSITIVE;

    for i in 0..DIM {
        if delta[i] > largest {
            axis = Some(i);
            largest = delta[i];
        }
    }

    axis
}
