use super::MeshBvhTriangle;
use crate::bounding_volume::Aabb;
use alloc::vec::Vec;
use core::ops::Range;
use smallvec::SmallVec;

/// A node (internal or leaf) of a [`MeshBvh`].
///
/// Every node covers a contiguous range of the triangles of its tree. A leaf owns that range;
/// an internal node has exactly two children splitting its range in two non-empty parts, the
/// left one first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshBvhNode {
    pub(super) bounds: Aabb,
    pub(super) offset: u32,
    pub(super) count: u32,
    pub(super) children: Option<[u32; 2]>,
}

impl MeshBvhNode {
    #[inline]
    pub(super) fn new(bounds: Aabb, offset: u32, count: u32) -> Self {
        Self {
            bounds,
            offset,
            count,
            children: None,
        }
    }

    /// The AABB of all the triangles covered by this node.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The index of the first triangle covered by this node.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The number of triangles covered by this node.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The range of triangles covered by this node.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset as usize..(self.offset + self.count) as usize
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// If this node is a leaf, the range of triangles it owns.
    #[inline]
    pub fn leaf_range(&self) -> Option<Range<usize>> {
        self.is_leaf().then(|| self.range())
    }

    /// The index of the left child of this node, if it isn’t a leaf.
    #[inline]
    pub fn left(&self) -> Option<u32> {
        self.children.map(|c| c[0])
    }

    /// The index of the right child of this node, if it isn’t a leaf.
    #[inline]
    pub fn right(&self) -> Option<u32> {
        self.children.map(|c| c[1])
    }
}

/// A forest of bounding volume hierarchies over the triangles of a mesh, one tree per subset.
///
/// All the trees share the same triangle array, reordered so that each leaf owns a contiguous
/// range of it. Nodes are stored in a single arena and referenced by their index in it.
///
/// A `MeshBvh` is immutable once built and can be shared between threads.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshBvh {
    pub(super) nodes: Vec<MeshBvhNode>,
    pub(super) roots: Vec<u32>,
    pub(super) triangles: Vec<MeshBvhTriangle>,
    pub(super) has_tex_coords: bool,
}

static_assertions::assert_impl_all!(MeshBvh: Send, Sync);

impl MeshBvh {
    /// The indices of the root nodes, in subset order.
    #[inline]
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// The root node of the `subset`-th subset.
    #[inline]
    pub fn root(&self, subset: usize) -> Option<&MeshBvhNode> {
        self.roots.get(subset).map(|id| &self.nodes[*id as usize])
    }

    /// The node at index `id`.
    ///
    /// # Panics
    ///
    /// If `id` isn’t the index of a node of this tree.
    #[inline]
    pub fn node(&self, id: u32) -> &MeshBvhNode {
        &self.nodes[id as usize]
    }

    /// All the nodes of all the trees.
    #[inline]
    pub fn nodes(&self) -> &[MeshBvhNode] {
        &self.nodes
    }

    /// The total number of nodes of all the trees.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The reordered triangles referenced by the nodes.
    #[inline]
    pub fn triangles(&self) -> &[MeshBvhTriangle] {
        &self.triangles
    }

    /// Did the source mesh have texture coordinates?
    #[inline]
    pub fn has_tex_coords(&self) -> bool {
        self.has_tex_coords
    }

    /// The two children of `node`, or `None` if it is a leaf.
    #[inline]
    pub fn children(&self, node: &MeshBvhNode) -> Option<(&MeshBvhNode, &MeshBvhNode)> {
        node.children
            .map(|[left, right]| (self.node(left), self.node(right)))
    }

    /// The triangles covered by `node`.
    #[inline]
    pub fn node_triangles(&self, node: &MeshBvhNode) -> &[MeshBvhTriangle] {
        &self.triangles[node.range()]
    }

    /// Iterates through the leaves of the tree rooted at the node `root`, left to right.
    ///
    /// Each leaf is yielded with its depth, the depth of `root` being zero.
    pub fn leaves(&self, root: u32) -> MeshBvhLeaves<'_> {
        let mut stack = SmallVec::new();
        stack.push((root, 0));
        MeshBvhLeaves { bvh: self, stack }
    }

    /// The depth of the deepest leaf of the tree rooted at the node `root`.
    pub fn depth(&self, root: u32) -> u32 {
        self.leaves(root)
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }
}

/// Depth-first iterator through the leaves of a tree of a [`MeshBvh`].
///
/// Created by [`MeshBvh::leaves`].
pub struct MeshBvhLeaves<'a> {
    bvh: &'a MeshBvh,
    // The tree depth is bounded, so the stack rarely spills to the heap.
    stack: SmallVec<[(u32, u32); 64]>,
}

impl<'a> Iterator for MeshBvhLeaves<'a> {
    type Item = (&'a MeshBvhNode, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth)) = self.stack.pop() {
            let node = self.bvh.node(id);
            match node.children {
                Some([left, right]) => {
                    self.stack.push((right, depth + 1));
                    self.stack.push((left, depth + 1));
                }
                None => return Some((node, depth)),
            }
        }

        None
    }
}
