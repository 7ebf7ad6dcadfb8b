use super::MeshBvh;
use crate::bounding_volume::{Aabb, BoundingVolume};
use alloc::vec;

impl MeshBvh {
    /// Panics if the forest isn’t well-formed.
    ///
    /// The forest is well-formed if:
    /// - every node is reachable from exactly one root, exactly once;
    /// - the two children of an internal node split its triangle range in two non-empty,
    ///   adjacent ranges, the left one first;
    /// - every node’s bounds contain the bounds of its children, and a leaf’s bounds are exactly
    ///   the union of its triangles’ bounds;
    /// - every triangle’s bounds are exactly the AABB of its three vertices.
    ///
    /// This is mostly a utility for debugging.
    pub fn assert_well_formed(&self) {
        for (i, tri) in self.triangles.iter().enumerate() {
            assert_eq!(
                tri.bounds,
                Aabb::from_points_ref(&tri.vertices),
                "Triangle {} has stale bounds.",
                i
            );
        }

        let mut visited = vec![false; self.nodes.len()];
        for root in &self.roots {
            self.assert_well_formed_recurse(*root, &mut visited);
        }

        if let Some(orphan) = visited.iter().position(|v| !v) {
            panic!("Node {} isn’t reachable from any root.", orphan);
        }
    }

    fn assert_well_formed_recurse(&self, node_id: u32, visited: &mut [bool]) {
        if core::mem::replace(&mut visited[node_id as usize], true) {
            panic!("Detected loop. Node {} visited twice.", node_id);
        }

        let node = self.node(node_id);
        assert!(
            node.range().end <= self.triangles.len(),
            "Node {} covers triangles past the end of the triangle array.",
            node_id
        );

        match node.children {
            None => {
                assert_eq!(node.bounds, self.bounds(node.offset, node.count));
            }
            Some([left_id, right_id]) => {
                let left = self.node(left_id);
                let right = self.node(right_id);

                assert!(left.count > 0 && right.count > 0);
                assert_eq!(left.offset, node.offset);
                assert_eq!(right.offset, left.offset + left.count);
                assert_eq!(left.count + right.count, node.count);
                assert!(node.bounds.contains(&left.bounds));
                assert!(node.bounds.contains(&right.bounds));

                self.assert_well_formed_recurse(left_id, visited);
                self.assert_well_formed_recurse(right_id, visited);
            }
        }
    }
}
