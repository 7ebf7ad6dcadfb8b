//! Spatial partitioning tools.

pub use self::mesh_bvh::{
    MeshBvh, MeshBvhBuildOptions, MeshBvhBuilder, MeshBvhLeaves, MeshBvhNode, MeshBvhTriangle,
    MAX_LEAF_TRIANGLES, MAX_TREE_DEPTH,
};

mod mesh_bvh;
