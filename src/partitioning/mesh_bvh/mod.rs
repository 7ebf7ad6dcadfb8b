pub use mesh_bvh_build::{MeshBvhBuildOptions, MeshBvhBuilder, MAX_LEAF_TRIANGLES, MAX_TREE_DEPTH};
pub use mesh_bvh_tree::{MeshBvh, MeshBvhLeaves, MeshBvhNode};
pub use mesh_bvh_triangle::MeshBvhTriangle;

mod mesh_bvh_build;
mod mesh_bvh_tree;
mod mesh_bvh_triangle;
mod mesh_bvh_validation;
