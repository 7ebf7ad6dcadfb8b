/*!
meshbvh3d
=========

**meshbvh3d** builds bounding volume hierarchies over triangle meshes whose
geometry lives in raw, interleaved vertex buffers and 16 or 32-bit index
buffers, as produced by asset importers and runtime geometry generators.

Each submesh (draw range) of a mesh gets its own binary tree. All the trees
share a single table of per-triangle bounds which is reordered in place while
the trees are built. Leaves reference contiguous ranges of that table.

```rust
use meshbvh3d::mesh::RawGeometry;
use meshbvh3d::partitioning::MeshBvhBuilder;

// A single triangle, non-indexed, 12-byte stride.
let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
let geometry = RawGeometry {
    vertex_data: bytemuck::cast_slice(&positions),
    stride: 12,
    position_offset: 0,
    uv_offset: None,
    indices: None,
};

let builder = MeshBvhBuilder::from_raw_buffers(geometry).unwrap();
let bvh = builder.build_tree().unwrap();
assert_eq!(bvh.roots().len(), 1);
assert_eq!(bvh.triangles().len(), 1);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![deny(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod mesh;
pub mod partitioning;

/// Aliases for the scalar, point and vector types of this crate.
pub mod math {
    pub use na::{Point2, Point3, Vector2, Vector3};

    /// The scalar type used throughout this crate.
    ///
    /// Vertex buffers store their attributes as packed 32-bit floats.
    pub type Real = f32;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The texture coordinate type.
    pub type TexCoord = Point2<Real>;
}
