use meshbvh3d::math::{Point, TexCoord};
use meshbvh3d::mesh::{ComponentType, MeshAccessor, MeshDataError, RawGeometry};
use meshbvh3d::partitioning::{MeshBvhBuildOptions, MeshBvhBuilder, MAX_LEAF_TRIANGLES};

/// A `n * n` quads grid on the XY plane with random heights, as interleaved `[x, y, z, u, v]`
/// vertices and 32-bits indices.
fn height_field(n: u32, seed: u64) -> (Vec<f32>, Vec<u32>) {
    let mut rng = oorandom::Rand32::new(seed);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for j in 0..=n {
        for i in 0..=n {
            let (u, v) = (i as f32 / n as f32, j as f32 / n as f32);
            vertices.extend_from_slice(&[i as f32, j as f32, rng.rand_float(), u, v]);
        }
    }

    for j in 0..n {
        for i in 0..n {
            let a = j * (n + 1) + i;
            let (b, c, d) = (a + 1, a + n + 1, a + n + 2);
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    (vertices, indices)
}

fn height_field_geometry<'a>(vertices: &'a [f32], indices: &'a [u32]) -> RawGeometry<'a> {
    RawGeometry {
        vertex_data: bytemuck::cast_slice(vertices),
        stride: 20,
        position_offset: 0,
        uv_offset: Some(12),
        indices: Some((bytemuck::cast_slice(indices), ComponentType::UnsignedInt32)),
    }
}

#[test]
fn height_field_tree() {
    let (vertices, indices) = height_field(32, 0);
    let builder = MeshBvhBuilder::from_raw_buffers(height_field_geometry(&vertices, &indices))
        .unwrap();
    assert_eq!(builder.accessor().validate_indices(), Ok(()));

    let bvh = builder.build_tree().unwrap();
    bvh.assert_well_formed();

    assert_eq!(bvh.roots().len(), 1);
    assert_eq!(bvh.triangles().len(), 32 * 32 * 2);

    let root = bvh.roots()[0];
    let mut covered = 0;
    for (leaf, depth) in bvh.leaves(root) {
        assert_eq!(leaf.offset(), covered);
        assert!(leaf.count() < MAX_LEAF_TRIANGLES || depth >= 40);
        covered += leaf.count();
    }
    assert_eq!(covered, 32 * 32 * 2);

    // The texture coordinates follow the vertices through the reordering.
    for tri in bvh.triangles() {
        for (vertex, uv) in tri.vertices.iter().zip(tri.tex_coords.iter()) {
            assert_relative_eq!(*uv, TexCoord::new(vertex.x / 32.0, vertex.y / 32.0));
        }
    }
}

#[test]
fn builder_can_be_reused() {
    let (vertices, indices) = height_field(16, 1);
    let builder = MeshBvhBuilder::from_raw_buffers(height_field_geometry(&vertices, &indices))
        .unwrap();

    let bvh1 = builder.build_tree().unwrap();
    let bvh2 = builder.build_tree().unwrap();
    assert_eq!(bvh1, bvh2);

    let shallow = builder
        .clone()
        .with_options(MeshBvhBuildOptions {
            max_tree_depth: 2,
            ..MeshBvhBuildOptions::default()
        })
        .build_tree()
        .unwrap();
    assert_eq!(shallow.depth(shallow.roots()[0]), 2);
    assert_eq!(shallow.triangles().len(), bvh1.triangles().len());
}

#[test]
fn non_indexed_padded_vertices() {
    // Four bytes of padding, then the position, then four more bytes of padding.
    let vertices: [[f32; 5]; 6] = [
        [7.0, 0.0, 0.0, 0.0, 7.0],
        [7.0, 1.0, 0.0, 0.0, 7.0],
        [7.0, 0.0, 1.0, 0.0, 7.0],
        [7.0, 5.0, 5.0, 5.0, 7.0],
        [7.0, 6.0, 5.0, 5.0, 7.0],
        [7.0, 5.0, 6.0, 5.0, 7.0],
    ];
    let geometry = RawGeometry {
        vertex_data: bytemuck::cast_slice(&vertices),
        stride: 20,
        position_offset: 4,
        uv_offset: None,
        indices: None,
    };
    let bvh = MeshBvhBuilder::from_raw_buffers(geometry)
        .unwrap()
        .build_tree()
        .unwrap();

    assert!(!bvh.has_tex_coords());
    let root = bvh.root(0).unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.count(), 2);
    assert_eq!(root.bounds().mins, Point::origin());
    assert_eq!(root.bounds().maxs, Point::new(6.0, 6.0, 5.0));
    assert_eq!(bvh.triangles()[1].vertices[1], Point::new(6.0, 5.0, 5.0));
}

#[test]
fn invalid_layouts_are_rejected() {
    let (vertices, indices) = height_field(2, 2);

    let mut geometry = height_field_geometry(&vertices, &indices);
    geometry.uv_offset = Some(16);
    assert_eq!(
        MeshBvhBuilder::from_raw_buffers(geometry).unwrap_err(),
        MeshDataError::AttributeOutOfStride {
            name: "attr_uv0",
            offset: 16,
            size: 8,
            stride: 20,
        }
    );

    let mut geometry = height_field_geometry(&vertices, &indices);
    geometry.indices = Some((
        &bytemuck::cast_slice::<u32, u8>(&indices)[..5],
        ComponentType::Int32,
    ));
    assert_eq!(
        MeshBvhBuilder::from_raw_buffers(geometry).unwrap_err(),
        MeshDataError::MisalignedIndexBuffer {
            len: 5,
            component_size: 4,
        }
    );

    let mut geometry = height_field_geometry(&vertices, &indices);
    geometry.stride = 0;
    assert_eq!(
        MeshBvhBuilder::from_raw_buffers(geometry).unwrap_err(),
        MeshDataError::ZeroStride
    );
}
