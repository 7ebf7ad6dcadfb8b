use meshbvh3d::math::{Point, TexCoord};
use meshbvh3d::mesh::{
    ComponentType, DrawMode, IndexBuffer, Mesh, MeshAccessor, MeshDataError, MeshSubset,
    VertexBuffer, VertexBufferEntry,
};
use meshbvh3d::partitioning::MeshBvhBuilder;

// Position, normal, then texture coordinates.
const STRIDE: u32 = 32;

// Two triangles per face, in the order -X, +X, -Y, +Y, -Z, +Z.
const CUBE_INDICES: [u32; 36] = [
    0, 2, 6, 0, 6, 4, // -X
    1, 3, 7, 1, 7, 5, // +X
    0, 1, 5, 0, 5, 4, // -Y
    2, 3, 7, 2, 7, 6, // +Y
    0, 1, 3, 0, 3, 2, // -Z
    4, 5, 7, 4, 7, 6, // +Z
];

fn cube_corner(i: u32) -> [f32; 3] {
    let coord = |bit: u32| if i & (1 << bit) != 0 { 1.0 } else { -1.0 };
    [coord(0), coord(1), coord(2)]
}

fn corner_uv(i: u32) -> [f32; 2] {
    [i as f32 / 8.0, 1.0 - i as f32 / 8.0]
}

fn cube_vertex_data(vertices: impl Iterator<Item = u32>) -> Vec<u8> {
    let mut data = Vec::new();
    for i in vertices {
        let pos = cube_corner(i);
        data.extend_from_slice(bytemuck::cast_slice(&pos));
        data.extend_from_slice(bytemuck::cast_slice(&pos)); // The normal is ignored.
        data.extend_from_slice(bytemuck::cast_slice(&corner_uv(i)));
    }
    data
}

fn entry(name: &str, count: u32, offset: u32) -> VertexBufferEntry {
    VertexBufferEntry {
        name: name.to_string(),
        component_type: ComponentType::Float32,
        component_count: count,
        offset,
    }
}

fn index_bytes(component_type: ComponentType) -> Vec<u8> {
    match component_type.size_in_bytes() {
        2 => {
            let indices: Vec<u16> = CUBE_INDICES.iter().map(|i| *i as u16).collect();
            bytemuck::cast_slice(&indices).to_vec()
        }
        _ => bytemuck::cast_slice(&CUBE_INDICES).to_vec(),
    }
}

fn cube_mesh(index_type: Option<ComponentType>, uv_name: &str) -> Mesh {
    let (data, index_buffer) = match index_type {
        Some(component_type) => (
            cube_vertex_data(0..8),
            Some(IndexBuffer {
                component_type,
                data: index_bytes(component_type),
            }),
        ),
        None => (cube_vertex_data(CUBE_INDICES.iter().copied()), None),
    };

    Mesh {
        draw_mode: DrawMode::Triangles,
        vertex_buffer: VertexBuffer {
            stride: STRIDE,
            entries: vec![
                entry(Mesh::POSITION_ATTR_NAME, 3, 0),
                entry("attr_norm", 3, 12),
                entry(uv_name, 2, 24),
            ],
            data,
        },
        index_buffer,
        subsets: vec![MeshSubset::new(0, 36)],
    }
}

#[test]
fn cube_mesh_tree() {
    let mesh = cube_mesh(Some(ComponentType::UnsignedInt16), Mesh::UV0_ATTR_NAME);
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();
    bvh.assert_well_formed();

    assert!(bvh.has_tex_coords());
    assert_eq!(bvh.triangles().len(), 12);
    assert_eq!(bvh.roots().len(), 1);

    let root = bvh.root(0).unwrap();
    assert_relative_eq!(root.bounds().center(), Point::origin());
    assert_relative_eq!(root.bounds().extents(), na::Vector3::repeat(2.0));

    // The -X face is split off first, then the +X face.
    let (left, right) = bvh.children(root).unwrap();
    assert_eq!((left.count(), right.count()), (2, 10));
    assert!(bvh
        .node_triangles(left)
        .iter()
        .all(|tri| tri.vertices.iter().all(|v| v.x == -1.0)));
    let (_, right_right) = bvh.children(right).unwrap();
    assert!(bvh
        .node_triangles(right_right)
        .iter()
        .all(|tri| tri.vertices.iter().all(|v| v.x == 1.0)));
    assert_eq!(bvh.depth(bvh.roots()[0]), 2);

    for tri in bvh.triangles() {
        let first = tri.index as usize * 3;
        for k in 0..3 {
            let corner = CUBE_INDICES[first + k];
            assert_eq!(tri.vertices[k], Point::from(cube_corner(corner)));
            assert_relative_eq!(tri.tex_coords[k], TexCoord::from(corner_uv(corner)));
        }
    }
}

#[test]
fn index_types_yield_identical_trees() {
    let build = |index_type| {
        let mesh = cube_mesh(index_type, Mesh::UV0_ATTR_NAME);
        MeshBvhBuilder::from_mesh(&mesh)
            .unwrap()
            .build_tree()
            .unwrap()
    };

    let reference = build(Some(ComponentType::UnsignedInt32));
    assert_eq!(build(Some(ComponentType::UnsignedInt16)), reference);
    assert_eq!(build(Some(ComponentType::Int16)), reference);
    assert_eq!(build(Some(ComponentType::Int32)), reference);
    assert_eq!(build(None), reference);
}

#[test]
fn uv1_is_the_fallback() {
    let mesh = cube_mesh(Some(ComponentType::UnsignedInt32), Mesh::UV1_ATTR_NAME);
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();
    assert!(bvh.has_tex_coords());
    assert!(bvh
        .triangles()
        .iter()
        .any(|tri| tri.tex_coords[0] != TexCoord::origin()));

    let mesh = cube_mesh(Some(ComponentType::UnsignedInt32), "attr_color");
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();
    assert!(!bvh.has_tex_coords());
    assert!(bvh
        .triangles()
        .iter()
        .all(|tri| tri.tex_coords == [TexCoord::origin(); 3]));
}

#[test]
fn one_tree_per_subset() {
    let mut mesh = cube_mesh(Some(ComponentType::UnsignedInt16), Mesh::UV0_ATTR_NAME);
    mesh.subsets = vec![MeshSubset::new(0, 12), MeshSubset::new(12, 24)];
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();
    bvh.assert_well_formed();

    assert_eq!(bvh.roots().len(), 2);
    let (first, second) = (bvh.root(0).unwrap(), bvh.root(1).unwrap());
    assert_eq!((first.offset(), first.count()), (0, 4));
    assert_eq!((second.offset(), second.count()), (4, 8));
    assert!(first.is_leaf() && second.is_leaf());
    // Both subsets span the whole cube.
    assert_eq!(first.bounds(), second.bounds());
}

#[test]
fn mesh_without_subsets_is_a_single_subset() {
    let mut mesh = cube_mesh(Some(ComponentType::UnsignedInt16), Mesh::UV0_ATTR_NAME);
    mesh.subsets.clear();
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();
    bvh.assert_well_formed();

    assert_eq!(bvh.roots().len(), 1);
    let root = bvh.root(0).unwrap();
    assert_eq!((root.offset(), root.count()), (0, 12));
    assert_eq!(bvh.node_count(), 5);

    // Same tree as with an explicit subset covering the whole index buffer.
    let whole = cube_mesh(Some(ComponentType::UnsignedInt16), Mesh::UV0_ATTR_NAME);
    let expected = MeshBvhBuilder::from_mesh(&whole)
        .unwrap()
        .build_tree()
        .unwrap();
    assert_eq!(bvh, expected);

    // The draw mode is still checked first.
    mesh.draw_mode = DrawMode::Lines;
    assert_eq!(MeshBvhBuilder::from_mesh(&mesh).unwrap().build_tree(), None);
}

#[test]
fn single_triangle_without_subsets() {
    let mut mesh = cube_mesh(Some(ComponentType::UnsignedInt32), Mesh::UV0_ATTR_NAME);
    mesh.subsets.clear();
    mesh.index_buffer = Some(IndexBuffer {
        component_type: ComponentType::UnsignedInt32,
        data: bytemuck::cast_slice::<u32, u8>(&[0, 1, 3]).to_vec(),
    });
    let bvh = MeshBvhBuilder::from_mesh(&mesh)
        .unwrap()
        .build_tree()
        .unwrap();

    assert_eq!(bvh.roots().len(), 1);
    assert_eq!(bvh.triangles().len(), 1);
    let root = bvh.root(0).unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.leaf_range(), Some(0..1));
}

#[test]
fn only_triangle_lists_are_partitioned() {
    let mut mesh = cube_mesh(Some(ComponentType::UnsignedInt16), Mesh::UV0_ATTR_NAME);
    for draw_mode in [DrawMode::Points, DrawMode::Lines, DrawMode::TriangleFan] {
        mesh.draw_mode = draw_mode;
        let builder = MeshBvhBuilder::from_mesh(&mesh).unwrap();
        assert_eq!(builder.build_tree(), None);
    }
}

#[test]
fn malformed_meshes_are_reported() {
    let mut mesh = cube_mesh(Some(ComponentType::UnsignedInt8), Mesh::UV0_ATTR_NAME);
    assert_eq!(
        MeshBvhBuilder::from_mesh(&mesh).unwrap_err(),
        MeshDataError::UnsupportedIndexComponentType(ComponentType::UnsignedInt8)
    );

    mesh.index_buffer = Some(IndexBuffer {
        component_type: ComponentType::UnsignedInt16,
        data: bytemuck::cast_slice::<u16, u8>(&[0, 1, 8]).to_vec(),
    });
    let builder = MeshBvhBuilder::from_mesh(&mesh).unwrap();
    let err = builder.accessor().validate_indices().unwrap_err();
    assert_eq!(
        err,
        MeshDataError::IndexOutOfBounds {
            position: 2,
            index: 8,
            vertex_count: 8,
        }
    );
    assert_eq!(
        err.to_string(),
        "the index at position 2 references the vertex 8 but there are only 8 vertices."
    );
}
