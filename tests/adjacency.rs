mod util;
use mesh_bridge::prelude::*;
use proptest::prelude::*;
use util::*;

#[test]
fn same_dimension_is_identity() {
    let f = unit_tet();
    let m = &f.mesh;
    for &e in f.vertices.iter().chain(&f.edges).chain(&f.faces).chain([&f.tet]) {
        let d = Mesh::entity_dimension(m, e);
        assert_eq!(Mesh::get_adjacent(m, e, d), vec![e]);
    }
}

#[test]
fn tet_downward_counts() {
    let f = unit_tet();
    let mut down = Vec::new();
    assert_eq!(Mesh::get_downward(&f.mesh, f.tet, 2, &mut down), 4);
    assert_permutation(&down, &f.faces);
    assert_eq!(Mesh::get_downward(&f.mesh, f.tet, 1, &mut down), 6);
    assert_permutation(&down, &f.edges);
    assert_eq!(Mesh::get_downward(&f.mesh, f.tet, 0, &mut down), 4);
    assert_permutation(&down, &f.vertices);
    assert_eq!(Mesh::get_downward(&f.mesh, f.tet, 3, &mut down), 1);
    assert_eq!(down, vec![f.tet]);
}

#[test]
fn triangle_and_edge_downward_counts() {
    let f = unit_tet();
    let mut down = Vec::new();
    for &t in &f.faces {
        assert_eq!(Mesh::get_downward(&f.mesh, t, 1, &mut down), 3);
        assert_eq!(Mesh::get_downward(&f.mesh, t, 0, &mut down), 3);
    }
    for (&e, &(a, b)) in f.edges.iter().zip(&TET_EDGES) {
        assert_eq!(Mesh::get_downward(&f.mesh, e, 0, &mut down), 2);
        assert_eq!(down, vec![f.vertices[a], f.vertices[b]]);
    }
}

#[test]
#[should_panic(expected = "get_downward: dimension 3 is out of range")]
fn downward_toward_higher_dimension_is_fatal() {
    let f = unit_tet();
    let mut down = Vec::new();
    Mesh::get_downward(&f.mesh, f.faces[0], 3, &mut down);
}

#[test]
fn upward_by_index_matches_upward_set() {
    let f = unit_tet();
    let m = &f.mesh;
    for &e in f.vertices.iter().chain(&f.edges).chain(&f.faces) {
        let up = Mesh::get_up(m, e);
        assert_eq!(Mesh::count_upward(m, e), up.len());
        assert!(Mesh::has_up(m, e));
        let by_index: Vec<_> = (0..up.len())
            .map(|i| Mesh::get_upward(m, e, i).unwrap())
            .collect();
        assert_eq!(by_index, up);
    }
    // every vertex of a tet bounds three edges, every edge two faces
    assert_eq!(Mesh::count_upward(m, f.vertices[0]), 3);
    assert_eq!(Mesh::count_upward(m, f.edges[0]), 2);
    assert_eq!(Mesh::get_up(m, f.faces[2]), vec![f.tet]);
    assert!(!Mesh::has_up(m, f.tet));
    assert_eq!(Mesh::get_upward(m, f.tet, 0), None);
}

#[test]
fn adjacent_across_dimensions() {
    let f = unit_tet();
    let m = &f.mesh;
    assert_permutation(&Mesh::get_adjacent(m, f.vertices[0], 3), &[f.tet]);
    assert_eq!(Mesh::get_adjacent(m, f.vertices[0], 2).len(), 3);
    assert_permutation(&Mesh::get_adjacent(m, f.tet, 1), &f.edges);
    assert_eq!(Mesh::get_adjacent(m, f.edges[5], 3), vec![f.tet]);
}

#[test]
#[should_panic(expected = "upward index 3 out of range")]
fn upward_index_past_end_is_fatal() {
    let f = unit_tet();
    Mesh::get_upward(&f.mesh, f.vertices[0], 3);
}

#[test]
fn quad_face_downward_counts() {
    let mut db = InMemoryTopoDatabase::new();
    let v: Vec<_> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]
        .iter()
        .map(|&x| db.create_vertex(x, None).unwrap())
        .collect();
    db.create_face(&v, None).unwrap();
    let mesh = CapMesh::open(db, InMemoryGeometry::new());
    let quad = mesh.entities(2).unwrap().next().unwrap();
    assert_eq!(Mesh::entity_type(&mesh, quad), EntityType::Quad);
    assert_eq!(mesh.try_downward(quad, 1).unwrap().len(), 4);
    assert_eq!(mesh.try_downward(quad, 0).unwrap().len(), 4);
}

proptest! {
    #[test]
    fn has_adjacency_only_between_consecutive_dimensions(a in 0usize..4, b in 0usize..4) {
        let mesh = empty_mesh();
        prop_assert_eq!(Mesh::has_adjacency(&mesh, a, b), a.abs_diff(b) == 1);
    }
}

fn short_triangle() -> (CapMesh<FaultyDb, InMemoryGeometry>, EntityHandle) {
    let mut db = FaultyDb {
        short_downward: true,
        ..FaultyDb::default()
    };
    let v: Vec<_> = UNIT_TET[..3]
        .iter()
        .map(|&x| db.inner.create_vertex(x, None).unwrap())
        .collect();
    let face = db.inner.create_face(&v, None).unwrap();
    let mesh = CapMesh::new(db, InMemoryGeometry::new(), NoComm, AdapterOptions::default());
    (mesh, EntityHandle::new(face.get()).unwrap())
}

#[test]
fn downward_count_mismatch_is_detected() {
    let (mesh, tri) = short_triangle();
    assert_eq!(
        mesh.try_downward(tri, 1),
        Err(MeshBridgeError::DownwardCountMismatch {
            op: "get_downward",
            ty: EntityType::Triangle,
            dim: 1,
            got: 2,
            expected: 3,
        })
    );
    assert_eq!(
        mesh.try_downward(tri, 1).unwrap_err().class(),
        ErrorClass::InvariantViolation
    );
}

#[test]
fn short_vertex_boundary_is_never_returned() {
    let (mesh, tri) = short_triangle();
    assert!(matches!(
        mesh.try_downward(tri, 0),
        Err(MeshBridgeError::DownwardCountMismatch { got: 2, expected: 3, .. })
    ));
    let mut down = Vec::new();
    assert!(mesh.try_get_downward(tri, 0, &mut down).is_err());
}

#[test]
#[should_panic(expected = "Triangle has 2 bounding entities of dimension 0, expected 3")]
fn downward_count_mismatch_is_fatal() {
    let (mesh, tri) = short_triangle();
    let mut down = Vec::new();
    Mesh::get_downward(&mesh, tri, 0, &mut down);
}
