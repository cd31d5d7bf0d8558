mod util;
use mesh_bridge::prelude::*;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use util::*;

fn signed_volume(mesh: &TestMesh, tet: EntityHandle) -> f64 {
    mesh.try_measure(tet).unwrap()
}

#[test]
fn edge_keeps_vertex_order() {
    let mut mesh = empty_mesh();
    let v = add_vertices(&mut mesh, &UNIT_TET[..2]);
    let e = Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[v[1], v[0]]);
    assert_eq!(Mesh::entity_type(&mesh, e), EntityType::Edge);
    assert_eq!(Mesh::get_adjacent(&mesh, e, 0), vec![v[1], v[0]]);
}

/// Triangle `v0 v1 v2` with edges created in the given orientations, then
/// passed to construction in the given order.
fn triangle_case(flip: [bool; 3], order: &[usize]) -> (TestMesh, Vec<EntityHandle>, Vec<EntityHandle>, EntityHandle) {
    let mut mesh = empty_mesh();
    let v = add_vertices(&mut mesh, &UNIT_TET[..3]);
    let edges: Vec<_> = [(0, 1), (1, 2), (2, 0)]
        .iter()
        .zip(flip)
        .map(|(&(a, b), f)| {
            let ends = if f { [v[b], v[a]] } else { [v[a], v[b]] };
            Mesh::create_entity(&mut mesh, EntityType::Edge, None, &ends)
        })
        .collect();
    let down: Vec<_> = order.iter().map(|&i| edges[i]).collect();
    let tri = Mesh::create_entity(&mut mesh, EntityType::Triangle, None, &down);
    (mesh, v, edges, tri)
}

proptest! {
    #[test]
    fn triangle_from_edges_in_any_order(
        flip in any::<[bool; 3]>(),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let (mesh, v, edges, tri) = triangle_case(flip, &order);
        prop_assert_eq!(Mesh::entity_type(&mesh, tri), EntityType::Triangle);

        let verts = Mesh::get_adjacent(&mesh, tri, 0);
        let mut sorted = verts.clone();
        sorted.sort_unstable();
        let mut want = v.clone();
        want.sort_unstable();
        prop_assert_eq!(sorted, want);

        // consecutive vertices (cyclically) are joined by one of the input edges
        for i in 0..3 {
            let (a, b) = (verts[i], verts[(i + 1) % 3]);
            let joined = edges.iter().any(|&e| {
                let ends = Mesh::get_adjacent(&mesh, e, 0);
                ends == [a, b] || ends == [b, a]
            });
            prop_assert!(joined, "{:?} and {:?} are not joined", a, b);
        }

        let mut face_edges = Vec::new();
        prop_assert_eq!(Mesh::get_downward(&mesh, tri, 1, &mut face_edges), 3);
        face_edges.sort_unstable();
        let mut input = edges.clone();
        input.sort_unstable();
        prop_assert_eq!(face_edges, input);
    }
}

#[test]
fn triangle_rejects_edges_without_shared_vertex() {
    let mut mesh = empty_mesh();
    let v = add_vertices(
        &mut mesh,
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [5.0, 0.0, 0.0],
        ],
    );
    let e: Vec<_> = [(0, 1), (2, 3), (4, 5)]
        .iter()
        .map(|&(a, b)| Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[v[a], v[b]]))
        .collect();
    let err = mesh.try_create_entity(EntityType::Triangle, None, &e).unwrap_err();
    assert!(matches!(err, MeshBridgeError::MalformedBoundary { .. }), "{err}");
    assert_eq!(Mesh::count(&mesh, 2), 0);
}

#[test]
fn open_path_does_not_close_the_cycle() {
    // 0-1, 1-2, 2-3: the first pair matches but the third edge does not close it
    let mut mesh = empty_mesh();
    let v = add_vertices(&mut mesh, &UNIT_TET);
    let e: Vec<_> = [(0, 1), (1, 2), (2, 3)]
        .iter()
        .map(|&(a, b)| Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[v[a], v[b]]))
        .collect();
    let err = mesh.try_create_entity(EntityType::Triangle, None, &e).unwrap_err();
    assert!(err.to_string().contains("do not close"), "{err}");
}

#[test]
fn tet_is_positively_oriented() {
    let f = unit_tet();
    assert_eq!(Mesh::entity_type(&f.mesh, f.tet), EntityType::Tet);
    assert!(signed_volume(&f.mesh, f.tet) > 0.0);
    assert!((signed_volume(&f.mesh, f.tet) - 1.0 / 6.0).abs() < 1e-12);
    assert_eq!(f.mesh.dimension(), 2, "dimension is fixed when the adapter opens");
}

#[test]
fn discarded_candidate_is_gone() {
    let f = unit_tet();
    let regions: Vec<_> = f.mesh.entities(3).unwrap().collect();
    assert_eq!(regions, vec![f.tet]);
    assert_eq!(Mesh::count(&f.mesh, 3), 1);
    assert_eq!(Mesh::count(&f.mesh, 2), 4);
    assert_eq!(Mesh::count(&f.mesh, 1), 6);
    for &face in &f.faces {
        assert_eq!(Mesh::get_up(&f.mesh, face), vec![f.tet]);
    }
}

#[test]
fn mirrored_input_still_yields_positive_tet() {
    // swapping two vertices flips the orientation of the derived candidate
    let mut coords = UNIT_TET;
    coords.swap(0, 1);
    let f = tet_from_coords(coords);
    assert!(signed_volume(&f.mesh, f.tet) > 0.0);
    assert_eq!(Mesh::count(&f.mesh, 3), 1);
}

#[test]
fn shuffled_faces_yield_positive_tet() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..8 {
        let mut mesh = empty_mesh();
        let v = add_vertices(&mut mesh, &UNIT_TET);
        let edges: Vec<_> = TET_EDGES
            .iter()
            .map(|&(a, b)| Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[v[a], v[b]]))
            .collect();
        let mut faces: Vec<_> = TET_FACE_EDGES
            .iter()
            .map(|fe| {
                let mut down = [edges[fe[0]], edges[fe[1]], edges[fe[2]]];
                down.shuffle(&mut rng);
                Mesh::create_entity(&mut mesh, EntityType::Triangle, None, &down)
            })
            .collect();
        faces.shuffle(&mut rng);
        let tet = Mesh::create_entity(&mut mesh, EntityType::Tet, None, &faces);
        assert!(signed_volume(&mesh, tet) > 0.0);
        assert_eq!(Mesh::count(&mesh, 3), 1);
    }
}

const FLAT_TET: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];

/// The four triangles of a tetrahedron over `coords`, built through the fallible API.
fn tet_faces<D: TopoDatabase, G: GeometryDatabase>(
    mesh: &mut CapMesh<D, G>,
    coords: [[f64; 3]; 4],
) -> Vec<EntityHandle> {
    let v: Vec<_> = coords
        .iter()
        .map(|&x| mesh.try_create_vertex(None, x, [0.0; 3]).unwrap())
        .collect();
    let edges: Vec<_> = TET_EDGES
        .iter()
        .map(|&(a, b)| mesh.try_create_entity(EntityType::Edge, None, &[v[a], v[b]]).unwrap())
        .collect();
    TET_FACE_EDGES
        .iter()
        .map(|fe| {
            let down = [edges[fe[0]], edges[fe[1]], edges[fe[2]]];
            mesh.try_create_entity(EntityType::Triangle, None, &down).unwrap()
        })
        .collect()
}

#[test]
#[should_panic(expected = "ambiguous orientation")]
fn degenerate_tet_is_fatal() {
    tet_from_coords(FLAT_TET);
}

#[test]
fn degenerate_tet_leaves_no_region() {
    let mut mesh = empty_mesh();
    let faces = tet_faces(&mut mesh, FLAT_TET);
    let err = mesh.try_create_entity(EntityType::Tet, None, &faces).unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvariantViolation);
    assert!(
        matches!(&err, MeshBridgeError::AmbiguousOrientation { cleanup, .. } if cleanup.is_empty()),
        "{err}"
    );
    assert_eq!(Mesh::count(&mesh, 3), 0);
    assert_eq!(Mesh::count(&mesh, 2), 4);
}

#[test]
fn failed_candidate_cleanup_keeps_orientation_error() {
    let db = FaultyDb {
        pin_regions: true,
        ..FaultyDb::default()
    };
    let mut mesh = CapMesh::open(db, InMemoryGeometry::new());
    let faces = tet_faces(&mut mesh, FLAT_TET);
    let err = mesh.try_create_entity(EntityType::Tet, None, &faces).unwrap_err();
    let MeshBridgeError::AmbiguousOrientation { cleanup, .. } = &err else {
        panic!("expected an orientation error, got {err}");
    };
    // both deletes were attempted even though the first one failed
    assert_eq!(mesh.native().delete_attempts, 2);
    assert_eq!(cleanup.matches("not deleted").count(), 2);
    assert!(err.to_string().contains("is pinned"), "{err}");
}

#[test]
#[should_panic(expected = "cannot build Quad from Edge")]
fn unsupported_pairing_is_fatal() {
    let mut f = unit_tet();
    let down = [f.edges[0], f.edges[3], f.edges[5], f.edges[2]];
    Mesh::create_entity(&mut f.mesh, EntityType::Quad, None, &down);
}

#[test]
fn unsupported_pairings_are_precondition_violations() {
    let mut f = unit_tet();
    for (ty, down) in [
        (EntityType::Tet, f.vertices.clone()),
        (EntityType::Triangle, f.vertices[..3].to_vec()),
        (EntityType::Hex, f.faces.clone()),
        (EntityType::Edge, f.edges[..2].to_vec()),
    ] {
        let err = f.mesh.try_create_entity(ty, None, &down).unwrap_err();
        assert!(
            matches!(err, MeshBridgeError::UnsupportedConstruction { .. }),
            "{ty:?}: {err}"
        );
        assert_eq!(err.class(), ErrorClass::PreconditionViolation);
    }
}

#[test]
fn classification_is_passed_through() {
    let mut geometry = InMemoryGeometry::new();
    let face = geometry.add_entity(2, 7);
    let mut mesh = CapMesh::open(InMemoryTopoDatabase::new(), geometry);
    let v = Mesh::create_vertex(&mut mesh, Some(face), [0.0; 3], [0.5, 0.5, 0.0]);
    assert_eq!(Mesh::to_model(&mesh, v), Some(face));
    assert_eq!(Mesh::param(&mesh, v), [0.5, 0.5, 0.0]);

    let w = Mesh::create_vertex(&mut mesh, None, [1.0, 0.0, 0.0], [0.0; 3]);
    let e = Mesh::create_entity(&mut mesh, EntityType::Edge, Some(face), &[v, w]);
    assert_eq!(Mesh::to_model(&mesh, e), Some(face));
    assert_eq!(Mesh::to_model(&mesh, w), None);
}

#[test]
fn destroy_frees_tags_and_entity() {
    let mut mesh = empty_mesh();
    let v = add_vertices(&mut mesh, &UNIT_TET[..2]);
    let e = Mesh::create_entity(&mut mesh, EntityType::Edge, None, &v);
    let t = mesh.create_int_tag("marker", 1);
    mesh.set_int_tag(e, t, &[4]);
    assert!(mesh.has_tag(e, t));
    Mesh::destroy(&mut mesh, e);
    assert!(!mesh.has_tag(e, t));
    assert_eq!(Mesh::count(&mesh, 1), 0);
    assert!(!Mesh::has_up(&mesh, v[0]));
}

#[test]
fn refused_destroy_keeps_tags() {
    let mut f = unit_tet();
    let corner = f.vertices[0];
    let t = f.mesh.create_int_tag("marker", 1);
    f.mesh.set_int_tag(corner, t, &[7]);
    // the vertex still bounds three edges
    assert!(f.mesh.try_destroy(corner).is_err());
    assert!(f.mesh.has_tag(corner, t));
    let mut out = [0];
    f.mesh.get_int_tag(corner, t, &mut out);
    assert_eq!(out, [7]);
    assert_eq!(Mesh::count(&f.mesh, 0), 4);
}
