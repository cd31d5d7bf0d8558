#![allow(dead_code)]
use mesh_bridge::native::{Classification, MeshShape, NativeTopo};
use mesh_bridge::prelude::*;

pub type TestMesh = CapMesh<InMemoryTopoDatabase, InMemoryGeometry>;

pub const UNIT_TET: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Vertex pairs of the six tetrahedron edges, in `edges` order.
pub const TET_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Edge indices (into `TET_EDGES`) of the four tetrahedron faces, each listed as a cycle.
pub const TET_FACE_EDGES: [[usize; 3]; 4] = [[0, 3, 1], [0, 4, 2], [1, 5, 2], [3, 5, 4]];

pub fn empty_mesh() -> TestMesh {
    CapMesh::open(InMemoryTopoDatabase::new(), InMemoryGeometry::new())
}

pub struct TetFixture {
    pub mesh: TestMesh,
    pub vertices: Vec<EntityHandle>,
    pub edges: Vec<EntityHandle>,
    pub faces: Vec<EntityHandle>,
    pub tet: EntityHandle,
}

pub fn add_vertices(mesh: &mut TestMesh, coords: &[[f64; 3]]) -> Vec<EntityHandle> {
    coords
        .iter()
        .map(|&x| Mesh::create_vertex(mesh, None, x, [0.0; 3]))
        .collect()
}

/// Builds a tetrahedron bottom-up: vertices, edges, triangles from edges, tet from triangles.
pub fn tet_from_coords(coords: [[f64; 3]; 4]) -> TetFixture {
    let mut mesh = empty_mesh();
    let vertices = add_vertices(&mut mesh, &coords);
    let edges: Vec<_> = TET_EDGES
        .iter()
        .map(|&(a, b)| Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[vertices[a], vertices[b]]))
        .collect();
    let faces: Vec<_> = TET_FACE_EDGES
        .iter()
        .map(|f| {
            let down = [edges[f[0]], edges[f[1]], edges[f[2]]];
            Mesh::create_entity(&mut mesh, EntityType::Triangle, None, &down)
        })
        .collect();
    let tet = Mesh::create_entity(&mut mesh, EntityType::Tet, None, &faces);
    TetFixture {
        mesh,
        vertices,
        edges,
        faces,
        tet,
    }
}

pub fn unit_tet() -> TetFixture {
    tet_from_coords(UNIT_TET)
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Native database that misbehaves on request.
#[derive(Default)]
pub struct FaultyDb {
    pub inner: InMemoryTopoDatabase,
    /// Drop the last entity of every downward answer.
    pub short_downward: bool,
    /// Refuse every region deletion.
    pub pin_regions: bool,
    pub delete_attempts: usize,
}

impl TopoDatabase for FaultyDb {
    type Cursor = <InMemoryTopoDatabase as TopoDatabase>::Cursor;

    fn num_topos(&self, c: TopoCategory) -> usize {
        self.inner.num_topos(c)
    }
    fn topo_shape(&self, t: NativeTopo) -> Result<MeshShape, MeshBridgeError> {
        self.inner.topo_shape(t)
    }
    fn topo_category(&self, t: NativeTopo) -> Result<TopoCategory, MeshBridgeError> {
        self.inner.topo_category(t)
    }
    fn vertex_coord(&self, t: NativeTopo) -> Result<[f64; 3], MeshBridgeError> {
        self.inner.vertex_coord(t)
    }
    fn set_vertex_coord(&mut self, t: NativeTopo, xyz: [f64; 3]) -> Result<(), MeshBridgeError> {
        self.inner.set_vertex_coord(t, xyz)
    }
    fn vertex_uv(&self, t: NativeTopo) -> Result<(f64, f64), MeshBridgeError> {
        self.inner.vertex_uv(t)
    }
    fn set_vertex_uv(&mut self, t: NativeTopo, u: f64, v: f64) -> Result<(), MeshBridgeError> {
        self.inner.set_vertex_uv(t, u, v)
    }
    fn topo_iterator(&self, c: TopoCategory) -> Self::Cursor {
        self.inner.topo_iterator(c)
    }
    fn iterator_begin(&self, c: &mut Self::Cursor) {
        self.inner.iterator_begin(c)
    }
    fn iterator_next(&self, c: &mut Self::Cursor) {
        self.inner.iterator_next(c)
    }
    fn iterator_end(&self, c: &Self::Cursor) -> bool {
        self.inner.iterator_end(c)
    }
    fn iterator_value(&self, c: &Self::Cursor) -> NativeTopo {
        self.inner.iterator_value(c)
    }
    fn adjacency_vector(&self, t: NativeTopo, target: TopoCategory) -> Result<Vec<NativeTopo>, MeshBridgeError> {
        let mut adj = self.inner.adjacency_vector(t, target)?;
        if self.short_downward && target.dimension() < self.inner.topo_category(t)?.dimension() {
            adj.pop();
        }
        Ok(adj)
    }
    fn adjacency_id_vector(&self, t: NativeTopo, target: TopoCategory) -> Result<Vec<usize>, MeshBridgeError> {
        self.inner.adjacency_id_vector(t, target)
    }
    fn topo_by_id(&self, c: TopoCategory, id: usize) -> Result<NativeTopo, MeshBridgeError> {
        self.inner.topo_by_id(c, id)
    }
    fn create_vertex(&mut self, xyz: [f64; 3], cls: Option<Classification>) -> Result<NativeTopo, MeshBridgeError> {
        self.inner.create_vertex(xyz, cls)
    }
    fn create_edge(&mut self, v: &[NativeTopo], cls: Option<Classification>) -> Result<NativeTopo, MeshBridgeError> {
        self.inner.create_edge(v, cls)
    }
    fn create_face(&mut self, v: &[NativeTopo], cls: Option<Classification>) -> Result<NativeTopo, MeshBridgeError> {
        self.inner.create_face(v, cls)
    }
    fn create_region(
        &mut self,
        v: &[NativeTopo],
        shape: MeshShape,
        cls: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError> {
        self.inner.create_region(v, shape, cls)
    }
    fn delete_topo(&mut self, t: NativeTopo) -> Result<(), MeshBridgeError> {
        self.delete_attempts += 1;
        if self.pin_regions && self.inner.topo_category(t)? == TopoCategory::Region {
            return Err(MeshBridgeError::Native {
                op: "delete_topo",
                detail: format!("{t:?} is pinned"),
            });
        }
        self.inner.delete_topo(t)
    }
    fn classification(&self, t: NativeTopo) -> Result<Option<Classification>, MeshBridgeError> {
        self.inner.classification(t)
    }
}
