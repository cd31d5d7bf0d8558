//! In-memory reference implementation of [`TopoDatabase`].
//!
//! Records live in a hash map keyed by handle. Each record keeps its ordered
//! vertex list, its immediate boundary (`down`) and its immediate coboundary
//! (`up`); adjacency across more than one dimension is derived by walking
//! those lists. Faces and regions find-or-create their boundary edges and
//! faces, so two regions built on the same vertices share their faces.
//!
//! Handles are global and start at 1. Ids are per category and start at 0,
//! so the two spaces never coincide by accident.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use itertools::Itertools;

use super::{Classification, MeshShape, NativeTopo, TopoCategory, TopoDatabase};
use crate::mesh_error::MeshBridgeError;

const TET_FACES: &[&[usize]] = &[&[0, 1, 2], &[0, 1, 3], &[1, 2, 3], &[0, 2, 3]];
const HEX_FACES: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
    &[4, 5, 6, 7],
];
const PRISM_FACES: &[&[usize]] = &[
    &[0, 1, 2],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
    &[3, 4, 5],
];
const PYRAMID_FACES: &[&[usize]] = &[&[0, 1, 2, 3], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];

fn region_faces(shape: MeshShape) -> Option<(usize, &'static [&'static [usize]])> {
    match shape {
        MeshShape::Tetra => Some((4, TET_FACES)),
        MeshShape::Hex => Some((8, HEX_FACES)),
        MeshShape::Prism => Some((6, PRISM_FACES)),
        MeshShape::Pyramid => Some((5, PYRAMID_FACES)),
        _ => None,
    }
}

fn face_shape(n: usize) -> MeshShape {
    match n {
        3 => MeshShape::Triangle,
        4 => MeshShape::Quad,
        _ => MeshShape::Polygon,
    }
}

#[derive(Clone, Debug)]
struct TopoRecord {
    category: TopoCategory,
    shape: MeshShape,
    id: usize,
    vertices: Vec<NativeTopo>,
    down: Vec<NativeTopo>,
    up: Vec<NativeTopo>,
    xyz: [f64; 3],
    uv: (f64, f64),
    classification: Option<Classification>,
}

impl TopoRecord {
    fn new(category: TopoCategory, shape: MeshShape, id: usize) -> Self {
        TopoRecord {
            category,
            shape,
            id,
            vertices: Vec::new(),
            down: Vec::new(),
            up: Vec::new(),
            xyz: [0.0; 3],
            uv: (0.0, 0.0),
            classification: None,
        }
    }
}

/// Snapshot cursor over one category, in ascending id order.
#[derive(Clone, Debug)]
pub struct InMemoryCursor {
    entries: Vec<NativeTopo>,
    pos: usize,
}

/// Hash-map backed topological database.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTopoDatabase {
    records: HashMap<NativeTopo, TopoRecord>,
    ids: [BTreeMap<usize, NativeTopo>; 4],
    next_id: [usize; 4],
    next_handle: u64,
    /// Sorted vertex set -> edge or face, for find-or-create.
    boundary_index: HashMap<Vec<NativeTopo>, NativeTopo>,
}

impl InMemoryTopoDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, topo: NativeTopo, op: &'static str) -> Result<&TopoRecord, MeshBridgeError> {
        self.records
            .get(&topo)
            .ok_or_else(|| MeshBridgeError::native(op, format!("no record for {topo:?}")))
    }

    fn insert(&mut self, mut record: TopoRecord) -> NativeTopo {
        self.next_handle += 1;
        let topo = NativeTopo(self.next_handle);
        let cat = record.category.dimension();
        record.id = self.next_id[cat];
        self.next_id[cat] += 1;
        self.ids[cat].insert(record.id, topo);
        for &d in &record.down {
            if let Some(r) = self.records.get_mut(&d) {
                r.up.push(topo);
            }
        }
        self.records.insert(topo, record);
        topo
    }

    fn check_vertices(&self, vertices: &[NativeTopo], op: &'static str) -> Result<(), MeshBridgeError> {
        for &v in vertices {
            let rec = self.record(v, op)?;
            if rec.category != TopoCategory::Vertex {
                return Err(MeshBridgeError::native(op, format!("{v:?} is not a vertex")));
            }
        }
        if vertices.iter().duplicates().next().is_some() {
            return Err(MeshBridgeError::native(op, "repeated vertex"));
        }
        Ok(())
    }

    fn key(vertices: &[NativeTopo]) -> Vec<NativeTopo> {
        let mut key = vertices.to_vec();
        key.sort_unstable();
        key
    }

    fn find_or_create_edge(
        &mut self,
        a: NativeTopo,
        b: NativeTopo,
        classification: Option<Classification>,
    ) -> NativeTopo {
        if let Some(&e) = self.boundary_index.get(&Self::key(&[a, b])) {
            return e;
        }
        let mut rec = TopoRecord::new(TopoCategory::Edge, MeshShape::Segment, 0);
        rec.vertices = vec![a, b];
        rec.down = vec![a, b];
        rec.classification = classification;
        let e = self.insert(rec);
        self.boundary_index.insert(Self::key(&[a, b]), e);
        e
    }

    fn find_or_create_face(
        &mut self,
        vertices: &[NativeTopo],
        classification: Option<Classification>,
    ) -> NativeTopo {
        if let Some(&f) = self.boundary_index.get(&Self::key(vertices)) {
            return f;
        }
        let n = vertices.len();
        let edges: Vec<NativeTopo> = (0..n)
            .map(|i| self.find_or_create_edge(vertices[i], vertices[(i + 1) % n], classification))
            .collect();
        let mut rec = TopoRecord::new(TopoCategory::Face, face_shape(n), 0);
        rec.vertices = vertices.to_vec();
        rec.down = edges;
        rec.classification = classification;
        let f = self.insert(rec);
        self.boundary_index.insert(Self::key(vertices), f);
        f
    }

    /// Walks `down` (or `up`) lists until reaching `target`, keeping first-seen order.
    fn walk(&self, start: &[NativeTopo], from: usize, target: usize, upward: bool) -> Vec<NativeTopo> {
        let mut frontier = start.to_vec();
        let mut dim = from;
        while dim != target {
            frontier = frontier
                .iter()
                .filter_map(|t| self.records.get(t))
                .flat_map(|r| if upward { r.up.iter() } else { r.down.iter() })
                .copied()
                .unique()
                .collect();
            dim = if upward { dim + 1 } else { dim - 1 };
        }
        frontier
    }
}

impl TopoDatabase for InMemoryTopoDatabase {
    type Cursor = InMemoryCursor;

    fn num_topos(&self, category: TopoCategory) -> usize {
        self.ids[category.dimension()].len()
    }

    fn topo_shape(&self, topo: NativeTopo) -> Result<MeshShape, MeshBridgeError> {
        Ok(self.record(topo, "get_topo_shape")?.shape)
    }

    fn topo_category(&self, topo: NativeTopo) -> Result<TopoCategory, MeshBridgeError> {
        Ok(self.record(topo, "get_topo_type")?.category)
    }

    fn vertex_coord(&self, topo: NativeTopo) -> Result<[f64; 3], MeshBridgeError> {
        Ok(self.record(topo, "get_vertex_coord")?.xyz)
    }

    fn set_vertex_coord(&mut self, topo: NativeTopo, xyz: [f64; 3]) -> Result<(), MeshBridgeError> {
        let rec = self
            .records
            .get_mut(&topo)
            .ok_or_else(|| MeshBridgeError::native("set_vertex_coord", format!("no record for {topo:?}")))?;
        rec.xyz = xyz;
        Ok(())
    }

    fn vertex_uv(&self, topo: NativeTopo) -> Result<(f64, f64), MeshBridgeError> {
        Ok(self.record(topo, "get_vertex_uv_parameters")?.uv)
    }

    fn set_vertex_uv(&mut self, topo: NativeTopo, u: f64, v: f64) -> Result<(), MeshBridgeError> {
        let rec = self.records.get_mut(&topo).ok_or_else(|| {
            MeshBridgeError::native("set_vertex_uv_parameters", format!("no record for {topo:?}"))
        })?;
        rec.uv = (u, v);
        Ok(())
    }

    fn topo_iterator(&self, category: TopoCategory) -> InMemoryCursor {
        InMemoryCursor {
            entries: self.ids[category.dimension()].values().copied().collect(),
            pos: 0,
        }
    }

    fn iterator_begin(&self, cursor: &mut InMemoryCursor) {
        cursor.pos = 0;
    }

    fn iterator_next(&self, cursor: &mut InMemoryCursor) {
        if cursor.pos < cursor.entries.len() {
            cursor.pos += 1;
        }
    }

    fn iterator_end(&self, cursor: &InMemoryCursor) -> bool {
        cursor.pos >= cursor.entries.len()
    }

    fn iterator_value(&self, cursor: &InMemoryCursor) -> NativeTopo {
        cursor.entries.get(cursor.pos).copied().unwrap_or(NativeTopo::NULL)
    }

    fn adjacency_vector(
        &self,
        topo: NativeTopo,
        target: TopoCategory,
    ) -> Result<Vec<NativeTopo>, MeshBridgeError> {
        let rec = self.record(topo, "get_adjacency_vector")?;
        let from = rec.category.dimension();
        let to = target.dimension();
        Ok(if to == from {
            vec![topo]
        } else if to < from {
            if target == TopoCategory::Vertex {
                rec.vertices.clone()
            } else {
                self.walk(&rec.down, from - 1, to, false)
            }
        } else {
            self.walk(&rec.up, from + 1, to, true)
        })
    }

    fn adjacency_id_vector(
        &self,
        topo: NativeTopo,
        target: TopoCategory,
    ) -> Result<Vec<usize>, MeshBridgeError> {
        self.adjacency_vector(topo, target)?
            .into_iter()
            .map(|t| self.record(t, "get_adjacency_id_vector").map(|r| r.id))
            .collect()
    }

    fn topo_by_id(&self, category: TopoCategory, id: usize) -> Result<NativeTopo, MeshBridgeError> {
        self.ids[category.dimension()]
            .get(&id)
            .copied()
            .ok_or_else(|| MeshBridgeError::native("get_topo_by_id", format!("no {category:?} with id {id}")))
    }

    fn create_vertex(
        &mut self,
        xyz: [f64; 3],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError> {
        let mut rec = TopoRecord::new(TopoCategory::Vertex, MeshShape::Node, 0);
        rec.xyz = xyz;
        rec.classification = classification;
        Ok(self.insert(rec))
    }

    fn create_edge(
        &mut self,
        vertices: &[NativeTopo],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError> {
        const OP: &str = "create_edge";
        if vertices.len() != 2 {
            return Err(MeshBridgeError::native(OP, format!("expected 2 vertices, got {}", vertices.len())));
        }
        self.check_vertices(vertices, OP)?;
        if self.boundary_index.contains_key(&Self::key(vertices)) {
            return Err(MeshBridgeError::native(OP, "edge already exists"));
        }
        Ok(self.find_or_create_edge(vertices[0], vertices[1], classification))
    }

    fn create_face(
        &mut self,
        vertices: &[NativeTopo],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError> {
        const OP: &str = "create_face";
        if vertices.len() < 3 {
            return Err(MeshBridgeError::native(OP, format!("expected at least 3 vertices, got {}", vertices.len())));
        }
        self.check_vertices(vertices, OP)?;
        if self.boundary_index.contains_key(&Self::key(vertices)) {
            return Err(MeshBridgeError::native(OP, "face already exists"));
        }
        Ok(self.find_or_create_face(vertices, classification))
    }

    fn create_region(
        &mut self,
        vertices: &[NativeTopo],
        shape: MeshShape,
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError> {
        const OP: &str = "create_region";
        let (count, faces) = region_faces(shape)
            .ok_or_else(|| MeshBridgeError::native(OP, format!("{shape:?} is not a region shape")))?;
        if vertices.len() != count {
            return Err(MeshBridgeError::native(
                OP,
                format!("{shape:?} needs {count} vertices, got {}", vertices.len()),
            ));
        }
        self.check_vertices(vertices, OP)?;
        let down: Vec<NativeTopo> = faces
            .iter()
            .map(|local| {
                let fv: Vec<NativeTopo> = local.iter().map(|&i| vertices[i]).collect();
                self.find_or_create_face(&fv, classification)
            })
            .collect();
        let mut rec = TopoRecord::new(TopoCategory::Region, shape, 0);
        rec.vertices = vertices.to_vec();
        rec.down = down;
        rec.classification = classification;
        Ok(self.insert(rec))
    }

    fn delete_topo(&mut self, topo: NativeTopo) -> Result<(), MeshBridgeError> {
        const OP: &str = "delete_topo";
        let rec = self.record(topo, OP)?;
        if !rec.up.is_empty() {
            return Err(MeshBridgeError::native(
                OP,
                format!("{topo:?} still bounds {} entities", rec.up.len()),
            ));
        }
        let Some(rec) = self.records.remove(&topo) else {
            return Err(MeshBridgeError::native(OP, format!("no record for {topo:?}")));
        };
        for d in &rec.down {
            if let Some(r) = self.records.get_mut(d) {
                r.up.retain(|&u| u != topo);
            }
        }
        if matches!(rec.category, TopoCategory::Edge | TopoCategory::Face) {
            self.boundary_index.remove(&Self::key(&rec.vertices));
        }
        self.ids[rec.category.dimension()].remove(&rec.id);
        Ok(())
    }

    fn classification(&self, topo: NativeTopo) -> Result<Option<Classification>, MeshBridgeError> {
        Ok(self.record(topo, "get_geom_entity")?.classification)
    }
}
