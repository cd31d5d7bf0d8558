//! Contract of the native topological database and geometric model.
//!
//! The adapter never stores topology itself. Everything it knows about
//! entities comes through [`TopoDatabase`], which hands out opaque numeric
//! [`NativeTopo`] handles, and [`GeometryDatabase`], which translates model
//! entities used for classification.
//!
//! [`in_memory::InMemoryTopoDatabase`] and [`geometry::InMemoryGeometry`] are
//! complete reference implementations of both contracts.

pub mod geometry;
pub mod in_memory;

pub use geometry::InMemoryGeometry;
pub use in_memory::InMemoryTopoDatabase;

use std::fmt;

use crate::mesh_error::MeshBridgeError;

/// Raw native topology handle. `0` means "no entity".
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct NativeTopo(pub u64);

impl NativeTopo {
    pub const NULL: NativeTopo = NativeTopo(0);

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NativeTopo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeTopo").field(&self.0).finish()
    }
}

/// Raw native handle of a geometric-model entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct GeomTopo(pub u64);

/// Native topology categories; one per dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TopoCategory {
    Vertex,
    Edge,
    Face,
    Region,
}

impl TopoCategory {
    pub const ALL: [TopoCategory; 4] = [
        TopoCategory::Vertex,
        TopoCategory::Edge,
        TopoCategory::Face,
        TopoCategory::Region,
    ];

    #[inline]
    pub const fn dimension(self) -> usize {
        match self {
            TopoCategory::Vertex => 0,
            TopoCategory::Edge => 1,
            TopoCategory::Face => 2,
            TopoCategory::Region => 3,
        }
    }

    /// Category enumerating entities of dimension `dim`.
    pub fn from_dimension(dim: usize) -> Option<Self> {
        TopoCategory::ALL.get(dim).copied()
    }
}

/// Native shape classification of a topology record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeshShape {
    Node,
    Segment,
    Triangle,
    Quad,
    Polygon,
    Tetra,
    Hex,
    Prism,
    Pyramid,
    Polyhedron,
    Unknown,
}

/// Native category of a geometric-model entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeomTopoType {
    GVertex,
    GEdge,
    GFace,
    GRegion,
}

impl GeomTopoType {
    /// Maps a model-entity dimension onto the native category.
    pub fn from_dimension(dim: usize) -> Option<Self> {
        match dim {
            0 => Some(GeomTopoType::GVertex),
            1 => Some(GeomTopoType::GEdge),
            2 => Some(GeomTopoType::GFace),
            3 => Some(GeomTopoType::GRegion),
            _ => None,
        }
    }

    pub const fn dimension(self) -> usize {
        match self {
            GeomTopoType::GVertex => 0,
            GeomTopoType::GEdge => 1,
            GeomTopoType::GFace => 2,
            GeomTopoType::GRegion => 3,
        }
    }
}

/// Geometric classification passed through at creation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Classification {
    pub kind: GeomTopoType,
    pub entity: GeomTopo,
}

/// Opaque reference to a geometric-model entity as seen by downstream code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ModelEntity {
    dim: u8,
    tag: i32,
}

impl ModelEntity {
    pub const fn new(dim: u8, tag: i32) -> Self {
        ModelEntity { dim, tag }
    }

    #[inline]
    pub const fn dimension(self) -> usize {
        self.dim as usize
    }

    #[inline]
    pub const fn tag(self) -> i32 {
        self.tag
    }
}

/// Operations the adapter consumes from the native topological database.
///
/// Cursors are owned by the caller between [`topo_iterator`](Self::topo_iterator)
/// and drop; a cursor is positioned on its first entity by
/// [`iterator_begin`](Self::iterator_begin).
pub trait TopoDatabase {
    type Cursor;

    fn num_topos(&self, category: TopoCategory) -> usize;
    fn topo_shape(&self, topo: NativeTopo) -> Result<MeshShape, MeshBridgeError>;
    fn topo_category(&self, topo: NativeTopo) -> Result<TopoCategory, MeshBridgeError>;

    fn is_vertex(&self, topo: NativeTopo) -> bool {
        matches!(self.topo_category(topo), Ok(TopoCategory::Vertex))
    }

    fn vertex_coord(&self, topo: NativeTopo) -> Result<[f64; 3], MeshBridgeError>;
    fn set_vertex_coord(&mut self, topo: NativeTopo, xyz: [f64; 3]) -> Result<(), MeshBridgeError>;
    /// Parametric `(u, v)` of a vertex on its classifying model entity.
    fn vertex_uv(&self, topo: NativeTopo) -> Result<(f64, f64), MeshBridgeError>;
    fn set_vertex_uv(&mut self, topo: NativeTopo, u: f64, v: f64) -> Result<(), MeshBridgeError>;

    // --- cursors ---
    fn topo_iterator(&self, category: TopoCategory) -> Self::Cursor;
    fn iterator_begin(&self, cursor: &mut Self::Cursor);
    fn iterator_next(&self, cursor: &mut Self::Cursor);
    fn iterator_end(&self, cursor: &Self::Cursor) -> bool;
    /// Value under the cursor; [`NativeTopo::NULL`] past the end.
    fn iterator_value(&self, cursor: &Self::Cursor) -> NativeTopo;

    // --- adjacency ---
    /// All entities of `target` connected to `topo`, in native order.
    fn adjacency_vector(
        &self,
        topo: NativeTopo,
        target: TopoCategory,
    ) -> Result<Vec<NativeTopo>, MeshBridgeError>;
    /// Same set as [`adjacency_vector`](Self::adjacency_vector), as per-category ids.
    fn adjacency_id_vector(
        &self,
        topo: NativeTopo,
        target: TopoCategory,
    ) -> Result<Vec<usize>, MeshBridgeError>;
    fn topo_by_id(&self, category: TopoCategory, id: usize) -> Result<NativeTopo, MeshBridgeError>;

    // --- construction ---
    fn create_vertex(
        &mut self,
        xyz: [f64; 3],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError>;
    fn create_edge(
        &mut self,
        vertices: &[NativeTopo],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError>;
    fn create_face(
        &mut self,
        vertices: &[NativeTopo],
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError>;
    fn create_region(
        &mut self,
        vertices: &[NativeTopo],
        shape: MeshShape,
        classification: Option<Classification>,
    ) -> Result<NativeTopo, MeshBridgeError>;
    fn delete_topo(&mut self, topo: NativeTopo) -> Result<(), MeshBridgeError>;

    fn classification(&self, topo: NativeTopo) -> Result<Option<Classification>, MeshBridgeError>;
}

/// Operations the adapter consumes from the geometric model.
pub trait GeometryDatabase {
    fn to_native(&self, entity: ModelEntity) -> Result<GeomTopo, MeshBridgeError>;
    fn from_native(&self, gtopo: GeomTopo) -> Option<ModelEntity>;
}
