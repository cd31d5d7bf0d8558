//! `CapMesh`: one adapter instance over one open native database.
//!
//! The adapter exclusively owns the native database, the geometric model,
//! the process-group handle and every tag created through it. Operations
//! are split across modules by concern:
//!
//! - [`topology::iterator`](crate::topology::iterator): begin/iterate/end
//! - [`topology::adjacency`](crate::topology::adjacency): adjacency queries
//! - [`topology::construct`](crate::topology::construct): creation/destruction
//! - [`topology::parallel`](crate::topology::parallel): single-partition guards
//!
//! Inherent methods return `Result`; the [`Mesh`](crate::mesh::Mesh) trait
//! wraps them with fatal termination.

use crate::algs::communicator::{Communicator, NoComm};
use crate::config::AdapterOptions;
use crate::data::tags::{TagHandle, TagKind, TagStore, TagValue};
use crate::mesh_error::MeshBridgeError;
use crate::native::{
    Classification, GeomTopoType, GeometryDatabase, ModelEntity, TopoCategory, TopoDatabase,
};
use crate::topology::entity_type::EntityType;
use crate::topology::handle::{EntityHandle, from_entity};

/// Adapter exposing a native topological database through the uniform interface.
pub struct CapMesh<D, G, C = NoComm>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    pub(crate) db: D,
    pub(crate) geometry: G,
    pub(crate) comm: C,
    pub(crate) options: AdapterOptions,
    pub(crate) tags: TagStore,
    dim: usize,
}

impl<D, G> CapMesh<D, G, NoComm>
where
    D: TopoDatabase,
    G: GeometryDatabase,
{
    /// Opens a serial adapter with default options.
    pub fn open(db: D, geometry: G) -> Self {
        Self::new(db, geometry, NoComm, AdapterOptions::default())
    }
}

impl<D, G, C> CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    /// Opens an adapter. The mesh is 3-dimensional iff the database holds regions.
    pub fn new(db: D, geometry: G, comm: C, options: AdapterOptions) -> Self {
        let regions = db.num_topos(TopoCategory::Region);
        let dim = if regions > 0 { 3 } else { 2 };
        log::debug!(
            "opened native mesh: dim={dim}, counts=[{}, {}, {}, {regions}], rank {}/{}",
            db.num_topos(TopoCategory::Vertex),
            db.num_topos(TopoCategory::Edge),
            db.num_topos(TopoCategory::Face),
            comm.rank(),
            comm.size(),
        );
        CapMesh {
            db,
            geometry,
            comm,
            options,
            tags: TagStore::new(),
            dim,
        }
    }

    /// Tears the adapter down: destroys every tag, then hands back the databases.
    pub fn into_parts(mut self) -> (D, G) {
        self.tags.clear();
        (self.db, self.geometry)
    }

    /// Mesh dimension, fixed when the adapter was opened.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn native(&self) -> &D {
        &self.db
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn communicator(&self) -> &C {
        &self.comm
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn tag_store(&self) -> &TagStore {
        &self.tags
    }

    pub(crate) fn category(op: &'static str, dim: usize) -> Result<TopoCategory, MeshBridgeError> {
        TopoCategory::from_dimension(dim).ok_or(MeshBridgeError::DimensionOutOfRange { op, dim })
    }

    /// Number of entities of dimension `dim`.
    pub fn try_count(&self, dim: usize) -> Result<usize, MeshBridgeError> {
        Ok(self.db.num_topos(Self::category("count", dim)?))
    }

    /// Topological type of `e`, from its native shape.
    pub fn try_entity_type(&self, e: EntityHandle) -> Result<EntityType, MeshBridgeError> {
        EntityType::from_shape(self.db.topo_shape(from_entity(e))?)
    }

    /// Dimension of `e`, from its native category.
    pub fn try_entity_dimension(&self, e: EntityHandle) -> Result<usize, MeshBridgeError> {
        Ok(self.db.topo_category(from_entity(e))?.dimension())
    }

    fn require_vertex(&self, e: EntityHandle, op: &'static str) -> Result<(), MeshBridgeError> {
        let category = self.db.topo_category(from_entity(e))?;
        if category != TopoCategory::Vertex {
            return Err(MeshBridgeError::NotAVertex { op, category });
        }
        Ok(())
    }

    /// Coordinates of vertex `e`.
    pub fn try_point(&self, e: EntityHandle) -> Result<[f64; 3], MeshBridgeError> {
        self.require_vertex(e, "get_point")?;
        self.db.vertex_coord(from_entity(e))
    }

    pub fn try_set_point(&mut self, e: EntityHandle, xyz: [f64; 3]) -> Result<(), MeshBridgeError> {
        self.require_vertex(e, "set_point")?;
        self.db.set_vertex_coord(from_entity(e), xyz)
    }

    /// Parametric coordinates `(u, v, 0)` of vertex `e` on its model entity.
    pub fn try_param(&self, e: EntityHandle) -> Result<[f64; 3], MeshBridgeError> {
        let (u, v) = self.db.vertex_uv(from_entity(e))?;
        Ok([u, v, 0.0])
    }

    pub fn try_set_param(&mut self, e: EntityHandle, p: [f64; 3]) -> Result<(), MeshBridgeError> {
        self.db.set_vertex_uv(from_entity(e), p[0], p[1])
    }

    /// Model entity `e` is classified on, if any.
    pub fn try_to_model(&self, e: EntityHandle) -> Result<Option<ModelEntity>, MeshBridgeError> {
        Ok(self
            .db
            .classification(from_entity(e))?
            .and_then(|c| self.geometry.from_native(c.entity)))
    }

    /// Reclassification is owned by the native database.
    pub fn try_set_model_entity(
        &mut self,
        _e: EntityHandle,
        _model: ModelEntity,
    ) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("set_model_entity"))
    }

    /// Native classification for an optional model entity.
    pub(crate) fn classify(
        &self,
        model: Option<ModelEntity>,
    ) -> Result<Option<Classification>, MeshBridgeError> {
        let Some(m) = model else {
            return Ok(None);
        };
        let kind = GeomTopoType::from_dimension(m.dimension()).ok_or(
            MeshBridgeError::DimensionOutOfRange {
                op: "classify",
                dim: m.dimension(),
            },
        )?;
        Ok(Some(Classification {
            kind,
            entity: self.geometry.to_native(m)?,
        }))
    }

    pub fn try_verify(&self) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("verify"))
    }

    pub fn try_write_native(&self, _path: &str) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("write_native"))
    }

    pub fn try_destroy_native(&mut self) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("destroy_native"))
    }

    // --- tags ---

    pub fn try_create_tag(
        &mut self,
        name: &str,
        kind: TagKind,
        count: usize,
    ) -> Result<TagHandle, MeshBridgeError> {
        self.tags.create(name, kind, count)
    }

    pub fn find_tag(&self, name: &str) -> Option<TagHandle> {
        self.tags.find(name)
    }

    pub fn try_destroy_tag(&mut self, tag: TagHandle) -> Result<(), MeshBridgeError> {
        self.tags.destroy(tag)
    }

    pub fn try_rename_tag(&mut self, _tag: TagHandle, _name: &str) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("rename_tag"))
    }

    pub fn try_tag_checksum(&self, _tag: TagHandle, _kind: usize) -> Result<u32, MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("get_tag_checksum"))
    }

    pub fn try_get_tag<T: TagValue>(
        &mut self,
        e: EntityHandle,
        tag: TagHandle,
        out: &mut [T],
    ) -> Result<(), MeshBridgeError> {
        self.tags.get(e, tag, out)
    }

    pub fn try_set_tag<T: TagValue>(
        &mut self,
        e: EntityHandle,
        tag: TagHandle,
        values: &[T],
    ) -> Result<(), MeshBridgeError> {
        self.tags.set(e, tag, values)
    }

    pub fn try_has_tag(&self, e: EntityHandle, tag: TagHandle) -> Result<bool, MeshBridgeError> {
        self.tags.has(e, tag)
    }

    pub fn try_remove_tag(&mut self, e: EntityHandle, tag: TagHandle) -> Result<(), MeshBridgeError> {
        self.tags.remove(e, tag)
    }
}
