//! The uniform mesh interface consumed by downstream layers.
//!
//! [`Mesh`] has no error channel: every failure terminates through
//! [`fatal`](crate::mesh_error::fatal) with a message naming the operation.
//! Callers that need to inspect failures use the `try_*` methods of
//! [`CapMesh`] directly.

use std::collections::BTreeSet;

use crate::algs::communicator::Communicator;
use crate::cap_mesh::CapMesh;
use crate::data::tags::{TagHandle, TagKind};
use crate::mesh_error::{MeshBridgeError, OrFatal, fatal};
use crate::native::{GeometryDatabase, ModelEntity, TopoDatabase};
use crate::topology::adjacency::has_adjacency;
use crate::topology::entity_type::EntityType;
use crate::topology::handle::EntityHandle;
use crate::topology::iterator::MeshIterator;
use crate::topology::parallel::RemoteCopy;

/// Infallible mesh interface.
pub trait Mesh {
    /// Cursor returned by [`begin`](Self::begin).
    type Iter;

    fn dimension(&self) -> usize;
    fn count(&self, dim: usize) -> usize;
    fn entity_type(&self, e: EntityHandle) -> EntityType;
    fn entity_dimension(&self, e: EntityHandle) -> usize;

    fn point(&self, e: EntityHandle) -> [f64; 3];
    fn set_point(&mut self, e: EntityHandle, xyz: [f64; 3]);
    fn param(&self, e: EntityHandle) -> [f64; 3];
    fn set_param(&mut self, e: EntityHandle, p: [f64; 3]);
    fn to_model(&self, e: EntityHandle) -> Option<ModelEntity>;
    fn set_model_entity(&mut self, e: EntityHandle, model: ModelEntity);

    fn begin(&self, dim: usize) -> Self::Iter;
    fn iterate(&self, it: &mut Self::Iter) -> Option<EntityHandle>;
    fn end(&self, it: Self::Iter);
    fn increment(&self, it: &mut Self::Iter);
    fn is_done(&self, it: &Self::Iter) -> bool;
    fn deref(&self, it: &Self::Iter) -> Option<EntityHandle>;

    fn get_adjacent(&self, e: EntityHandle, dim: usize) -> Vec<EntityHandle>;
    fn get_downward(&self, e: EntityHandle, dim: usize, down: &mut Vec<EntityHandle>) -> usize;
    fn get_upward(&self, e: EntityHandle, i: usize) -> Option<EntityHandle>;
    fn get_up(&self, e: EntityHandle) -> Vec<EntityHandle>;
    fn count_upward(&self, e: EntityHandle) -> usize;
    fn has_up(&self, e: EntityHandle) -> bool;
    fn has_adjacency(&self, from_dim: usize, to_dim: usize) -> bool {
        has_adjacency(from_dim, to_dim)
    }
    fn create_adjacency(&mut self, from_dim: usize, to_dim: usize);
    fn delete_adjacency(&mut self, from_dim: usize, to_dim: usize);

    fn create_vertex(&mut self, model: Option<ModelEntity>, xyz: [f64; 3], param: [f64; 3]) -> EntityHandle;
    fn create_entity(&mut self, ty: EntityType, model: Option<ModelEntity>, down: &[EntityHandle]) -> EntityHandle;
    fn destroy(&mut self, e: EntityHandle);

    fn create_int_tag(&mut self, name: &str, count: usize) -> TagHandle;
    fn create_double_tag(&mut self, name: &str, count: usize) -> TagHandle;
    fn create_long_tag(&mut self, name: &str, count: usize) -> TagHandle;
    fn destroy_tag(&mut self, tag: TagHandle);
    fn find_tag(&self, name: &str) -> Option<TagHandle>;
    /// Live tags in creation order.
    fn tags(&self) -> Vec<TagHandle>;
    fn tag_kind(&self, tag: TagHandle) -> TagKind;
    fn tag_size(&self, tag: TagHandle) -> usize;
    fn tag_name(&self, tag: TagHandle) -> &str;
    fn rename_tag(&mut self, tag: TagHandle, name: &str);
    fn tag_checksum(&self, tag: TagHandle, kind: usize) -> u32;
    fn get_int_tag(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [i32]);
    fn set_int_tag(&mut self, e: EntityHandle, tag: TagHandle, values: &[i32]);
    fn get_double_tag(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [f64]);
    fn set_double_tag(&mut self, e: EntityHandle, tag: TagHandle, values: &[f64]);
    fn get_long_tag(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [i64]);
    fn set_long_tag(&mut self, e: EntityHandle, tag: TagHandle, values: &[i64]);
    fn has_tag(&self, e: EntityHandle, tag: TagHandle) -> bool;
    fn remove_tag(&mut self, e: EntityHandle, tag: TagHandle);

    fn is_shared(&self, e: EntityHandle) -> bool;
    fn is_owned(&self, e: EntityHandle) -> bool;
    fn owner(&self, e: EntityHandle) -> usize;
    fn remotes(&self, e: EntityHandle) -> Vec<RemoteCopy>;
    fn residence(&self, e: EntityHandle) -> BTreeSet<usize>;
    fn matches(&self, e: EntityHandle) -> Vec<RemoteCopy>;
    fn id(&self) -> usize;
    fn migrate(&mut self, plan: &[(EntityHandle, usize)]);
    fn dg_copies(&self, e: EntityHandle, model: Option<ModelEntity>) -> Vec<RemoteCopy>;

    fn verify(&self);
    fn write_native(&self, path: &str);
    fn destroy_native(&mut self);
}

impl<D, G, C> Mesh for CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    type Iter = MeshIterator<D::Cursor>;

    fn dimension(&self) -> usize {
        CapMesh::dimension(self)
    }

    fn count(&self, dim: usize) -> usize {
        self.try_count(dim).or_fatal()
    }

    fn entity_type(&self, e: EntityHandle) -> EntityType {
        self.try_entity_type(e).or_fatal()
    }

    fn entity_dimension(&self, e: EntityHandle) -> usize {
        self.try_entity_dimension(e).or_fatal()
    }

    fn point(&self, e: EntityHandle) -> [f64; 3] {
        self.try_point(e).or_fatal()
    }

    fn set_point(&mut self, e: EntityHandle, xyz: [f64; 3]) {
        self.try_set_point(e, xyz).or_fatal()
    }

    fn param(&self, e: EntityHandle) -> [f64; 3] {
        self.try_param(e).or_fatal()
    }

    fn set_param(&mut self, e: EntityHandle, p: [f64; 3]) {
        self.try_set_param(e, p).or_fatal()
    }

    fn to_model(&self, e: EntityHandle) -> Option<ModelEntity> {
        self.try_to_model(e).or_fatal()
    }

    fn set_model_entity(&mut self, e: EntityHandle, model: ModelEntity) {
        self.try_set_model_entity(e, model).or_fatal()
    }

    fn begin(&self, dim: usize) -> Self::Iter {
        self.try_begin(dim).or_fatal()
    }

    fn iterate(&self, it: &mut Self::Iter) -> Option<EntityHandle> {
        CapMesh::iterate(self, it)
    }

    fn end(&self, it: Self::Iter) {
        CapMesh::end(self, it)
    }

    fn increment(&self, it: &mut Self::Iter) {
        CapMesh::increment(self, it)
    }

    fn is_done(&self, it: &Self::Iter) -> bool {
        CapMesh::is_done(self, it)
    }

    fn deref(&self, it: &Self::Iter) -> Option<EntityHandle> {
        self.current(it)
    }

    fn get_adjacent(&self, e: EntityHandle, dim: usize) -> Vec<EntityHandle> {
        self.try_get_adjacent(e, dim).or_fatal()
    }

    fn get_downward(&self, e: EntityHandle, dim: usize, down: &mut Vec<EntityHandle>) -> usize {
        self.try_get_downward(e, dim, down).or_fatal()
    }

    fn get_upward(&self, e: EntityHandle, i: usize) -> Option<EntityHandle> {
        self.try_get_upward(e, i).or_fatal()
    }

    fn get_up(&self, e: EntityHandle) -> Vec<EntityHandle> {
        self.try_get_up(e).or_fatal()
    }

    fn count_upward(&self, e: EntityHandle) -> usize {
        self.try_count_upward(e).or_fatal()
    }

    fn has_up(&self, e: EntityHandle) -> bool {
        self.try_has_up(e).or_fatal()
    }

    fn create_adjacency(&mut self, from_dim: usize, to_dim: usize) {
        self.try_create_adjacency(from_dim, to_dim).or_fatal()
    }

    fn delete_adjacency(&mut self, from_dim: usize, to_dim: usize) {
        self.try_delete_adjacency(from_dim, to_dim).or_fatal()
    }

    fn create_vertex(&mut self, model: Option<ModelEntity>, xyz: [f64; 3], param: [f64; 3]) -> EntityHandle {
        self.try_create_vertex(model, xyz, param).or_fatal()
    }

    fn create_entity(&mut self, ty: EntityType, model: Option<ModelEntity>, down: &[EntityHandle]) -> EntityHandle {
        self.try_create_entity(ty, model, down).or_fatal()
    }

    fn destroy(&mut self, e: EntityHandle) {
        self.try_destroy(e).or_fatal()
    }

    fn create_int_tag(&mut self, name: &str, count: usize) -> TagHandle {
        self.try_create_tag(name, TagKind::Int, count).or_fatal()
    }

    fn create_double_tag(&mut self, name: &str, count: usize) -> TagHandle {
        self.try_create_tag(name, TagKind::Double, count).or_fatal()
    }

    fn create_long_tag(&mut self, name: &str, count: usize) -> TagHandle {
        self.try_create_tag(name, TagKind::Long, count).or_fatal()
    }

    fn destroy_tag(&mut self, tag: TagHandle) {
        self.try_destroy_tag(tag).or_fatal()
    }

    fn find_tag(&self, name: &str) -> Option<TagHandle> {
        CapMesh::find_tag(self, name)
    }

    fn tags(&self) -> Vec<TagHandle> {
        self.tags.handles()
    }

    fn tag_kind(&self, tag: TagHandle) -> TagKind {
        self.tags.kind(tag).or_fatal()
    }

    fn tag_size(&self, tag: TagHandle) -> usize {
        self.tags.size(tag).or_fatal()
    }

    fn tag_name(&self, tag: TagHandle) -> &str {
        self.tags.name(tag).or_fatal()
    }

    fn rename_tag(&mut self, tag: TagHandle, name: &str) {
        self.try_rename_tag(tag, name).or_fatal()
    }

    fn tag_checksum(&self, tag: TagHandle, kind: usize) -> u32 {
        self.try_tag_checksum(tag, kind).or_fatal()
    }

    fn get_int_tag(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [i32]) {
        self.try_get_tag(e, tag, out).or_fatal()
    }

    fn set_int_tag(&mut self, e: EntityHandle, tag: TagHandle, values: &[i32]) {
        self.try_set_tag(e, tag, values).or_fatal()
    }

    fn get_double_tag(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [f64]) {
        self.try_get_tag(e, tag, out).or_fatal()
    }

    fn set_double_tag(&mut self, e: EntityHandle, tag: TagHandle, values: &[f64]) {
        self.try_set_tag(e, tag, values).or_fatal()
    }

    fn get_long_tag(&mut self, _e: EntityHandle, _tag: TagHandle, _out: &mut [i64]) {
        fatal(MeshBridgeError::Unsupported("get_long_tag"))
    }

    fn set_long_tag(&mut self, _e: EntityHandle, _tag: TagHandle, _values: &[i64]) {
        fatal(MeshBridgeError::Unsupported("set_long_tag"))
    }

    fn has_tag(&self, e: EntityHandle, tag: TagHandle) -> bool {
        self.try_has_tag(e, tag).or_fatal()
    }

    fn remove_tag(&mut self, e: EntityHandle, tag: TagHandle) {
        self.try_remove_tag(e, tag).or_fatal()
    }

    fn is_shared(&self, e: EntityHandle) -> bool {
        self.try_is_shared(e).or_fatal()
    }

    fn is_owned(&self, e: EntityHandle) -> bool {
        self.try_is_owned(e).or_fatal()
    }

    fn owner(&self, e: EntityHandle) -> usize {
        self.try_owner(e).or_fatal()
    }

    fn remotes(&self, e: EntityHandle) -> Vec<RemoteCopy> {
        self.try_remotes(e).or_fatal()
    }

    fn residence(&self, e: EntityHandle) -> BTreeSet<usize> {
        self.try_residence(e).or_fatal()
    }

    fn matches(&self, e: EntityHandle) -> Vec<RemoteCopy> {
        self.try_matches(e).or_fatal()
    }

    fn id(&self) -> usize {
        self.try_part_id().or_fatal()
    }

    fn migrate(&mut self, plan: &[(EntityHandle, usize)]) {
        self.try_migrate(plan).or_fatal()
    }

    fn dg_copies(&self, e: EntityHandle, model: Option<ModelEntity>) -> Vec<RemoteCopy> {
        self.try_dg_copies(e, model).or_fatal()
    }

    fn verify(&self) {
        self.try_verify().or_fatal()
    }

    fn write_native(&self, path: &str) {
        self.try_write_native(path).or_fatal()
    }

    fn destroy_native(&mut self) {
        self.try_destroy_native().or_fatal()
    }
}
