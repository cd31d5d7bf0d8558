//! Iteration over the entities of one dimension.
//!
//! A [`MeshIterator`] owns a native cursor from [`CapMesh::try_begin`] until
//! it is handed back to [`CapMesh::end`] (or dropped), which releases the
//! native resource. The cursor starts positioned on the first entity;
//! [`CapMesh::iterate`] returns the entity under the cursor and only then
//! advances, so the first call yields the first entity.
//!
//! [`CapMesh::entities`] wraps the same protocol in a Rust [`Iterator`].

use crate::algs::communicator::Communicator;
use crate::cap_mesh::CapMesh;
use crate::mesh_error::MeshBridgeError;
use crate::native::{GeometryDatabase, TopoDatabase};
use crate::topology::handle::{EntityHandle, to_entity};

/// Observable state of a live iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterState {
    /// Positioned on an entity.
    Active,
    /// Past the last entity; `iterate` returns `None`.
    Exhausted,
}

/// Cursor over the entities of one dimension.
#[derive(Debug)]
pub struct MeshIterator<Cur> {
    cursor: Cur,
    dim: usize,
}

impl<Cur> MeshIterator<Cur> {
    /// Dimension this iterator enumerates.
    pub fn dimension(&self) -> usize {
        self.dim
    }
}

impl<D, G, C> CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    /// Binds a new cursor to the entities of dimension `dim`, positioned on the first.
    pub fn try_begin(&self, dim: usize) -> Result<MeshIterator<D::Cursor>, MeshBridgeError> {
        let category = Self::category("begin", dim)?;
        let mut cursor = self.db.topo_iterator(category);
        self.db.iterator_begin(&mut cursor);
        Ok(MeshIterator { cursor, dim })
    }

    /// Returns the entity under the cursor, then advances.
    ///
    /// Past the end this returns `None` and leaves the cursor untouched.
    pub fn iterate(&self, it: &mut MeshIterator<D::Cursor>) -> Option<EntityHandle> {
        if self.db.iterator_end(&it.cursor) {
            return None;
        }
        let topo = self.db.iterator_value(&it.cursor);
        self.db.iterator_next(&mut it.cursor);
        Some(to_entity(topo))
    }

    /// Releases the cursor and its native resource.
    pub fn end(&self, it: MeshIterator<D::Cursor>) {
        drop(it);
    }

    /// Advances the cursor by one position without reading it.
    pub fn increment(&self, it: &mut MeshIterator<D::Cursor>) {
        self.db.iterator_next(&mut it.cursor);
    }

    pub fn is_done(&self, it: &MeshIterator<D::Cursor>) -> bool {
        self.db.iterator_end(&it.cursor)
    }

    /// Entity under the cursor (the "deref" of the uniform interface), without advancing.
    pub fn current(&self, it: &MeshIterator<D::Cursor>) -> Option<EntityHandle> {
        if self.db.iterator_end(&it.cursor) {
            return None;
        }
        Some(to_entity(self.db.iterator_value(&it.cursor)))
    }

    pub fn iter_state(&self, it: &MeshIterator<D::Cursor>) -> IterState {
        if self.is_done(it) {
            IterState::Exhausted
        } else {
            IterState::Active
        }
    }

    /// All entities of dimension `dim`, in native order.
    pub fn entities(&self, dim: usize) -> Result<Entities<'_, D, G, C>, MeshBridgeError> {
        Ok(Entities {
            mesh: self,
            it: self.try_begin(dim)?,
        })
    }
}

/// Borrowing [`Iterator`] over one dimension; see [`CapMesh::entities`].
pub struct Entities<'a, D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    mesh: &'a CapMesh<D, G, C>,
    it: MeshIterator<D::Cursor>,
}

impl<D, G, C> Iterator for Entities<'_, D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    type Item = EntityHandle;

    fn next(&mut self) -> Option<EntityHandle> {
        self.mesh.iterate(&mut self.it)
    }
}
