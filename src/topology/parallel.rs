//! Distributed-mesh queries answered for a single partition.
//!
//! The adapter owns the whole mesh on one participant. Every query here
//! returns the trivial single-partition answer, and refuses to run when the
//! communicator reports more than one participant.

use std::collections::BTreeSet;

use crate::algs::communicator::Communicator;
use crate::cap_mesh::CapMesh;
use crate::mesh_error::MeshBridgeError;
use crate::native::{GeometryDatabase, ModelEntity, TopoDatabase};
use crate::topology::handle::EntityHandle;

/// Copy of an entity on another part: `(part, entity on that part)`.
pub type RemoteCopy = (usize, EntityHandle);

impl<D, G, C> CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    fn serial_only(&self, op: &'static str) -> Result<(), MeshBridgeError> {
        match self.comm.size() {
            1 => Ok(()),
            size => Err(MeshBridgeError::ParallelRun { op, size }),
        }
    }

    pub fn try_is_shared(&self, _e: EntityHandle) -> Result<bool, MeshBridgeError> {
        self.serial_only("is_shared")?;
        Ok(false)
    }

    pub fn try_is_owned(&self, _e: EntityHandle) -> Result<bool, MeshBridgeError> {
        self.serial_only("is_owned")?;
        Ok(true)
    }

    pub fn try_owner(&self, _e: EntityHandle) -> Result<usize, MeshBridgeError> {
        self.serial_only("get_owner")?;
        Ok(0)
    }

    pub fn try_remotes(&self, _e: EntityHandle) -> Result<Vec<RemoteCopy>, MeshBridgeError> {
        self.serial_only("get_remotes")?;
        Ok(Vec::new())
    }

    /// Parts the entity resides on.
    pub fn try_residence(&self, _e: EntityHandle) -> Result<BTreeSet<usize>, MeshBridgeError> {
        self.serial_only("get_residence")?;
        Ok(BTreeSet::from([0]))
    }

    /// Periodic matches of the entity.
    pub fn try_matches(&self, _e: EntityHandle) -> Result<Vec<RemoteCopy>, MeshBridgeError> {
        self.serial_only("get_matches")?;
        Ok(Vec::new())
    }

    pub fn try_part_id(&self) -> Result<usize, MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("get_id"))
    }

    /// Moving entities between parts needs a synchronization protocol this adapter lacks.
    pub fn try_migrate(&mut self, _plan: &[(EntityHandle, usize)]) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("migrate"))
    }

    pub fn try_dg_copies(
        &self,
        _e: EntityHandle,
        _model: Option<ModelEntity>,
    ) -> Result<Vec<RemoteCopy>, MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("get_dg_copies"))
    }
}
