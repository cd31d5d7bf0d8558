//! Reference geometric model: a flat list of model entities by dimension and tag.

use hashbrown::HashMap;

use super::{GeomTopo, GeometryDatabase, ModelEntity};
use crate::mesh_error::MeshBridgeError;

/// Geometric model holding only the entity identities needed for classification.
#[derive(Clone, Debug, Default)]
pub struct InMemoryGeometry {
    to_native: HashMap<ModelEntity, GeomTopo>,
    from_native: HashMap<GeomTopo, ModelEntity>,
    next: u64,
}

impl InMemoryGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model entity of dimension `dim` with user tag `tag`.
    ///
    /// Registering the same `(dim, tag)` twice returns the existing entity.
    pub fn add_entity(&mut self, dim: u8, tag: i32) -> ModelEntity {
        let entity = ModelEntity::new(dim, tag);
        if !self.to_native.contains_key(&entity) {
            self.next += 1;
            let g = GeomTopo(self.next);
            self.to_native.insert(entity, g);
            self.from_native.insert(g, entity);
        }
        entity
    }

    pub fn len(&self) -> usize {
        self.to_native.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_native.is_empty()
    }
}

impl GeometryDatabase for InMemoryGeometry {
    fn to_native(&self, entity: ModelEntity) -> Result<GeomTopo, MeshBridgeError> {
        self.to_native
            .get(&entity)
            .copied()
            .ok_or_else(|| MeshBridgeError::Geometry {
                op: "to_native",
                detail: format!("model entity {entity:?} is not registered"),
            })
    }

    fn from_native(&self, gtopo: GeomTopo) -> Option<ModelEntity> {
        self.from_native.get(&gtopo).copied()
    }
}
