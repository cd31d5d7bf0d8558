//! Adjacency queries dispatched by native category.
//!
//! The native database answers one directional query per call, so each
//! `(source category, target category)` pair is resolved explicitly by
//! [`adjacency_query`]. Downward results are validated against
//! [`EntityType::downward_count`](crate::topology::entity_type::EntityType::downward_count).
//! Upward entities are resolved by id because the native database does
//! not expose indexed upward adjacency as handles.

use crate::algs::communicator::Communicator;
use crate::cap_mesh::CapMesh;
use crate::mesh_error::MeshBridgeError;
use crate::native::{GeometryDatabase, TopoCategory, TopoDatabase};
use crate::topology::handle::{EntityHandle, from_entity, try_to_entity};

/// How one adjacency pair is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdjacencyQuery {
    /// Same dimension: the entity itself.
    Identity,
    /// Native query toward a lower category.
    Downward(TopoCategory),
    /// Native query toward a higher category.
    Upward(TopoCategory),
}

/// Dispatch table over every `(source, target)` category pair.
pub const fn adjacency_query(source: TopoCategory, target: TopoCategory) -> AdjacencyQuery {
    use AdjacencyQuery::{Downward, Identity, Upward};
    use TopoCategory::{Edge, Face, Region, Vertex};
    match (source, target) {
        (Vertex, Vertex) => Identity,
        (Vertex, Edge) => Upward(Edge),
        (Vertex, Face) => Upward(Face),
        (Vertex, Region) => Upward(Region),

        (Edge, Vertex) => Downward(Vertex),
        (Edge, Edge) => Identity,
        (Edge, Face) => Upward(Face),
        (Edge, Region) => Upward(Region),

        (Face, Vertex) => Downward(Vertex),
        (Face, Edge) => Downward(Edge),
        (Face, Face) => Identity,
        (Face, Region) => Upward(Region),

        (Region, Vertex) => Downward(Vertex),
        (Region, Edge) => Downward(Edge),
        (Region, Face) => Downward(Face),
        (Region, Region) => Identity,
    }
}

/// Category one dimension above `source`, if any.
pub const fn upward_category(source: TopoCategory) -> Option<TopoCategory> {
    match source {
        TopoCategory::Vertex => Some(TopoCategory::Edge),
        TopoCategory::Edge => Some(TopoCategory::Face),
        TopoCategory::Face => Some(TopoCategory::Region),
        TopoCategory::Region => None,
    }
}

/// Adjacency is stored only between consecutive dimensions.
#[inline]
pub fn has_adjacency(from_dim: usize, to_dim: usize) -> bool {
    from_dim.abs_diff(to_dim) == 1
}

impl<D, G, C> CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    fn native_adjacent(
        &self,
        e: EntityHandle,
        target: TopoCategory,
    ) -> Result<Vec<EntityHandle>, MeshBridgeError> {
        self.db
            .adjacency_vector(from_entity(e), target)?
            .into_iter()
            .map(try_to_entity)
            .collect()
    }

    /// All entities of dimension `dim` adjacent to `e`; `{e}` when `dim` is `e`'s own.
    pub fn try_get_adjacent(
        &self,
        e: EntityHandle,
        dim: usize,
    ) -> Result<Vec<EntityHandle>, MeshBridgeError> {
        let target = Self::category("get_adjacent", dim)?;
        let source = self.db.topo_category(from_entity(e))?;
        let query = adjacency_query(source, target);
        log::trace!("get_adjacent({e}, {dim}): {source:?} -> {query:?}");
        match query {
            AdjacencyQuery::Identity => Ok(vec![e]),
            AdjacencyQuery::Downward(c) | AdjacencyQuery::Upward(c) => self.native_adjacent(e, c),
        }
    }

    /// Writes the dimension-`dim` boundary of `e` into `down` and returns its size.
    ///
    /// `dim` must not exceed `e`'s dimension. The count is always checked
    /// against the degree table of `e`'s type.
    pub fn try_get_downward(
        &self,
        e: EntityHandle,
        dim: usize,
        down: &mut Vec<EntityHandle>,
    ) -> Result<usize, MeshBridgeError> {
        const OP: &str = "get_downward";
        let target = Self::category(OP, dim)?;
        let source = self.db.topo_category(from_entity(e))?;
        down.clear();
        match adjacency_query(source, target) {
            AdjacencyQuery::Identity => down.push(e),
            AdjacencyQuery::Upward(_) => {
                return Err(MeshBridgeError::DimensionOutOfRange { op: OP, dim });
            }
            AdjacencyQuery::Downward(c) => {
                down.extend(self.native_adjacent(e, c)?);
                let ty = self.try_entity_type(e)?;
                let expected = ty.downward_count(dim);
                if down.len() != expected {
                    return Err(MeshBridgeError::DownwardCountMismatch {
                        op: OP,
                        ty,
                        dim,
                        got: down.len(),
                        expected,
                    });
                }
            }
        }
        Ok(down.len())
    }

    /// Convenience form of [`try_get_downward`](Self::try_get_downward).
    pub fn try_downward(&self, e: EntityHandle, dim: usize) -> Result<Vec<EntityHandle>, MeshBridgeError> {
        let mut down = Vec::new();
        self.try_get_downward(e, dim, &mut down)?;
        Ok(down)
    }

    /// The `i`-th entity one dimension above `e`; `None` for regions.
    pub fn try_get_upward(
        &self,
        e: EntityHandle,
        i: usize,
    ) -> Result<Option<EntityHandle>, MeshBridgeError> {
        let topo = from_entity(e);
        let Some(up) = upward_category(self.db.topo_category(topo)?) else {
            return Ok(None);
        };
        let ids = self.db.adjacency_id_vector(topo, up)?;
        let id = *ids.get(i).ok_or(MeshBridgeError::UpwardIndexOutOfRange {
            op: "get_upward",
            index: i,
            count: ids.len(),
        })?;
        Ok(Some(try_to_entity(self.db.topo_by_id(up, id)?)?))
    }

    /// Every entity one dimension above `e`.
    pub fn try_get_up(&self, e: EntityHandle) -> Result<Vec<EntityHandle>, MeshBridgeError> {
        match upward_category(self.db.topo_category(from_entity(e))?) {
            Some(up) => self.native_adjacent(e, up),
            None => Ok(Vec::new()),
        }
    }

    pub fn try_count_upward(&self, e: EntityHandle) -> Result<usize, MeshBridgeError> {
        Ok(self.try_get_up(e)?.len())
    }

    pub fn try_has_up(&self, e: EntityHandle) -> Result<bool, MeshBridgeError> {
        Ok(self.try_count_upward(e)? != 0)
    }

    /// Adjacency is materialized by the native database at load time.
    pub fn try_create_adjacency(&mut self, _from_dim: usize, _to_dim: usize) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("create_adjacency"))
    }

    pub fn try_delete_adjacency(&mut self, _from_dim: usize, _to_dim: usize) -> Result<(), MeshBridgeError> {
        Err(MeshBridgeError::Unsupported("delete_adjacency"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_is_identity_on_diagonal() {
        for a in TopoCategory::ALL {
            for b in TopoCategory::ALL {
                let q = adjacency_query(a, b);
                match a.dimension().cmp(&b.dimension()) {
                    std::cmp::Ordering::Equal => assert_eq!(q, AdjacencyQuery::Identity),
                    std::cmp::Ordering::Greater => assert_eq!(q, AdjacencyQuery::Downward(b)),
                    std::cmp::Ordering::Less => assert_eq!(q, AdjacencyQuery::Upward(b)),
                }
            }
        }
    }

    #[test]
    fn consecutive_dimensions_only() {
        for a in 0..4usize {
            for b in 0..4usize {
                assert_eq!(has_adjacency(a, b), a.abs_diff(b) == 1, "({a}, {b})");
            }
        }
    }

    #[test]
    fn upward_chain() {
        assert_eq!(upward_category(TopoCategory::Vertex), Some(TopoCategory::Edge));
        assert_eq!(upward_category(TopoCategory::Face), Some(TopoCategory::Region));
        assert_eq!(upward_category(TopoCategory::Region), None);
    }
}
