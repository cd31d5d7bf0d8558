//! Entity creation and destruction.
//!
//! Supported constructions, by `(target type, type of the first bounding entity)`:
//!
//! - **Edge from vertices**: the two vertices, in the given order.
//! - **Triangle from edges**: the edges may arrive in any order and with any
//!   orientation. Consecutive edge pairs are searched for a shared vertex and
//!   the first match fixes a cyclic vertex order.
//! - **Tetrahedron from triangles**: the first triangle's vertices plus the
//!   vertex of the second triangle not on the first give a candidate ordering.
//!   The candidate and its mirror (first and third vertex swapped) are both
//!   created; the one with positive signed volume is kept and the other deleted.
//!
//! Every other pairing is rejected.

use itertools::Itertools;

use crate::algs::communicator::Communicator;
use crate::cap_mesh::CapMesh;
use crate::geometry::metrics::entity_measure;
use crate::mesh_error::MeshBridgeError;
use crate::native::{Classification, GeometryDatabase, ModelEntity, NativeTopo, TopoCategory, TopoDatabase};
use crate::topology::entity_type::EntityType;
use crate::topology::handle::{EntityHandle, from_entity, try_to_entity};

const OP: &str = "create_entity";

fn natives(entities: &[EntityHandle]) -> Vec<NativeTopo> {
    entities.iter().copied().map(from_entity).collect()
}

impl<D, G, C> CapMesh<D, G, C>
where
    D: TopoDatabase,
    G: GeometryDatabase,
    C: Communicator,
{
    /// Creates a vertex at `xyz` with parametric coordinates `param`.
    pub fn try_create_vertex(
        &mut self,
        model: Option<ModelEntity>,
        xyz: [f64; 3],
        param: [f64; 3],
    ) -> Result<EntityHandle, MeshBridgeError> {
        let classification = self.classify(model)?;
        let topo = self.db.create_vertex(xyz, classification)?;
        self.db.set_vertex_uv(topo, param[0], param[1])?;
        try_to_entity(topo)
    }

    /// Creates an entity of type `ty` bounded by `down`.
    pub fn try_create_entity(
        &mut self,
        ty: EntityType,
        model: Option<ModelEntity>,
        down: &[EntityHandle],
    ) -> Result<EntityHandle, MeshBridgeError> {
        let first = *down.first().ok_or_else(|| MeshBridgeError::MalformedBoundary {
            op: OP,
            reason: "no bounding entities".into(),
        })?;
        let down_ty = self.try_entity_type(first)?;
        let classification = self.classify(model)?;

        let created = match (ty, down_ty) {
            (EntityType::Edge, EntityType::Vertex) => self.edge_from_vertices(down, classification)?,
            (EntityType::Triangle, EntityType::Edge) => {
                self.triangle_from_edges(down, classification)?
            }
            (EntityType::Tet, EntityType::Triangle) => self.tet_from_triangles(down, classification)?,
            _ => {
                return Err(MeshBridgeError::UnsupportedConstruction {
                    op: OP,
                    target: ty,
                    down: down_ty,
                });
            }
        };

        let got = self.try_entity_type(created)?;
        if got != ty {
            return Err(MeshBridgeError::CreatedTypeMismatch {
                op: OP,
                expected: ty,
                got,
            });
        }
        log::debug!("created {ty:?} {created} from {} {down_ty:?}", down.len());
        Ok(created)
    }

    fn expect_len(down: &[EntityHandle], ty: EntityType, dim: usize) -> Result<(), MeshBridgeError> {
        let expected = ty.downward_count(dim);
        if down.len() != expected {
            return Err(MeshBridgeError::MalformedBoundary {
                op: OP,
                reason: format!(
                    "{ty:?} needs {expected} bounding entities of dimension {dim}, got {}",
                    down.len()
                ),
            });
        }
        Ok(())
    }

    fn edge_from_vertices(
        &mut self,
        down: &[EntityHandle],
        classification: Option<Classification>,
    ) -> Result<EntityHandle, MeshBridgeError> {
        Self::expect_len(down, EntityType::Edge, 0)?;
        try_to_entity(self.db.create_edge(&natives(down), classification)?)
    }

    /// Orders the vertices of three edges into a cycle.
    fn triangle_vertices(&self, down: &[EntityHandle]) -> Result<[EntityHandle; 3], MeshBridgeError> {
        Self::expect_len(down, EntityType::Triangle, 1)?;
        let ends: Vec<[EntityHandle; 2]> = down
            .iter()
            .map(|&edge| -> Result<[EntityHandle; 2], MeshBridgeError> {
                match *self.try_downward(edge, 0)?.as_slice() {
                    [a, b] => Ok([a, b]),
                    _ => Err(MeshBridgeError::MalformedBoundary {
                        op: OP,
                        reason: format!("{edge} is not bounded by two vertices"),
                    }),
                }
            })
            .collect::<Result<_, _>>()?;

        let ordered = ends
            .iter()
            .circular_tuple_windows()
            .find_map(|(curr, next)| {
                if curr[1] == next[0] {
                    Some([curr[0], curr[1], next[1]])
                } else if next[1] == curr[0] {
                    Some([curr[1], curr[0], next[0]])
                } else {
                    None
                }
            })
            .ok_or_else(|| MeshBridgeError::MalformedBoundary {
                op: OP,
                reason: "no two consecutive edges share a vertex".into(),
            })?;

        if self.options.verify_triangle_cycle {
            let closing = [ordered[2], ordered[0]];
            let closes = ends
                .iter()
                .any(|e| *e == closing || *e == [closing[1], closing[0]]);
            if !closes || !ordered.iter().all_unique() {
                return Err(MeshBridgeError::MalformedBoundary {
                    op: OP,
                    reason: format!("edges do not close the cycle {ordered:?}"),
                });
            }
        }
        Ok(ordered)
    }

    fn triangle_from_edges(
        &mut self,
        down: &[EntityHandle],
        classification: Option<Classification>,
    ) -> Result<EntityHandle, MeshBridgeError> {
        let ordered = self.triangle_vertices(down)?;
        try_to_entity(self.db.create_face(&natives(&ordered), classification)?)
    }

    fn tet_from_triangles(
        &mut self,
        down: &[EntityHandle],
        classification: Option<Classification>,
    ) -> Result<EntityHandle, MeshBridgeError> {
        Self::expect_len(down, EntityType::Tet, 2)?;
        let faces: Vec<Vec<EntityHandle>> = down
            .iter()
            .map(|&f| self.try_downward(f, 0))
            .collect::<Result<_, _>>()?;

        if let Some(bad) = faces.iter().position(|f| f.len() != 3) {
            return Err(MeshBridgeError::MalformedBoundary {
                op: OP,
                reason: format!("{} is not a triangle", down[bad]),
            });
        }
        let base = &faces[0];
        let apex = faces[1]
            .iter()
            .copied()
            .find(|v| !base.contains(v))
            .ok_or_else(|| MeshBridgeError::MalformedBoundary {
                op: OP,
                reason: "first two triangles share all vertices".into(),
            })?;
        let candidate = [base[0], base[1], base[2], apex];
        let mirrored = [base[2], base[1], base[0], apex];

        let shape = EntityType::Tet.shape();
        let first = try_to_entity(self.db.create_region(&natives(&candidate), shape, classification)?)?;
        let second = try_to_entity(self.db.create_region(&natives(&mirrored), shape, classification)?)?;
        let v1 = self.try_measure(first)?;
        let v2 = self.try_measure(second)?;
        let tol = self.options.orientation_tolerance;
        log::debug!("tet candidates {first} (volume {v1}) and {second} (volume {v2})");

        let (keep, discard) = match (v1 > tol, v2 > tol) {
            (true, false) => (first, second),
            (false, true) => (second, first),
            _ => {
                // both candidates go before the orientation error is reported
                let cleanup: String = [second, first]
                    .into_iter()
                    .filter_map(|c| {
                        self.db
                            .delete_topo(from_entity(c))
                            .err()
                            .map(|err| format!("; candidate {c} not deleted: {err}"))
                    })
                    .collect();
                return Err(MeshBridgeError::AmbiguousOrientation {
                    op: OP,
                    first: v1,
                    mirrored: v2,
                    cleanup,
                });
            }
        };
        self.db.delete_topo(from_entity(discard))?;
        Ok(keep)
    }

    /// Length, area, or signed volume of `e` from its vertex coordinates.
    pub fn try_measure(&self, e: EntityHandle) -> Result<f64, MeshBridgeError> {
        let ty = self.try_entity_type(e)?;
        let coords = self
            .db
            .adjacency_vector(from_entity(e), TopoCategory::Vertex)?
            .into_iter()
            .map(|v| self.db.vertex_coord(v))
            .collect::<Result<Vec<_>, _>>()?;
        entity_measure(ty, &coords)
    }

    /// Deletes `e`, then frees every tag payload it held.
    ///
    /// A delete refused by the native database leaves `e` and its tags intact.
    pub fn try_destroy(&mut self, e: EntityHandle) -> Result<(), MeshBridgeError> {
        self.db.delete_topo(from_entity(e))?;
        self.tags.remove_entity(e);
        log::debug!("destroyed {e}");
        Ok(())
    }
}
