//! Mesh topology on top of the native database.
//!
//! This module holds the entity-level half of the adapter:
//! - `EntityHandle` and translation to/from native handles
//! - `EntityType` and the downward degree table
//! - cursors over one dimension
//! - adjacency queries, entity construction, and the single-partition parallel surface
//!
//! Most users reach these through [`CapMesh`](crate::cap_mesh::CapMesh) or the
//! [`Mesh`](crate::mesh::Mesh) trait.

pub mod adjacency;
pub mod construct;
pub mod entity_type;
pub mod handle;
pub mod iterator;
pub mod parallel;

pub use adjacency::{AdjacencyQuery, adjacency_query, has_adjacency};
pub use entity_type::EntityType;
pub use handle::{EntityHandle, from_entity, to_entity};
pub use iterator::{Entities, IterState, MeshIterator};
