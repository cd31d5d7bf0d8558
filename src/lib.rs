#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-bridge
//!
//! mesh-bridge adapts an opaque, handle-based topological mesh database to a
//! uniform mesh interface: entity handles, type classification, per-dimension
//! iteration, adjacency, entity construction, and per-entity tags.
//!
//! ## Features
//! - Lossless translation between native handles and [`EntityHandle`]s
//! - Explicit dispatch for every `(source, target)` adjacency pair, with
//!   downward results checked against a fixed degree table
//! - Construction of edges, triangles, and tetrahedra from their boundaries,
//!   with tetrahedra oriented by signed volume
//! - Lazily allocated, zero-initialized integer and floating-point tags
//! - An in-memory reference database for tests and demos
//!
//! ## Errors
//!
//! Inherent `try_*` methods on [`CapMesh`] return [`MeshBridgeError`]. The
//! [`Mesh`] trait is infallible: any error terminates through
//! [`mesh_error::fatal`] after logging the diagnostic.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_bridge::prelude::*;
//!
//! let mut mesh = CapMesh::open(InMemoryTopoDatabase::new(), InMemoryGeometry::new());
//! let a = Mesh::create_vertex(&mut mesh, None, [0.0, 0.0, 0.0], [0.0; 3]);
//! let b = Mesh::create_vertex(&mut mesh, None, [1.0, 0.0, 0.0], [0.0; 3]);
//! let e = Mesh::create_entity(&mut mesh, EntityType::Edge, None, &[a, b]);
//! assert_eq!(Mesh::get_adjacent(&mesh, e, 0), vec![a, b]);
//! ```

pub mod algs;
pub mod cap_mesh;
pub mod config;
pub mod data;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod native;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::{Communicator, LocalComm, NoComm};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::cap_mesh::CapMesh;
    pub use crate::config::AdapterOptions;
    pub use crate::data::tags::{TagHandle, TagKind};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::{ErrorClass, MeshBridgeError, OrFatal};
    pub use crate::native::{
        GeometryDatabase, InMemoryGeometry, InMemoryTopoDatabase, ModelEntity, TopoCategory,
        TopoDatabase,
    };
    pub use crate::topology::entity_type::EntityType;
    pub use crate::topology::handle::EntityHandle;
}

pub use cap_mesh::CapMesh;
pub use mesh::Mesh;
pub use mesh_error::MeshBridgeError;
pub use topology::handle::EntityHandle;
