//! Geometry utilities for mesh-bridge.
//!
//! Measures computed from vertex coordinates, including the signed volume
//! used to orient constructed tetrahedra.

pub mod metrics;
