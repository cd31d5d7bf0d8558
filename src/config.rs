//! Adapter configuration.
//!
//! Options are fixed when the adapter is opened. All fields have defaults,
//! so a partial JSON/TOML document deserializes into a complete configuration.
//! The downward-count and created-type checks are not configurable.

use serde::{Deserialize, Serialize};

/// Thresholds used by [`CapMesh`](crate::cap_mesh::CapMesh).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterOptions {
    /// A candidate tetrahedron is positively oriented iff its signed volume
    /// is strictly greater than this value.
    pub orientation_tolerance: f64,
    /// After building a triangle from edges, require the unused edge to
    /// close the vertex cycle.
    pub verify_triangle_cycle: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        AdapterOptions {
            orientation_tolerance: 0.0,
            verify_triangle_cycle: true,
        }
    }
}
