//! Signed measures of mesh entities from vertex coordinates.
//!
//! Vertex ordering follows the native record:
//! - Edge: `[v0, v1]`.
//! - Triangle / Quad: `[v0, v1, v2(, v3)]`.
//! - Tetrahedron: `[v0, v1, v2, v3]`; positive when `v3` lies on the side of
//!   the normal `(v1 - v0) x (v2 - v0)`.
//! - Hexahedron, prism and pyramid use the bottom-face-first ordering and are
//!   split into tetrahedra.

use crate::mesh_error::MeshBridgeError;
use crate::topology::entity_type::EntityType;

/// Signed volume of the tetrahedron `(a, b, c, d)`.
#[inline]
pub fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    dot(sub(d, a), cross(sub(b, a), sub(c, a))) / 6.0
}

/// Measure of an entity: length, area, or signed volume.
///
/// Edges and faces return unsigned values; regions return the signed volume,
/// whose sign is the orientation of the vertex ordering.
pub fn entity_measure(ty: EntityType, vertices: &[[f64; 3]]) -> Result<f64, MeshBridgeError> {
    let expected = ty.downward_count(0);
    if vertices.len() != expected {
        return Err(MeshBridgeError::MalformedBoundary {
            op: "measure",
            reason: format!("{ty:?} needs {expected} vertices, got {}", vertices.len()),
        });
    }
    let v = vertices;
    Ok(match ty {
        EntityType::Vertex => 0.0,
        EntityType::Edge => norm(sub(v[1], v[0])),
        EntityType::Triangle => 0.5 * norm(cross(sub(v[1], v[0]), sub(v[2], v[0]))),
        EntityType::Quad => {
            0.5 * norm(cross(sub(v[1], v[0]), sub(v[2], v[0])))
                + 0.5 * norm(cross(sub(v[2], v[0]), sub(v[3], v[0])))
        }
        EntityType::Tet => signed_volume(v[0], v[1], v[2], v[3]),
        EntityType::Prism => {
            signed_volume(v[0], v[1], v[2], v[3])
                + signed_volume(v[1], v[4], v[2], v[3])
                + signed_volume(v[2], v[4], v[5], v[3])
        }
        EntityType::Pyramid => {
            signed_volume(v[0], v[1], v[2], v[4]) + signed_volume(v[0], v[2], v[3], v[4])
        }
        EntityType::Hex => {
            signed_volume(v[0], v[1], v[3], v[4])
                + signed_volume(v[1], v[2], v[3], v[6])
                + signed_volume(v[1], v[3], v[4], v[6])
                + signed_volume(v[1], v[4], v[5], v[6])
                + signed_volume(v[3], v[4], v[6], v[7])
        }
    })
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
