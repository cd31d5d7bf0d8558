//! Entity types of the uniform interface and their mapping onto native shapes.

use crate::mesh_error::MeshBridgeError;
use crate::native::{MeshShape, TopoCategory};

/// Topological type of a mesh entity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum EntityType {
    Vertex,
    Edge,
    Triangle,
    Quad,
    Tet,
    Hex,
    Prism,
    Pyramid,
}

/// Number of bounding entities of each dimension, indexed `[type][dim]`.
///
/// Used to validate adjacency results, never to compute them.
pub const DOWNWARD_COUNT: [[usize; 4]; EntityType::COUNT] = [
    [1, 0, 0, 0],  // Vertex
    [2, 1, 0, 0],  // Edge
    [3, 3, 1, 0],  // Triangle
    [4, 4, 1, 0],  // Quad
    [4, 6, 4, 1],  // Tet
    [8, 12, 6, 1], // Hex
    [6, 9, 5, 1],  // Prism
    [5, 8, 5, 1],  // Pyramid
];

impl EntityType {
    pub const COUNT: usize = 8;

    pub const ALL: [EntityType; EntityType::COUNT] = [
        EntityType::Vertex,
        EntityType::Edge,
        EntityType::Triangle,
        EntityType::Quad,
        EntityType::Tet,
        EntityType::Hex,
        EntityType::Prism,
        EntityType::Pyramid,
    ];

    /// Topological dimension of the type.
    pub const fn dimension(self) -> usize {
        match self {
            EntityType::Vertex => 0,
            EntityType::Edge => 1,
            EntityType::Triangle | EntityType::Quad => 2,
            EntityType::Tet | EntityType::Hex | EntityType::Prism | EntityType::Pyramid => 3,
        }
    }

    /// Expected number of dimension-`dim` bounding entities.
    #[inline]
    pub fn downward_count(self, dim: usize) -> usize {
        DOWNWARD_COUNT[self as usize].get(dim).copied().unwrap_or(0)
    }

    /// Native category holding entities of this type.
    pub fn category(self) -> TopoCategory {
        match self.dimension() {
            0 => TopoCategory::Vertex,
            1 => TopoCategory::Edge,
            2 => TopoCategory::Face,
            _ => TopoCategory::Region,
        }
    }

    /// Classifies a native shape. Shapes outside the eight types are an error.
    pub fn from_shape(shape: MeshShape) -> Result<Self, MeshBridgeError> {
        match shape {
            MeshShape::Node => Ok(EntityType::Vertex),
            MeshShape::Segment => Ok(EntityType::Edge),
            MeshShape::Triangle => Ok(EntityType::Triangle),
            MeshShape::Quad => Ok(EntityType::Quad),
            MeshShape::Tetra => Ok(EntityType::Tet),
            MeshShape::Hex => Ok(EntityType::Hex),
            MeshShape::Prism => Ok(EntityType::Prism),
            MeshShape::Pyramid => Ok(EntityType::Pyramid),
            MeshShape::Polygon | MeshShape::Polyhedron | MeshShape::Unknown => {
                Err(MeshBridgeError::UnknownShape {
                    op: "get_type",
                    shape: format!("{shape:?}"),
                })
            }
        }
    }

    /// Native shape used when creating an entity of this type.
    pub const fn shape(self) -> MeshShape {
        match self {
            EntityType::Vertex => MeshShape::Node,
            EntityType::Edge => MeshShape::Segment,
            EntityType::Triangle => MeshShape::Triangle,
            EntityType::Quad => MeshShape::Quad,
            EntityType::Tet => MeshShape::Tetra,
            EntityType::Hex => MeshShape::Hex,
            EntityType::Prism => MeshShape::Prism,
            EntityType::Pyramid => MeshShape::Pyramid,
        }
    }
}
