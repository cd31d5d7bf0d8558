//! MeshBridgeError: Unified error type for mesh-bridge
//!
//! Every failure the adapter can detect falls into one of three classes
//! (see [`ErrorClass`]). Inherent `try_*` methods return these errors so
//! they can be inspected in tests; the uniform [`Mesh`](crate::mesh::Mesh)
//! interface never returns them and instead terminates through [`fatal`].

use thiserror::Error;

use crate::native::TopoCategory;
use crate::topology::entity_type::EntityType;

/// Taxonomy of adapter failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The operation has no meaning or no implementation in a single-partition adapter.
    Unsupported,
    /// An internal consistency check failed.
    InvariantViolation,
    /// The caller supplied an invalid combination of arguments.
    PreconditionViolation,
}

/// Unified error type for mesh-bridge operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshBridgeError {
    /// A zero native handle was translated into an entity.
    #[error("native handle must be non-zero (0 is reserved as \"no entity\")")]
    NullHandle,
    /// The native database reported a shape outside the eight supported types.
    #[error("{op}: encountered an unknown entity shape {shape}")]
    UnknownShape { op: &'static str, shape: String },
    /// A dimension outside `0..=3` (or outside the entity's valid range).
    #[error("{op}: dimension {dim} is out of range")]
    DimensionOutOfRange { op: &'static str, dim: usize },
    /// `getDownward` returned a different number of entities than the degree table.
    #[error("{op}: {ty:?} has {got} bounding entities of dimension {dim}, expected {expected}")]
    DownwardCountMismatch {
        op: &'static str,
        ty: EntityType,
        dim: usize,
        got: usize,
        expected: usize,
    },
    /// The tetrahedron orientation oracle did not single out one candidate.
    /// `cleanup` is empty when both candidates were deleted.
    #[error("{op}: ambiguous orientation (candidate volumes {first} and {mirrored}){cleanup}")]
    AmbiguousOrientation {
        op: &'static str,
        first: f64,
        mirrored: f64,
        cleanup: String,
    },
    /// A created entity does not classify as the requested type.
    #[error("{op}: created entity classifies as {got:?}, expected {expected:?}")]
    CreatedTypeMismatch {
        op: &'static str,
        expected: EntityType,
        got: EntityType,
    },
    /// Bounding entities do not describe a valid boundary.
    #[error("{op}: malformed boundary: {reason}")]
    MalformedBoundary { op: &'static str, reason: String },
    /// `(target type, bounding type)` pairing with no construction rule.
    #[error("{op}: cannot build {target:?} from {down:?}")]
    UnsupportedConstruction {
        op: &'static str,
        target: EntityType,
        down: EntityType,
    },
    /// Operation requires a vertex.
    #[error("{op}: entity of category {category:?} is not a vertex")]
    NotAVertex {
        op: &'static str,
        category: TopoCategory,
    },
    /// Upward index past the end of the upward set.
    #[error("{op}: upward index {index} out of range ({count} upward entities)")]
    UpwardIndexOutOfRange {
        op: &'static str,
        index: usize,
        count: usize,
    },
    /// Tag handle is unknown (never created, or already destroyed).
    #[error("{op}: unknown or destroyed tag {tag}")]
    UnknownTag { op: &'static str, tag: u32 },
    /// Tag accessed with the wrong element kind.
    #[error("{op}: tag `{name}` holds {actual} data, not {requested}")]
    TagKindMismatch {
        op: &'static str,
        name: String,
        actual: &'static str,
        requested: &'static str,
    },
    /// Caller buffer length differs from the tag's element count.
    #[error("{op}: tag `{name}` has {count} elements, buffer has {len}")]
    TagSizeMismatch {
        op: &'static str,
        name: String,
        count: usize,
        len: usize,
    },
    /// A tag must have at least one element.
    #[error("{op}: tag `{name}` must have at least one element")]
    EmptyTag { op: &'static str, name: String },
    /// A query that only has meaning with a single participant ran in a parallel group.
    #[error("{op} called in a parallel run ({size} participants)")]
    ParallelRun { op: &'static str, size: usize },
    /// The operation is not implemented by this adapter.
    #[error("{0} called!")]
    Unsupported(&'static str),
    /// The native database rejected a request.
    #[error("native database: {op}: {detail}")]
    Native { op: &'static str, detail: String },
    /// The geometric model rejected a request.
    #[error("geometric model: {op}: {detail}")]
    Geometry { op: &'static str, detail: String },
}

impl MeshBridgeError {
    /// Which class of the failure taxonomy this error belongs to.
    pub fn class(&self) -> ErrorClass {
        use MeshBridgeError::*;
        match self {
            Unsupported(_) | ParallelRun { .. } => ErrorClass::Unsupported,
            UnknownShape { .. }
            | DownwardCountMismatch { .. }
            | AmbiguousOrientation { .. }
            | CreatedTypeMismatch { .. }
            | Native { .. }
            | Geometry { .. } => ErrorClass::InvariantViolation,
            NullHandle
            | DimensionOutOfRange { .. }
            | MalformedBoundary { .. }
            | UnsupportedConstruction { .. }
            | NotAVertex { .. }
            | UpwardIndexOutOfRange { .. }
            | UnknownTag { .. }
            | TagKindMismatch { .. }
            | TagSizeMismatch { .. }
            | EmptyTag { .. } => ErrorClass::PreconditionViolation,
        }
    }

    pub(crate) fn native(op: &'static str, detail: impl Into<String>) -> Self {
        MeshBridgeError::Native {
            op,
            detail: detail.into(),
        }
    }
}

/// Terminates with a diagnostic naming the failing operation.
///
/// The adapter is not designed to run degraded: callers of the uniform
/// interface never observe an error value.
#[cold]
#[track_caller]
pub fn fatal(err: MeshBridgeError) -> ! {
    log::error!("mesh-bridge: {err}");
    panic!("mesh-bridge: {err}");
}

/// `Result` extension that routes errors through [`fatal`].
pub trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, MeshBridgeError> {
    #[inline]
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => fatal(e),
        }
    }
}
