//! `EntityHandle`: the uniform interface's reference to a mesh entity
//!
//! The native database identifies entities by raw numeric handles
//! ([`NativeTopo`]) where 0 means "no entity". `EntityHandle` wraps a
//! nonzero `u64` so that a valid entity can never be confused with the
//! null handle, and translation in both directions is lossless.
//!
//! # Memory layout
//! This type is `repr(transparent)` over `NonZeroU64`, so `Option<EntityHandle>`
//! has the same size as `u64` and `None` plays the role of the null handle.

use std::{fmt, num::NonZeroU64};

use crate::mesh_error::{MeshBridgeError, OrFatal};
use crate::native::NativeTopo;

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EntityHandle(NonZeroU64);

impl EntityHandle {
    /// Creates a handle from a raw nonzero value.
    ///
    /// Returns [`MeshBridgeError::NullHandle`] when `raw == 0`.
    #[inline]
    pub fn new(raw: u64) -> Result<Self, MeshBridgeError> {
        NonZeroU64::new(raw)
            .map(EntityHandle)
            .ok_or(MeshBridgeError::NullHandle)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// Translates a native handle into an entity reference.
///
/// # Panics
///
/// Terminates through [`fatal`](crate::mesh_error::fatal) if `topo` is null.
#[inline]
#[track_caller]
pub fn to_entity(topo: NativeTopo) -> EntityHandle {
    try_to_entity(topo).or_fatal()
}

/// Fallible form of [`to_entity`].
#[inline]
pub fn try_to_entity(topo: NativeTopo) -> Result<EntityHandle, MeshBridgeError> {
    EntityHandle::new(topo.get())
}

/// Translates an entity reference back into the native handle.
#[inline]
pub fn from_entity(e: EntityHandle) -> NativeTopo {
    NativeTopo(e.get())
}

impl From<EntityHandle> for NativeTopo {
    #[inline]
    fn from(e: EntityHandle) -> Self {
        from_entity(e)
    }
}

impl TryFrom<NativeTopo> for EntityHandle {
    type Error = MeshBridgeError;

    #[inline]
    fn try_from(topo: NativeTopo) -> Result<Self, Self::Error> {
        try_to_entity(topo)
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityHandle").field(&self.get()).finish()
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
