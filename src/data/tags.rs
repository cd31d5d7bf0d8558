//! Per-entity attribute storage ("tags").
//!
//! A tag is a named descriptor with a fixed element kind and element count.
//! Payloads are allocated lazily, zero-initialized, the first time an entity
//! is read or written through the tag, and always hold exactly `count`
//! elements of the tag's kind.
//!
//! Tag handles are never reused, so a handle that outlives
//! [`TagStore::destroy`] is reported as [`MeshBridgeError::UnknownTag`].

use hashbrown::HashMap;
use num_traits::Zero;

use crate::mesh_error::MeshBridgeError;
use crate::topology::handle::EntityHandle;

/// Opaque tag reference handed out by [`TagStore::create`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagHandle(u32);

impl TagHandle {
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Element kind of a tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    Int,
    Double,
    /// Declared by the uniform interface; not supported by this adapter.
    Long,
}

impl TagKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TagKind::Int => "int",
            TagKind::Double => "double",
            TagKind::Long => "long",
        }
    }
}

/// Fixed-size payload of one entity under one tag.
#[doc(hidden)]
#[derive(Clone, Debug, PartialEq)]
pub enum TagData {
    Int(Box<[i32]>),
    Double(Box<[f64]>),
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
}

/// Element types a tag can hold.
pub trait TagValue: Copy + Zero + sealed::Sealed {
    const KIND: TagKind;

    #[doc(hidden)]
    fn alloc(count: usize) -> TagData;
    #[doc(hidden)]
    fn view(data: &TagData) -> Option<&[Self]>;
    #[doc(hidden)]
    fn view_mut(data: &mut TagData) -> Option<&mut [Self]>;
}

impl TagValue for i32 {
    const KIND: TagKind = TagKind::Int;

    fn alloc(count: usize) -> TagData {
        TagData::Int(vec![Self::zero(); count].into_boxed_slice())
    }
    fn view(data: &TagData) -> Option<&[Self]> {
        match data {
            TagData::Int(v) => Some(&v[..]),
            TagData::Double(_) => None,
        }
    }
    fn view_mut(data: &mut TagData) -> Option<&mut [Self]> {
        match data {
            TagData::Int(v) => Some(&mut v[..]),
            TagData::Double(_) => None,
        }
    }
}

impl TagValue for f64 {
    const KIND: TagKind = TagKind::Double;

    fn alloc(count: usize) -> TagData {
        TagData::Double(vec![Self::zero(); count].into_boxed_slice())
    }
    fn view(data: &TagData) -> Option<&[Self]> {
        match data {
            TagData::Double(v) => Some(&v[..]),
            TagData::Int(_) => None,
        }
    }
    fn view_mut(data: &mut TagData) -> Option<&mut [Self]> {
        match data {
            TagData::Double(v) => Some(&mut v[..]),
            TagData::Int(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
struct TagEntry {
    handle: TagHandle,
    name: String,
    kind: TagKind,
    count: usize,
    payloads: HashMap<EntityHandle, TagData>,
}

impl TagEntry {
    fn check<T: TagValue>(&self, op: &'static str, len: usize) -> Result<(), MeshBridgeError> {
        if self.kind != T::KIND {
            return Err(MeshBridgeError::TagKindMismatch {
                op,
                name: self.name.clone(),
                actual: self.kind.as_str(),
                requested: T::KIND.as_str(),
            });
        }
        if len != self.count {
            return Err(MeshBridgeError::TagSizeMismatch {
                op,
                name: self.name.clone(),
                count: self.count,
                len,
            });
        }
        Ok(())
    }

    /// Payload of `e`, allocated zero-filled on first touch.
    fn payload_mut<T: TagValue>(&mut self, e: EntityHandle, op: &'static str) -> Result<&mut [T], MeshBridgeError> {
        let (count, kind, name) = (self.count, self.kind, &self.name);
        let data = self.payloads.entry(e).or_insert_with(|| T::alloc(count));
        T::view_mut(data).ok_or_else(|| MeshBridgeError::TagKindMismatch {
            op,
            name: name.clone(),
            actual: kind.as_str(),
            requested: T::KIND.as_str(),
        })
    }
}

/// Set of tags owned by one adapter instance.
#[derive(Clone, Debug, Default)]
pub struct TagStore {
    tags: Vec<TagEntry>,
    next: u32,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tag of `kind` holding `count` elements per entity.
    ///
    /// Names are not required to be unique; [`find`](Self::find) returns the
    /// earliest live tag with a given name.
    pub fn create(&mut self, name: &str, kind: TagKind, count: usize) -> Result<TagHandle, MeshBridgeError> {
        match kind {
            TagKind::Long => return Err(MeshBridgeError::Unsupported("create_long_tag")),
            TagKind::Int | TagKind::Double => {}
        }
        if count == 0 {
            return Err(MeshBridgeError::EmptyTag {
                op: "create_tag",
                name: name.to_string(),
            });
        }
        if self.find(name).is_some() {
            log::warn!("tag `{name}` created more than once; find_tag returns the first");
        }
        self.next += 1;
        let handle = TagHandle(self.next);
        self.tags.push(TagEntry {
            handle,
            name: name.to_string(),
            kind,
            count,
            payloads: HashMap::new(),
        });
        log::debug!("created {} tag `{name}` x{count} as {handle:?}", kind.as_str());
        Ok(handle)
    }

    pub fn find(&self, name: &str) -> Option<TagHandle> {
        self.tags.iter().find(|t| t.name == name).map(|t| t.handle)
    }

    /// Destroys `tag` together with every payload it still holds.
    pub fn destroy(&mut self, tag: TagHandle) -> Result<(), MeshBridgeError> {
        let pos = self.position(tag, "destroy_tag")?;
        let entry = self.tags.remove(pos);
        log::debug!(
            "destroyed tag `{}` ({} payloads freed)",
            entry.name,
            entry.payloads.len()
        );
        Ok(())
    }

    /// Destroys every tag and frees all payloads.
    pub fn clear(&mut self) {
        let freed: usize = self.tags.drain(..).map(|t| t.payloads.len()).sum();
        log::debug!("cleared tag store ({freed} payloads freed)");
    }

    /// Live tags in creation order.
    pub fn handles(&self) -> Vec<TagHandle> {
        self.tags.iter().map(|t| t.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn name(&self, tag: TagHandle) -> Result<&str, MeshBridgeError> {
        Ok(&self.entry(tag, "get_tag_name")?.name)
    }

    pub fn kind(&self, tag: TagHandle) -> Result<TagKind, MeshBridgeError> {
        Ok(self.entry(tag, "get_tag_type")?.kind)
    }

    pub fn size(&self, tag: TagHandle) -> Result<usize, MeshBridgeError> {
        Ok(self.entry(tag, "get_tag_size")?.count)
    }

    /// Number of entities currently holding a payload for `tag`.
    pub fn payload_count(&self, tag: TagHandle) -> Result<usize, MeshBridgeError> {
        Ok(self.entry(tag, "payload_count")?.payloads.len())
    }

    /// Copies the payload of `e` into `out`, allocating a zeroed payload first if absent.
    pub fn get<T: TagValue>(&mut self, e: EntityHandle, tag: TagHandle, out: &mut [T]) -> Result<(), MeshBridgeError> {
        let entry = self.entry_mut(tag, "get_tag")?;
        entry.check::<T>("get_tag", out.len())?;
        out.copy_from_slice(entry.payload_mut::<T>(e, "get_tag")?);
        Ok(())
    }

    /// Overwrites the payload of `e` with `values`.
    pub fn set<T: TagValue>(&mut self, e: EntityHandle, tag: TagHandle, values: &[T]) -> Result<(), MeshBridgeError> {
        let entry = self.entry_mut(tag, "set_tag")?;
        entry.check::<T>("set_tag", values.len())?;
        entry.payload_mut::<T>(e, "set_tag")?.copy_from_slice(values);
        Ok(())
    }

    /// Pure existence check; never allocates.
    pub fn has(&self, e: EntityHandle, tag: TagHandle) -> Result<bool, MeshBridgeError> {
        Ok(self.entry(tag, "has_tag")?.payloads.contains_key(&e))
    }

    /// Frees the payload of `e`, if any.
    pub fn remove(&mut self, e: EntityHandle, tag: TagHandle) -> Result<(), MeshBridgeError> {
        self.entry_mut(tag, "remove_tag")?.payloads.remove(&e);
        Ok(())
    }

    /// Frees the payloads of `e` under every tag.
    pub fn remove_entity(&mut self, e: EntityHandle) {
        for entry in &mut self.tags {
            entry.payloads.remove(&e);
        }
    }

    /// Read-only view of an existing payload, without allocating.
    pub fn peek<T: TagValue>(&self, e: EntityHandle, tag: TagHandle) -> Result<Option<&[T]>, MeshBridgeError> {
        let entry = self.entry(tag, "peek_tag")?;
        entry.check::<T>("peek_tag", entry.count)?;
        Ok(entry.payloads.get(&e).and_then(T::view))
    }

    fn position(&self, tag: TagHandle, op: &'static str) -> Result<usize, MeshBridgeError> {
        self.tags
            .iter()
            .position(|t| t.handle == tag)
            .ok_or(MeshBridgeError::UnknownTag { op, tag: tag.0 })
    }

    fn entry(&self, tag: TagHandle, op: &'static str) -> Result<&TagEntry, MeshBridgeError> {
        let pos = self.position(tag, op)?;
        Ok(&self.tags[pos])
    }

    fn entry_mut(&mut self, tag: TagHandle, op: &'static str) -> Result<&mut TagEntry, MeshBridgeError> {
        let pos = self.position(tag, op)?;
        Ok(&mut self.tags[pos])
    }
}
