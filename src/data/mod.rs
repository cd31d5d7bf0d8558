//! Data module: per-entity tags

pub mod tags;

pub use tags::{TagHandle, TagKind, TagStore, TagValue};
