//! Process-group abstractions.

pub mod communicator;
