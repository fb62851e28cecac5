//! Typed records shared across layers.

pub mod log;
