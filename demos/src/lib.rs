//! Shared helpers for the runnable demos under `examples/`.

pub mod common;
pub mod render;
