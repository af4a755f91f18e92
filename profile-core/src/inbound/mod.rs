//! Inbound presentation adapters.

pub mod render;
