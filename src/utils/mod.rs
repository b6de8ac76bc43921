//! Utility modules for clipboard access and the popup hand-off buffer.

pub mod clipboard;
pub mod handoff;
