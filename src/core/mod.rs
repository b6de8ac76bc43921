//! Core copy pipeline: tab selection, formatting, gesture classification,
//! and orchestration.

pub mod error;
pub mod formatter;
pub mod gesture;
pub mod orchestrator;
pub mod scope;
pub mod tab;
