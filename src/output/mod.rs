// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Rendering turns results into text without side effects; the writer is
//! the only place that touches files or stdout.

mod render;
mod types;
mod writer;

// Re-export the public interface
pub use render::{render, Outcome};
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::{deliver, ensure_delivered};
