// src/engine/mod.rs
//! Grade aggregation & recalculation.
//!
//! ```text
//! Table ─extract→ TranscriptModel ─recompute→ Recomputation ─apply→ Table
//!                      │                ↑
//!                      └─ resolve ─ aggregate ─ gpa ─ annotate
//! ```
pub mod aggregate;
pub mod annotate;
pub mod engine;
pub mod extract;
pub mod gpa;
pub mod resolve;
pub mod types;

pub use engine::{apply, recompute, run, CellWrite, Recomputation, SemesterSummary};
pub use extract::{ensure_total_rows, extract, Extraction};
pub use types::*;
