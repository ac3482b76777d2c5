// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod specs;
pub mod transcript;

pub mod csv;
pub mod file;
pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Diagnostic, GradeError, GradeResult};
pub use transcript::{GradeAssignment, Transcript};
