//! Export surface for external consumers.
//!
//! # Responsibility
//! - Produce the date-by-track matrix the export collaborator consumes.
//!
//! # Invariants
//! - Export reads aggregates only; it never mutates engine state.

pub mod csv_matrix;

pub use csv_matrix::{write_matrix, ExportEntry, ExportError};
