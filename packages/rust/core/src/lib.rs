//! Catalog generation pipeline for schemadoc.
//!
//! This crate ties together loading, extraction, classification, rendering,
//! and catalog assembly into a single forward pass (`pipeline::run`).

pub mod assembler;
pub mod classify;
pub mod pipeline;

pub use assembler::{CatalogLayout, WriteOutcome, assemble_catalog, write_catalog};
pub use classify::{Classified, classify};
pub use pipeline::{Catalog, CheckReport, RunOutcome, RunReport, check, generate, run};
