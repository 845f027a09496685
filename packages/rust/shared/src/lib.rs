//! Shared types, error model, and configuration for schemadoc.
//!
//! This crate is the foundation depended on by all other schemadoc crates.
//! It provides:
//! - [`SchemaDocError`] — the unified error type
//! - Domain types ([`SchemaFile`], [`SchemaDescriptor`], [`ParamsSpec`], [`SchemaSource`])
//! - Configuration ([`AppConfig`], [`CatalogConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, CatalogConfig, ExtractionMode, OutputTarget, RecordFidelity,
    STDOUT_MARKER, Variant, config_file_path, init_config, load_config, load_config_from,
    output_target,
};
pub use error::{Result, SchemaDocError};
pub use types::{
    Definition, Method, Param, ParamsSpec, ParsedSchema, RecordTemplate, ResponseSpec,
    SchemaDescriptor, SchemaFile, SchemaKind, SchemaSource, SourceFormat, TableTemplate,
    Templates,
};
