//! End-to-end generation: schema dir → extract → classify → render → catalog.

use std::time::Instant;

use tracing::{info, instrument};

use schemadoc_extract::{extract_all, load_schema_files};
use schemadoc_render::{ApiRenderOptions, render_api_section, render_record_section};
use schemadoc_shared::{CatalogConfig, OutputTarget, Result, SchemaDocError};

use crate::assembler::{self, CatalogLayout, WriteOutcome};
use crate::classify::classify;

/// A fully rendered catalog, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub markdown: String,
    pub file_count: usize,
    pub api_count: usize,
    pub record_count: usize,
    /// Schemas left out for an unrecognized `type`.
    pub dropped_count: usize,
}

/// Where a run's output ended up.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Written(WriteOutcome),
    /// The caller prints `Catalog::markdown`.
    Stdout,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub catalog: Catalog,
    pub outcome: RunOutcome,
    pub elapsed: std::time::Duration,
}

/// Result of comparing a fresh catalog to the file on disk.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub catalog: Catalog,
    /// The output file is missing or differs from a fresh render.
    pub stale: bool,
}

/// Build the catalog in memory.
///
/// Every fatal condition surfaces here, before anything is written.
#[instrument(skip_all, fields(dir = %config.schema_dir.display(), variant = ?config.variant))]
pub fn generate(config: &CatalogConfig) -> Result<Catalog> {
    let files = load_schema_files(&config.schema_dir, &config.suffix)?;
    let parsed = extract_all(&files, config.extraction)?;
    let classified = classify(parsed);

    let records = render_record_section(&classified.records, config.variant.record_fidelity())?;
    let apis = render_api_section(
        classified.apis.iter().map(|s| &s.descriptor),
        ApiRenderOptions {
            show_return_types: config.variant.show_return_types(),
        },
    );

    let layout = CatalogLayout {
        project: &config.project,
        preamble: &config.preamble,
        records_heading: &config.records_heading,
    };

    Ok(Catalog {
        markdown: assembler::assemble_catalog(&layout, &records, &apis),
        file_count: files.len(),
        api_count: classified.apis.len(),
        record_count: classified.records.len(),
        dropped_count: classified.dropped.len(),
    })
}

/// Generate and deliver the catalog to the configured output.
#[instrument(skip_all, fields(dir = %config.schema_dir.display()))]
pub fn run(config: &CatalogConfig) -> Result<RunReport> {
    let start = Instant::now();
    let catalog = generate(config)?;

    let outcome = match &config.output {
        OutputTarget::File(path) => {
            RunOutcome::Written(assembler::write_catalog(path, &catalog.markdown)?)
        }
        OutputTarget::Stdout => RunOutcome::Stdout,
    };

    info!(
        files = catalog.file_count,
        apis = catalog.api_count,
        records = catalog.record_count,
        dropped = catalog.dropped_count,
        "catalog generated"
    );

    Ok(RunReport {
        catalog,
        outcome,
        elapsed: start.elapsed(),
    })
}

/// Generate without writing and report whether the output file is stale.
#[instrument(skip_all, fields(dir = %config.schema_dir.display()))]
pub fn check(config: &CatalogConfig) -> Result<CheckReport> {
    let OutputTarget::File(path) = &config.output else {
        return Err(SchemaDocError::config(
            "check needs a file output; stdout output has nothing to compare",
        ));
    };

    let catalog = generate(config)?;
    let stale = match std::fs::read_to_string(path) {
        Ok(existing) => existing != catalog.markdown,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(SchemaDocError::io(path, e)),
    };

    info!(path = %path.display(), stale, "catalog checked");
    Ok(CheckReport { catalog, stale })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
