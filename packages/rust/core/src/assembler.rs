//! Catalog assembler.
//!
//! Joins the rendered sections into the final Markdown document and writes
//! it to disk.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use schemadoc_shared::{Result, SchemaDocError};

/// Fixed parts of the catalog around the two rendered sections.
#[derive(Debug, Clone)]
pub struct CatalogLayout<'a> {
    /// Project name used in the `# {project} Schemas` title.
    pub project: &'a str,
    /// Paragraph under the title.
    pub preamble: &'a str,
    /// Heading of the record section (without `## `).
    pub records_heading: &'a str,
}

/// Outcome of writing the catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    /// Hex SHA-256 of the written content.
    pub sha256: String,
    pub bytes: usize,
    /// The file already held this exact content; nothing was written.
    pub unchanged: bool,
}

/// Assemble the catalog document.
///
/// Layout:
/// ```text
/// # <project> Schemas
///
/// <preamble>
///
/// ## <records heading>
///
/// <record section>
///
/// ## APIs
///
/// <api section>
/// ```
///
/// Empty sections keep their heading.
pub fn assemble_catalog(layout: &CatalogLayout<'_>, records: &str, apis: &str) -> String {
    format!(
        "# {project} Schemas\n\n{preamble}\n\n## {heading}\n\n{records}\n\n## APIs\n\n{apis}\n",
        project = layout.project,
        preamble = layout.preamble,
        heading = layout.records_heading,
    )
}

/// Hex-encoded SHA-256 of `content`.
pub fn content_sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Write the catalog to `path` atomically (temp file, then rename).
///
/// Identical existing content is left untouched.
#[instrument(skip_all, fields(path = %path.display(), bytes = content.len()))]
pub fn write_catalog(path: &Path, content: &str) -> Result<WriteOutcome> {
    let sha256 = content_sha256(content);

    if let Ok(existing) = std::fs::read(path) {
        if existing == content.as_bytes() {
            info!(%sha256, "catalog unchanged");
            return Ok(WriteOutcome {
                path: path.to_path_buf(),
                sha256,
                bytes: content.len(),
                unchanged: true,
            });
        }
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SchemaDocError::config(format!("invalid output path {}", path.display())))?;
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| SchemaDocError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| SchemaDocError::io(path, e))?;

    debug!(temp = %temp.display(), "renamed temp file over catalog");
    info!(%sha256, "catalog written");

    Ok(WriteOutcome {
        path: path.to_path_buf(),
        sha256,
        bytes: content.len(),
        unchanged: false,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "schemadoc-assembler-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const LAYOUT: CatalogLayout<'static> = CatalogLayout {
        project: "Atek",
        preamble: "This is a working directory of the Atek project's core schemas.",
        records_heading: "Database Records",
    };

    #[test]
    fn sections_follow_fixed_order() {
        let doc = assemble_catalog(&LAYOUT, "- Database: db", "- Ping API");
        assert_eq!(
            doc,
            "# Atek Schemas\n\n\
             This is a working directory of the Atek project's core schemas.\n\n\
             ## Database Records\n\n\
             - Database: db\n\n\
             ## APIs\n\n\
             - Ping API\n"
        );
    }

    #[test]
    fn empty_sections_keep_headings() {
        let doc = assemble_catalog(&LAYOUT, "", "");
        assert!(doc.contains("## Database Records\n"));
        assert!(doc.contains("## APIs\n"));
        let records_at = doc.find("## Database Records").unwrap();
        let apis_at = doc.find("## APIs").unwrap();
        assert!(records_at < apis_at);
    }

    #[test]
    fn sha256_is_stable() {
        assert_eq!(
            content_sha256(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_sha256("abc"), content_sha256("abc"));
    }

    #[test]
    fn write_then_rewrite_reports_unchanged() {
        let dir = temp_dir();
        let path = dir.join("README.md");

        let first = write_catalog(&path, "# Atek Schemas\n").expect("write");
        assert!(!first.unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Atek Schemas\n");
        assert!(!dir.join(".README.md.tmp").exists());

        let second = write_catalog(&path, "# Atek Schemas\n").expect("rewrite");
        assert!(second.unchanged);
        assert_eq!(first.sha256, second.sha256);

        let third = write_catalog(&path, "# Changed\n").expect("overwrite");
        assert!(!third.unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Changed\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unwritable_target_is_io_error() {
        let dir = temp_dir();
        let path = dir.join("missing-subdir").join("README.md");
        let err = write_catalog(&path, "x").unwrap_err();
        assert!(matches!(err, SchemaDocError::Io { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
