//! Schema directory enumeration.

use std::path::Path;

use tracing::{debug, instrument};

use schemadoc_shared::{Result, SchemaDocError, SchemaFile};

/// Read every regular file in `dir` whose name ends with `suffix`.
///
/// Files are returned sorted by name so repeated runs see the same order on
/// every platform. Any unreadable entry aborts the whole load.
#[instrument(skip_all, fields(dir = %dir.display(), suffix = suffix))]
pub fn load_schema_files(dir: &Path, suffix: &str) -> Result<Vec<SchemaFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| SchemaDocError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SchemaDocError::io(dir, e))?;
        let path = entry.path();

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !filename.ends_with(suffix) || !path.is_file() {
            continue;
        }

        let raw_text = std::fs::read_to_string(&path).map_err(|e| SchemaDocError::io(&path, e))?;
        files.push(SchemaFile {
            filename: filename.to_string(),
            path: path.clone(),
            raw_text,
        });
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    debug!(count = files.len(), "schema files loaded");

    Ok(files)
}
