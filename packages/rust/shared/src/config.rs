//! Generator configuration.
//!
//! An optional `schemadoc.toml` lives next to the schema files.
//! CLI flags override config file values, which override variant defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaDocError};

/// Configuration file name looked up in the schema directory.
pub const CONFIG_FILE_NAME: &str = "schemadoc.toml";

/// `output` value that sends the catalog to stdout.
pub const STDOUT_MARKER: &str = "-";

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Generator preset fixing source suffix, headings, and output fidelity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `.yaml` sources, one summary line per record, bare signatures.
    #[default]
    Summary,
    /// `.d.ts` sources, full record sources, signatures with return types.
    Verbose,
}

impl Variant {
    pub fn default_suffix(self) -> &'static str {
        match self {
            Self::Summary => ".yaml",
            Self::Verbose => ".d.ts",
        }
    }

    pub fn records_heading(self) -> &'static str {
        match self {
            Self::Summary => "Database Records",
            Self::Verbose => "DB Tables",
        }
    }

    pub fn record_fidelity(self) -> RecordFidelity {
        match self {
            Self::Summary => RecordFidelity::Summary,
            Self::Verbose => RecordFidelity::Verbose,
        }
    }

    /// Whether API signatures carry a return-type annotation.
    pub fn show_return_types(self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn default_preamble(self, project: &str) -> String {
        match self {
            Self::Summary => format!(
                "This is a working directory of the {project} project's core schemas. \
                 Everything is subject to change."
            ),
            Self::Verbose => {
                format!("This is a working directory of the {project} project's core schemas.")
            }
        }
    }

    /// Default output sink, relative to the schema directory.
    pub fn default_output(self) -> &'static str {
        match self {
            Self::Summary => STDOUT_MARKER,
            Self::Verbose => "README.md",
        }
    }
}

/// How much of a record schema ends up in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFidelity {
    /// `- {title}: {description}`
    Summary,
    /// Heading plus the original file text.
    Verbose,
}

/// Metadata extraction strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// Full YAML parse of the metadata header.
    #[default]
    Structured,
    /// `key: value` line scan; only scalar fields are recovered.
    LineScan,
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Contents of `schemadoc.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project name used in the catalog title.
    #[serde(default = "default_project")]
    pub project: String,

    #[serde(default)]
    pub variant: Variant,

    #[serde(default)]
    pub extraction: ExtractionMode,

    /// Paragraph under the title (variant default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,

    /// Output path relative to the schema directory, or `-` for stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Schema file suffix (variant default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Heading of the record section (variant default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_heading: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            variant: Variant::default(),
            extraction: ExtractionMode::default(),
            preamble: None,
            output: None,
            suffix: None,
            records_heading: None,
        }
    }
}

fn default_project() -> String {
    "Atek".into()
}

// ---------------------------------------------------------------------------
// Resolved runtime config
// ---------------------------------------------------------------------------

/// Where the finished catalog goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// Runtime configuration for one generation run, with every default applied.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub schema_dir: PathBuf,
    pub project: String,
    pub variant: Variant,
    pub extraction: ExtractionMode,
    pub suffix: String,
    pub preamble: String,
    pub records_heading: String,
    pub output: OutputTarget,
}

impl CatalogConfig {
    /// Apply variant defaults to whatever the config file left unset.
    pub fn resolve(schema_dir: impl Into<PathBuf>, app: &AppConfig) -> Self {
        let schema_dir = schema_dir.into();
        let variant = app.variant;
        let output = app
            .output
            .as_deref()
            .unwrap_or(variant.default_output());

        Self {
            output: output_target(&schema_dir, output),
            project: app.project.clone(),
            variant,
            extraction: app.extraction,
            suffix: app
                .suffix
                .clone()
                .unwrap_or_else(|| variant.default_suffix().to_string()),
            preamble: app
                .preamble
                .clone()
                .unwrap_or_else(|| variant.default_preamble(&app.project)),
            records_heading: app
                .records_heading
                .clone()
                .unwrap_or_else(|| variant.records_heading().to_string()),
            schema_dir,
        }
    }
}

/// Interpret an `output` value relative to the schema directory.
pub fn output_target(schema_dir: &Path, output: &str) -> OutputTarget {
    if output == STDOUT_MARKER {
        OutputTarget::Stdout
    } else {
        OutputTarget::File(schema_dir.join(output))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside `schema_dir`.
pub fn config_file_path(schema_dir: &Path) -> PathBuf {
    schema_dir.join(CONFIG_FILE_NAME)
}

/// Load `schemadoc.toml` from the schema directory. Returns defaults if the file does not exist.
pub fn load_config(schema_dir: &Path) -> Result<AppConfig> {
    let path = config_file_path(schema_dir);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaDocError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SchemaDocError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `schema_dir`.
/// Returns the path to the created file; an existing file is left alone.
pub fn init_config(schema_dir: &Path) -> Result<PathBuf> {
    let path = config_file_path(schema_dir);
    if path.exists() {
        return Err(SchemaDocError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| SchemaDocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SchemaDocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
