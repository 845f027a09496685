//! Core domain types for schema descriptors and their source files.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// SchemaFile / SourceFormat
// ---------------------------------------------------------------------------

/// Raw schema file as read from the schema directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// File name without directory (e.g., `ping-api.d.ts`).
    pub filename: String,
    /// Full path the file was read from.
    pub path: PathBuf,
    /// Unmodified file contents.
    pub raw_text: String,
}

impl SchemaFile {
    /// Source format implied by the file name.
    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_filename(&self.filename)
    }
}

/// How the metadata is stored inside a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// The whole file is one YAML document.
    Yaml,
    /// A leading block comment holds the YAML header, followed by a
    /// TypeScript-shaped declaration.
    Declaration,
}

impl SourceFormat {
    pub fn from_filename(name: &str) -> Self {
        if name.ends_with(".yaml") || name.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Declaration
        }
    }

    /// Language tag used when fencing the raw source in Markdown.
    pub fn fence_language(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Declaration => "typescript",
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaKind
// ---------------------------------------------------------------------------

/// The declared `type` of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `type: api` — a set of remotely callable methods.
    Api,
    /// `type: adb-record` — a database table's record shape.
    AdbRecord,
    /// Any other value, kept verbatim for diagnostics.
    Other(String),
}

impl SchemaKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "api" => Self::Api,
            "adb-record" => Self::AdbRecord,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Api => "api",
            Self::AdbRecord => "adb-record",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// API definition
// ---------------------------------------------------------------------------

/// A single method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }
}

/// Parameter list of a method, resolved once at parse time.
///
/// Schemas may describe params either as a literal tuple-like list or as an
/// array-type reference wrapping an `items` list; both carry the same
/// positional parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParamsSpec {
    /// No usable params description.
    #[default]
    None,
    /// `params: [{name: a}, {name: b}]`
    Inline(Vec<Param>),
    /// `params: {type: array, items: [{name: a}]}`
    Referenced(Vec<Param>),
}

impl ParamsSpec {
    /// Positional parameters regardless of which shape they came from.
    pub fn params(&self) -> &[Param] {
        match self {
            Self::None => &[],
            Self::Inline(params) | Self::Referenced(params) => params,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params().iter().map(|p| p.name.as_str())
    }
}

/// Return value description of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    pub ty: String,
    /// Delivered through a `Promise`. Header responses always are; declared
    /// members may return a value directly.
    pub promised: bool,
}

impl ResponseSpec {
    /// A response resolved through a `Promise`.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            promised: true,
        }
    }

    /// A value returned directly.
    pub fn immediate(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            promised: false,
        }
    }
}

/// One method of an API, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: ParamsSpec,
    pub response: Option<ResponseSpec>,
    pub description: String,
}

/// The `definition` block of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    /// Methods in the source's insertion order.
    pub methods: Vec<Method>,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Presentation hints for record schemas. Carried but not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates {
    pub table: Option<TableTemplate>,
    pub record: Option<RecordTemplate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableTemplate {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTemplate {
    pub key: Option<String>,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// SchemaDescriptor / SchemaSource
// ---------------------------------------------------------------------------

/// Normalized metadata parsed from one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Shared identifier joining the descriptor to its [`SchemaSource`].
    pub id: String,
    pub kind: SchemaKind,
    pub title: String,
    pub description: String,
    pub templates: Templates,
    pub definition: Definition,
}

/// The declaration half of a parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    /// Same value as the descriptor's `id`.
    pub id: String,
    pub filename: String,
    pub format: SourceFormat,
    /// Unmodified file contents.
    pub raw_text: String,
    /// Text following the metadata header (empty for YAML files).
    pub declaration: String,
}

/// Descriptor and source for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSchema {
    pub descriptor: SchemaDescriptor,
    pub source: SchemaSource,
}
