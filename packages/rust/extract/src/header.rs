//! Structured metadata header parsing.
//!
//! A header is a YAML document with the keys `id`, `type`, `title`,
//! `description`, `templates`, and `definition`. YAML schema files are one
//! header; declaration files carry it inside their first `/* ... */` comment.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use schemadoc_shared::{
    Definition, Method, Param, ParamsSpec, RecordTemplate, ResponseSpec, Result,
    SchemaDescriptor, SchemaDocError, SchemaKind, TableTemplate, Templates,
};

// ---------------------------------------------------------------------------
// Raw YAML shapes
// ---------------------------------------------------------------------------

// Text fields accept any YAML scalar (`title: 2024`), see `scalar_text`.
#[derive(Debug, Deserialize)]
struct RawHeader {
    id: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<Value>,
    description: Option<Value>,
    templates: Option<RawTemplates>,
    definition: Option<RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawTemplates {
    table: Option<RawTableTemplate>,
    record: Option<RawRecordTemplate>,
}

#[derive(Debug, Deserialize)]
struct RawTableTemplate {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecordTemplate {
    key: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    // Kept as a mapping so method order survives deserialization.
    methods: Option<Mapping>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    #[serde(default)]
    params: Value,
    response: Option<RawResponse>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "type")]
    ty: Option<String>,
}

// ---------------------------------------------------------------------------
// Block comment location
// ---------------------------------------------------------------------------

/// A declaration file split at its metadata comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDeclaration<'a> {
    /// Comment body with any JSDoc-style `*` gutter removed.
    pub header: String,
    /// Everything after the closing `*/`.
    pub declaration: &'a str,
}

/// Find the first `/* ... */` comment in `text`.
pub fn split_block_comment(text: &str) -> Option<SplitDeclaration<'_>> {
    let open = text.find("/*")?;
    let body_start = open + 2;
    let close = body_start + text[body_start..].find("*/")?;

    let body = &text[body_start..close];
    let body = body.strip_prefix('*').unwrap_or(body);

    Some(SplitDeclaration {
        header: strip_comment_gutter(body),
        declaration: text[close + 2..].trim_start_matches(['\r', '\n']),
    })
}

/// Remove a leading ` * ` gutter when every non-blank line carries one.
fn strip_comment_gutter(body: &str) -> String {
    let has_gutter = body
        .lines()
        .filter(|l| !l.trim().is_empty())
        .all(|l| l.trim_start().starts_with('*'));

    if !has_gutter {
        return body.to_string();
    }

    body.lines()
        .map(|line| {
            let rest = line.trim_start().trim_start_matches('*');
            rest.strip_prefix(' ').unwrap_or(rest)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Header parsing
// ---------------------------------------------------------------------------

/// Parse a YAML header into a descriptor.
///
/// `file` names the source in error messages and is the fallback `id`.
pub fn parse_header(file: &str, yaml: &str) -> Result<SchemaDescriptor> {
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| SchemaDocError::malformed(file, format!("invalid YAML: {e}")))?;

    if !value.is_mapping() {
        return Err(SchemaDocError::malformed(
            file,
            "metadata header is not a key-value document",
        ));
    }

    let raw: RawHeader = serde_yaml::from_value(value)
        .map_err(|e| SchemaDocError::malformed(file, e.to_string()))?;

    let title = scalar_field(file, "title", raw.title)?
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| SchemaDocError::malformed(file, "missing `title`"))?;
    let id = scalar_field(file, "id", raw.id)?;
    let description = scalar_field(file, "description", raw.description)?;

    let methods = match raw.definition.and_then(|d| d.methods) {
        Some(methods) => parse_methods(file, methods)?,
        None => Vec::new(),
    };

    Ok(SchemaDescriptor {
        id: id.unwrap_or_else(|| file.to_string()),
        kind: SchemaKind::parse(raw.kind.as_deref().unwrap_or_default()),
        title: title.trim().to_string(),
        description: description.unwrap_or_default().trim().to_string(),
        templates: raw.templates.map(convert_templates).unwrap_or_default(),
        definition: Definition { methods },
    })
}

/// Text of a scalar header field; `null` counts as absent.
fn scalar_field(file: &str, key: &str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(&value).map(Some).ok_or_else(|| {
            SchemaDocError::malformed(file, format!("`{key}` must be a scalar value"))
        }),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn parse_methods(file: &str, methods: Mapping) -> Result<Vec<Method>> {
    methods
        .into_iter()
        .map(|(key, value)| {
            let name = key
                .as_str()
                .ok_or_else(|| SchemaDocError::malformed(file, "method name is not a string"))?
                .to_string();

            let raw: RawMethod = if value.is_null() {
                RawMethod {
                    params: Value::Null,
                    response: None,
                    description: None,
                }
            } else {
                serde_yaml::from_value(value).map_err(|e| {
                    SchemaDocError::malformed(file, format!("method `{name}`: {e}"))
                })?
            };

            Ok(Method {
                params: params_spec(&raw.params),
                response: raw
                    .response
                    .and_then(|r| r.ty)
                    .map(ResponseSpec::new),
                description: raw.description.unwrap_or_default().trim().to_string(),
                name,
            })
        })
        .collect()
}

/// Resolve the two accepted `params` shapes.
fn params_spec(value: &Value) -> ParamsSpec {
    match value {
        Value::Sequence(items) => ParamsSpec::Inline(params_from(items)),
        Value::Mapping(map) => match map.get("items") {
            Some(Value::Sequence(items)) => ParamsSpec::Referenced(params_from(items)),
            _ => ParamsSpec::None,
        },
        _ => ParamsSpec::None,
    }
}

fn params_from(items: &[Value]) -> Vec<Param> {
    items
        .iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?;
            Some(Param {
                name: name.to_string(),
                ty: item.get("type").and_then(Value::as_str).map(String::from),
            })
        })
        .collect()
}

fn convert_templates(raw: RawTemplates) -> Templates {
    Templates {
        table: raw.table.map(|t| TableTemplate {
            title: t.title,
            description: t.description,
        }),
        record: raw.record.map(|r| RecordTemplate {
            key: r.key,
            title: r.title,
        }),
    }
}
