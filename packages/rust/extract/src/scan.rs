//! Line-scan metadata extraction.
//!
//! The lightweight strategy: no YAML parse, just top-level `key: value` lines.
//! Only scalar fields (`id`, `type`, `title`, `description`) are recovered.

use std::sync::LazyLock;

use regex::Regex;

use schemadoc_shared::{
    Definition, Result, SchemaDescriptor, SchemaDocError, SchemaKind, Templates,
};

/// Matches an unindented `key: value` line. The key is compared case-insensitively.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*):(.*)$").expect("field regex")
});

/// Value of the first unindented `key:` line with a non-empty value.
pub fn scan_field(text: &str, key: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let caps = FIELD_RE.captures(line)?;
        if !caps[1].eq_ignore_ascii_case(key) {
            return None;
        }
        let value = unquote(caps[2].trim());
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Title from the first `title:` line, or [`SchemaDocError::TitleNotFound`].
pub fn scan_title(file: &str, text: &str) -> Result<String> {
    scan_field(text, "title").ok_or_else(|| SchemaDocError::title_not_found(file))
}

/// Build a descriptor from scanned scalar fields. The definition stays empty.
pub fn scan_descriptor(file: &str, text: &str) -> Result<SchemaDescriptor> {
    let title = scan_title(file, text)?;

    Ok(SchemaDescriptor {
        id: scan_field(text, "id").unwrap_or_else(|| file.to_string()),
        kind: SchemaKind::parse(&scan_field(text, "type").unwrap_or_default()),
        title,
        description: scan_field(text, "description").unwrap_or_default(),
        templates: Templates::default(),
        definition: Definition::default(),
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
