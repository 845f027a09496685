//! Record section rendering.

use tracing::debug;

use schemadoc_extract::scan_title;
use schemadoc_shared::{ParsedSchema, RecordFidelity, Result, SchemaDescriptor};

/// `- {title}: {description}`, or `- {title}` when there is no description.
pub fn render_record_summary(record: &SchemaDescriptor) -> String {
    if record.description.is_empty() {
        format!("- {}", record.title)
    } else {
        format!("- {}: {}", record.title, record.description)
    }
}

/// The original file text, fenced, under a heading with its title.
///
/// The title comes from a line scan of the raw text, independent of how the
/// descriptor was parsed.
pub fn render_record_verbose(record: &ParsedSchema) -> Result<String> {
    let source = &record.source;
    let title = scan_title(&source.filename, &source.raw_text)?;
    let body = source.raw_text.trim_end_matches(['\r', '\n']);
    let fence = fence_for(body);
    debug!(file = %source.filename, %title, "rendering record source");

    Ok(format!(
        "### {title}\n\n{fence}{lang}\n{body}\n{fence}",
        lang = source.format.fence_language(),
    ))
}

/// The whole record section body in input order.
pub fn render_record_section<'a>(
    records: impl IntoIterator<Item = &'a ParsedSchema>,
    fidelity: RecordFidelity,
) -> Result<String> {
    match fidelity {
        RecordFidelity::Summary => Ok(records
            .into_iter()
            .map(|r| render_record_summary(&r.descriptor))
            .collect::<Vec<_>>()
            .join("\n")),
        RecordFidelity::Verbose => Ok(records
            .into_iter()
            .map(render_record_verbose)
            .collect::<Result<Vec<_>>>()?
            .join("\n\n")),
    }
}

/// A backtick fence longer than any backtick run inside `body`.
fn fence_for(body: &str) -> String {
    let longest = body
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
