//! Schema loading and metadata extraction.
//!
//! Turns schema files into [`ParsedSchema`] values: a typed descriptor plus
//! the declaration text it documents. Two strategies exist:
//! - [`ExtractionMode::Structured`] — full YAML parse of the header ([`header`])
//! - [`ExtractionMode::LineScan`] — `key: value` line scan ([`scan`])
//!
//! Declaration-format APIs whose header lists no methods get them from the
//! interface body ([`declaration`]).

pub mod declaration;
pub mod header;
pub mod loader;
pub mod scan;

use tracing::{debug, instrument};

use schemadoc_shared::{
    Definition, ExtractionMode, ParsedSchema, Result, SchemaDescriptor, SchemaDocError,
    SchemaFile, SchemaKind, SchemaSource, SourceFormat,
};

pub use loader::load_schema_files;
pub use scan::scan_title;

/// Extract the descriptor and declaration from one schema file.
#[instrument(skip_all, fields(file = %file.filename, ?mode))]
pub fn extract(file: &SchemaFile, mode: ExtractionMode) -> Result<ParsedSchema> {
    let format = file.format();

    let (descriptor, declaration) = match (mode, format) {
        (ExtractionMode::Structured, SourceFormat::Yaml) => (
            header::parse_header(&file.filename, &file.raw_text)?,
            String::new(),
        ),
        (ExtractionMode::Structured, SourceFormat::Declaration) => {
            let split = header::split_block_comment(&file.raw_text).ok_or_else(|| {
                SchemaDocError::malformed(&file.filename, "no leading block comment found")
            })?;
            (
                header::parse_header(&file.filename, &split.header)?,
                split.declaration.to_string(),
            )
        }
        (ExtractionMode::LineScan, SourceFormat::Yaml) => (
            scan::scan_descriptor(&file.filename, &file.raw_text)?,
            String::new(),
        ),
        (ExtractionMode::LineScan, SourceFormat::Declaration) => {
            let declaration = header::split_block_comment(&file.raw_text)
                .map(|split| split.declaration)
                .unwrap_or(file.raw_text.as_str());
            (
                scan::scan_descriptor(&file.filename, &file.raw_text)?,
                declaration.to_string(),
            )
        }
    };

    let descriptor = with_declared_methods(descriptor, format, &declaration);
    debug!(
        id = %descriptor.id,
        kind = %descriptor.kind,
        methods = descriptor.definition.methods.len(),
        "schema extracted"
    );

    Ok(ParsedSchema {
        source: SchemaSource {
            id: descriptor.id.clone(),
            filename: file.filename.clone(),
            format,
            raw_text: file.raw_text.clone(),
            declaration,
        },
        descriptor,
    })
}

/// Extract every file, stopping at the first failure.
pub fn extract_all(files: &[SchemaFile], mode: ExtractionMode) -> Result<Vec<ParsedSchema>> {
    files.iter().map(|file| extract(file, mode)).collect()
}

/// Fill an API's empty method list from its interface declaration.
fn with_declared_methods(
    mut descriptor: SchemaDescriptor,
    format: SourceFormat,
    declaration: &str,
) -> SchemaDescriptor {
    if descriptor.kind == SchemaKind::Api
        && format == SourceFormat::Declaration
        && descriptor.definition.methods.is_empty()
    {
        descriptor.definition = Definition {
            methods: declaration::scan_methods(declaration),
        };
    }
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use schemadoc_shared::ParamsSpec;

    fn file(name: &str, text: &str) -> SchemaFile {
        SchemaFile {
            filename: name.into(),
            path: PathBuf::from(name),
            raw_text: text.into(),
        }
    }

    const PING_DTS: &str = "/*\nid: atek.cloud/ping-api\ntype: api\ntitle: Ping API\ndescription: Utility API used for debugging and testing liveness.\n*/\n\nexport default interface PingApi {\n  // Ask for a pong back with the given parameter\n  ping (param: number): Promise<number>\n}\n";

    #[test]
    fn structured_declaration_joins_descriptor_and_source() {
        let parsed = extract(&file("ping-api.d.ts", PING_DTS), ExtractionMode::Structured)
            .expect("extract");
        assert_eq!(parsed.descriptor.id, "atek.cloud/ping-api");
        assert_eq!(parsed.source.id, parsed.descriptor.id);
        assert_eq!(parsed.source.raw_text, PING_DTS);
        assert!(parsed.source.declaration.starts_with("export default interface PingApi"));

        let ping = &parsed.descriptor.definition.methods[0];
        assert_eq!(ping.name, "ping");
        assert_eq!(ping.description, "Ask for a pong back with the given parameter");
        assert_eq!(ping.params.names().collect::<Vec<_>>(), vec!["param"]);
    }

    #[test]
    fn header_methods_take_precedence_over_declaration() {
        let text = "/*\ntype: api\ntitle: Ping API\ndefinition:\n  methods:\n    pong:\n      description: from header\n*/\nexport default interface PingApi {\n  ping (param: number): Promise<number>\n}\n";
        let parsed = extract(&file("ping-api.d.ts", text), ExtractionMode::Structured)
            .expect("extract");
        let methods = &parsed.descriptor.definition.methods;
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "pong");
        assert_eq!(methods[0].params, ParamsSpec::None);
    }

    #[test]
    fn structured_declaration_requires_comment() {
        let err = extract(
            &file("bare.d.ts", "export default interface Bare {}\n"),
            ExtractionMode::Structured,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaDocError::MalformedHeader { .. }));
    }

    #[test]
    fn yaml_files_parse_whole_document() {
        let parsed = extract(
            &file("database.yaml", "type: adb-record\ntitle: Database\ndescription: Settings.\n"),
            ExtractionMode::Structured,
        )
        .expect("extract");
        assert_eq!(parsed.descriptor.kind, SchemaKind::AdbRecord);
        assert_eq!(parsed.source.format, SourceFormat::Yaml);
        assert!(parsed.source.declaration.is_empty());
    }

    #[test]
    fn line_scan_still_derives_declared_methods() {
        let parsed = extract(&file("ping-api.d.ts", PING_DTS), ExtractionMode::LineScan)
            .expect("extract");
        assert_eq!(parsed.descriptor.title, "Ping API");
        assert_eq!(parsed.descriptor.definition.methods.len(), 1);
    }

    #[test]
    fn line_scan_without_title_fails() {
        let err = extract(
            &file("nameless.d.ts", "/*\ntype: api\n*/\n"),
            ExtractionMode::LineScan,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaDocError::TitleNotFound { .. }));
    }

    #[test]
    fn extract_all_stops_on_first_error() {
        let files = vec![
            file("a.yaml", "type: api\ntitle: A\n"),
            file("b.yaml", "type: api\n"),
        ];
        assert!(extract_all(&files, ExtractionMode::Structured).is_err());
        assert_eq!(
            extract_all(&files[..1], ExtractionMode::Structured)
                .expect("extract")
                .len(),
            1
        );
    }
}
