//! Partition parsed schemas by declared type.

use tracing::warn;

use schemadoc_shared::{ParsedSchema, SchemaKind};

/// Parsed schemas split by kind, each group in input order.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub apis: Vec<ParsedSchema>,
    pub records: Vec<ParsedSchema>,
    /// Schemas whose `type` is neither `api` nor `adb-record`.
    pub dropped: Vec<ParsedSchema>,
}

/// Stable partition into APIs and records.
///
/// Unrecognized types are excluded from both groups and logged.
pub fn classify(schemas: impl IntoIterator<Item = ParsedSchema>) -> Classified {
    let mut classified = Classified::default();

    for schema in schemas {
        match &schema.descriptor.kind {
            SchemaKind::Api => classified.apis.push(schema),
            SchemaKind::AdbRecord => classified.records.push(schema),
            SchemaKind::Other(raw) => {
                warn!(
                    file = %schema.source.filename,
                    kind = %raw,
                    "unrecognized schema type, leaving it out of the catalog"
                );
                classified.dropped.push(schema);
            }
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use schemadoc_shared::{
        Definition, SchemaDescriptor, SchemaSource, SourceFormat, Templates,
    };

    fn schema(id: &str, kind: SchemaKind) -> ParsedSchema {
        ParsedSchema {
            descriptor: SchemaDescriptor {
                id: id.into(),
                kind,
                title: id.to_uppercase(),
                description: String::new(),
                templates: Templates::default(),
                definition: Definition::default(),
            },
            source: SchemaSource {
                id: id.into(),
                filename: format!("{id}.yaml"),
                format: SourceFormat::Yaml,
                raw_text: String::new(),
                declaration: String::new(),
            },
        }
    }

    fn ids(group: &[ParsedSchema]) -> Vec<&str> {
        group.iter().map(|s| s.descriptor.id.as_str()).collect()
    }

    #[test]
    fn partition_is_stable_and_drops_unknown_types() {
        let input = vec![
            schema("service", SchemaKind::AdbRecord),
            schema("ping", SchemaKind::Api),
            schema("view", SchemaKind::Other("adb-view".into())),
            schema("database", SchemaKind::AdbRecord),
            schema("inspect", SchemaKind::Api),
            schema("untyped", SchemaKind::Other(String::new())),
        ];

        let classified = classify(input);
        assert_eq!(ids(&classified.apis), vec!["ping", "inspect"]);
        assert_eq!(ids(&classified.records), vec!["service", "database"]);
        assert_eq!(ids(&classified.dropped), vec!["view", "untyped"]);
    }

    #[test]
    fn groups_are_disjoint_and_cover_recognized_kinds() {
        let input: Vec<_> = (0..12)
            .map(|i| {
                let kind = match i % 3 {
                    0 => SchemaKind::Api,
                    1 => SchemaKind::AdbRecord,
                    _ => SchemaKind::Other("other".into()),
                };
                schema(&format!("s{i}"), kind)
            })
            .collect();

        let recognized: HashSet<String> = input
            .iter()
            .filter(|s| !matches!(s.descriptor.kind, SchemaKind::Other(_)))
            .map(|s| s.descriptor.id.clone())
            .collect();

        let classified = classify(input);
        let apis: HashSet<String> = classified.apis.iter().map(|s| s.descriptor.id.clone()).collect();
        let records: HashSet<String> =
            classified.records.iter().map(|s| s.descriptor.id.clone()).collect();

        assert!(apis.is_disjoint(&records));
        assert_eq!(apis.union(&records).cloned().collect::<HashSet<_>>(), recognized);
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let classified = classify(Vec::new());
        assert!(classified.apis.is_empty());
        assert!(classified.records.is_empty());
        assert!(classified.dropped.is_empty());
    }
}
