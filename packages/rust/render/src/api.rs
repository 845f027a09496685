//! API section rendering.

use schemadoc_shared::{Method, SchemaDescriptor};

/// Options for API rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiRenderOptions {
    /// Append `: Promise<T>` / `: T` / `: void` to each signature.
    pub show_return_types: bool,
}

/// `name(a, b)`, optionally followed by the return annotation.
///
/// Parameter types are never shown, only names.
pub fn signature(method: &Method, opts: ApiRenderOptions) -> String {
    let params = method.params.names().collect::<Vec<_>>().join(", ");
    let mut sig = format!("{}({params})", method.name);

    if opts.show_return_types {
        match &method.response {
            Some(response) if response.promised => {
                sig.push_str(&format!(": Promise<{}>", response.ty));
            }
            Some(response) => sig.push_str(&format!(": {}", response.ty)),
            None => sig.push_str(": void"),
        }
    }
    sig
}

/// Lines for one API: the title, then a signature and description per method.
pub fn render_api(api: &SchemaDescriptor, opts: ApiRenderOptions) -> Vec<String> {
    let mut lines = vec![format!("- {}", api.title)];

    for method in &api.definition.methods {
        lines.push(format!("  - `{}`", signature(method, opts)));
        if !method.description.is_empty() {
            lines.push(format!("    - {}", method.description));
        }
    }
    lines
}

/// The whole API section body, one block per API in input order.
pub fn render_api_section<'a>(
    apis: impl IntoIterator<Item = &'a SchemaDescriptor>,
    opts: ApiRenderOptions,
) -> String {
    apis.into_iter()
        .flat_map(|api| render_api(api, opts))
        .collect::<Vec<_>>()
        .join("\n")
}
