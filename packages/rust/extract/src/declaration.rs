//! Method scan over TypeScript-shaped API declarations.
//!
//! Declaration headers usually omit `definition.methods`; the methods are
//! written out in the `export default interface` body instead:
//!
//! ```text
//! export default interface PingApi {
//!   // Ask for a pong back with the given parameter
//!   ping (param: number): Promise<number>
//! }
//! ```
//!
//! Only top-level members of that interface are considered.

use std::sync::LazyLock;

use regex::Regex;

use schemadoc_shared::{Method, Param, ParamsSpec, ResponseSpec};
use tracing::warn;

static DEFAULT_INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*export\s+default\s+interface\s+\w+[^{]*\{").expect("interface regex")
});

/// `name (params)` with an optional `: ReturnType`.
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*\((.*)\)\s*(?::\s*(.+?))?\s*;?$").expect("method regex")
});

static PROMISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Promise\s*<(.+)>$").expect("promise regex"));

/// Methods of the default-exported interface, in declaration order.
pub fn scan_methods(declaration: &str) -> Vec<Method> {
    let mut lines = declaration.lines();
    let Some(opening) = lines.by_ref().find(|l| DEFAULT_INTERFACE_RE.is_match(l)) else {
        return Vec::new();
    };

    let mut methods = Vec::new();
    let mut pending_doc: Vec<String> = Vec::new();
    // Signature whose parameter list continues on following lines.
    let mut open_signature: Option<String> = None;
    let mut depth = brace_delta(strip_line_comment(opening));
    if depth <= 0 {
        return methods;
    }

    for line in lines {
        let code = strip_line_comment(line).trim();

        if let Some(mut signature) = open_signature.take() {
            signature.push(' ');
            signature.push_str(code);
            if paren_delta(&signature) > 0 {
                open_signature = Some(signature);
            } else {
                methods.extend(parse_member(&signature, &pending_doc));
            }
        } else if depth == 1 {
            if let Some(comment) = line.trim().strip_prefix("//") {
                pending_doc.push(comment.trim().to_string());
                continue;
            }
            if paren_delta(code) > 0 {
                open_signature = Some(code.to_string());
            } else {
                methods.extend(parse_member(code, &pending_doc));
            }
        }
        if open_signature.is_none() {
            pending_doc.clear();
        }

        depth += brace_delta(code);
        if depth <= 0 {
            break;
        }
    }

    if let Some(signature) = open_signature {
        warn!(member = %signature, "unterminated method signature in declaration");
    }
    methods
}

/// One interface member, if it is a method.
fn parse_member(code: &str, doc: &[String]) -> Option<Method> {
    let Some(caps) = METHOD_RE.captures(code) else {
        if looks_like_method(code) {
            warn!(member = code, "declaration member not recognized as a method");
        }
        return None;
    };

    Some(Method {
        name: caps[1].to_string(),
        params: ParamsSpec::Inline(split_params(&caps[2])),
        response: caps.get(3).and_then(|m| response_of(m.as_str())),
        description: doc.join(" "),
    })
}

/// A `(` before any `:` marks a call signature rather than a property.
fn looks_like_method(code: &str) -> bool {
    match (code.find('('), code.find(':')) {
        (Some(paren), Some(colon)) => paren < colon,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Split a parameter list at top-level commas.
fn split_params(list: &str) -> Vec<Param> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in list.char_indices() {
        match ch {
            '<' | '{' | '[' | '(' => depth += 1,
            '>' | '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.extend(parse_param(&list[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }
    params.extend(parse_param(&list[start..]));
    params
}

fn parse_param(raw: &str) -> Option<Param> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (name, ty) = match raw.split_once(':') {
        Some((name, ty)) => (name, Some(ty.trim().to_string())),
        None => (raw, None),
    };
    let name = name.trim().trim_start_matches("...").trim_end_matches('?');
    Some(Param {
        name: name.to_string(),
        ty,
    })
}

/// `Promise<T>` yields a promised `T`, any other type is returned as
/// declared; `void` and `Promise<void>` yield nothing.
fn response_of(ret: &str) -> Option<ResponseSpec> {
    let ret = ret.trim();
    let response = match PROMISE_RE.captures(ret) {
        Some(caps) => ResponseSpec::new(caps[1].trim()),
        None => ResponseSpec::immediate(ret),
    };

    (response.ty != "void").then_some(response)
}

fn strip_line_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or("")
}

fn brace_delta(code: &str) -> i32 {
    code.chars().fold(0, |acc, ch| match ch {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

fn paren_delta(code: &str) -> i32 {
    code.chars().fold(0, |acc, ch| match ch {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYPERCORE: &str = r#"
export default interface HypercoreApi {
  // Create a new hypecore
  create (): Promise<CreateResponse>

  // Get a block of data from the feed.
  get (key: Uint8Array, index: number, options?: GetOptions): Promise<Uint8Array>

  // Cancel a `get()` operation.
  cancel (key: Uint8Array, getcallId: string): Promise<void>

  // Subscribe to events for a particular hypercore.
  subscribe (key?: Uint8Array): HypercoreSubscription | GlobalSubscription
}

export interface HypercoreSubscription {
  emit (name: 'append', evt: {key: Uint8Array, length: number})
}
"#;

    fn names(method: &Method) -> Vec<&str> {
        method.params.names().collect()
    }

    #[test]
    fn scans_default_interface_methods_in_order() {
        let methods = scan_methods(HYPERCORE);
        let method_names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(method_names, vec!["create", "get", "cancel", "subscribe"]);

        assert!(names(&methods[0]).is_empty());
        assert_eq!(names(&methods[1]), vec!["key", "index", "options"]);
        assert_eq!(methods[1].description, "Get a block of data from the feed.");
        assert_eq!(
            methods[1].params.params()[2].ty.as_deref(),
            Some("GetOptions")
        );
    }

    #[test]
    fn responses_unwrap_promises() {
        let methods = scan_methods(HYPERCORE);
        assert_eq!(methods[0].response, Some(ResponseSpec::new("CreateResponse")));
        assert_eq!(methods[2].response, None);
        assert_eq!(
            methods[3].response,
            Some(ResponseSpec::immediate(
                "HypercoreSubscription | GlobalSubscription"
            ))
        );
    }

    #[test]
    fn trailing_comments_stay_out_of_return_types() {
        let decl = "export default interface A {\n  ping (param: number): Promise<number> // returns the param\n  other (): Promise<void> // nothing\n}\n";
        let methods = scan_methods(decl);
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].response, Some(ResponseSpec::new("number")));
        assert_eq!(names(&methods[0]), vec!["param"]);
        assert_eq!(methods[1].response, None);
    }

    #[test]
    fn multiline_signatures_are_joined() {
        let decl = r#"
export default interface Files {
  // Fetch a file
  download (
    key: Uint8Array, // feed key
    start?: number,
    opts?: {offset: number}
  ): Promise<void>

  ping (): Promise<number>
}
"#;
        let methods = scan_methods(decl);
        let method_names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(method_names, vec!["download", "ping"]);
        assert_eq!(names(&methods[0]), vec!["key", "start", "opts"]);
        assert_eq!(methods[0].description, "Fetch a file");
        assert_eq!(methods[0].response, None);
        assert_eq!(methods[1].description, "");
    }

    #[test]
    fn unterminated_signature_is_skipped() {
        let decl = "export default interface A {\n  ping (): Promise<number>\n  broken (\n    key: string\n}\n";
        let methods = scan_methods(decl);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "ping");
    }

    #[test]
    fn nested_object_types_do_not_split_params() {
        let decl = "export default interface A {\n  emit (name: string, evt: {key: Uint8Array, length: number}): Promise<void>\n}\n";
        let methods = scan_methods(decl);
        assert_eq!(names(&methods[0]), vec!["name", "evt"]);
    }

    #[test]
    fn comments_separated_by_blank_lines_are_dropped() {
        let decl = "export default interface A {\n  // stray note\n\n  isReady (): Promise<boolean>\n}\n";
        let methods = scan_methods(decl);
        assert_eq!(methods[0].description, "");
    }

    #[test]
    fn record_declarations_have_no_methods() {
        let decl = "export default interface Database {\n  dbId: string\n  cachedMeta?: {\n    displayName?: string\n  }\n}\n";
        assert!(scan_methods(decl).is_empty());
        assert!(scan_methods("export interface NotDefault {\n  ping (): void\n}\n").is_empty());
    }
}
