//! Small helpers for emitting TypeScript source text.

use crate::routes::ParamDescriptor;

/// First line of every generated file.
pub const HEADER: &str = "// Generated by route-typegen. Do not edit.\n";

/// Quote `value` as a TypeScript string literal.
///
/// JSON string syntax is a subset of TS string literal syntax, so
/// `serde_json` handles the escaping.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Object type for a param descriptor, e.g. `{ "id": string; "tab"?: string; }`.
///
/// `indent` is the nesting level of the line the object starts on; members
/// are placed one level deeper.
pub fn params_object(params: &ParamDescriptor, indent: usize) -> String {
    if params.is_empty() {
        return "{}".to_string();
    }

    let member_pad = "  ".repeat(indent + 1);
    let mut out = String::from("{\n");
    for (name, required) in params {
        let optional = if *required { "" } else { "?" };
        out.push_str(&format!(
            "{member_pad}{}{optional}: string;\n",
            string_literal(name)
        ));
    }
    out.push_str(&"  ".repeat(indent));
    out.push('}');
    out
}

/// Relative module specifier from one generated file to another.
///
/// Both arguments are `/`-separated paths relative to the output directory.
/// The `.ts` extension is rewritten to `.js` as TS module resolution expects.
pub fn relative_import(from: &[String], to: &[String]) -> String {
    let from_dir = &from[..from.len().saturating_sub(1)];
    let common = from_dir
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat_n("..".to_string(), from_dir.len() - common));
    parts.extend(to[common..].iter().cloned());

    let mut spec = parts.join("/");
    if let Some(stem) = spec.strip_suffix(".ts") {
        spec = format!("{stem}.js");
    }
    if spec.starts_with("..") {
        spec
    } else {
        format!("./{spec}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::parse_params;

    fn parts(path: &str) -> Vec<String> {
        path.split('/').map(str::to_string).collect()
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("slug"), "\"slug\"");
        assert_eq!(string_literal("*"), "\"*\"");
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_params_object() {
        assert_eq!(params_object(&parse_params("about"), 1), "{}");
        assert_eq!(
            params_object(&parse_params("u/:id/:tab?"), 1),
            "{\n    \"id\": string;\n    \"tab\"?: string;\n  }"
        );
    }

    #[test]
    fn test_relative_import() {
        assert_eq!(
            relative_import(&parts("app/blog/+types/post.ts"), &parts("app/+types/root.ts")),
            "../../+types/root.js"
        );
        assert_eq!(
            relative_import(&parts("app/+types/blog.ts"), &parts("app/+types/root.ts")),
            "./root.js"
        );
        assert_eq!(
            relative_import(&parts("app/+types/blog.ts"), &parts("app/blog/+types/layout.ts")),
            "../blog/+types/layout.js"
        );
    }
}
