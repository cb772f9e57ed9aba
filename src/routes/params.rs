//! Path pattern parsing.
//!
//! Turns a full route path such as `users/:id/files/*` into the ordered set
//! of parameters it declares. Parsing is fail-soft: any string is accepted
//! and segments that do not form a parameter simply contribute nothing.

use indexmap::IndexMap;

/// Parameter name -> required flag, in order of first appearance.
pub type ParamDescriptor = IndexMap<String, bool>;

/// Name used for the catch-all segment.
pub const SPLAT: &str = "*";

/// Extract the parameters declared by a full path.
///
/// Grammar, per `/`-delimited segment:
/// - `:name` declares a required param, `:name?` an optional one
/// - `*` declares the splat param `"*"`, always required
/// - anything else (including empty segments) is static
///
/// When a name occurs more than once it keeps its first position, and its
/// required flag comes from the last occurrence.
pub fn parse_params(full_path: &str) -> ParamDescriptor {
    let mut params = ParamDescriptor::new();

    for segment in full_path.split('/') {
        if segment == SPLAT {
            params.insert(SPLAT.to_string(), true);
            continue;
        }

        let Some(name) = segment.strip_prefix(':') else {
            continue;
        };
        let (name, required) = match name.strip_suffix('?') {
            Some(name) => (name, false),
            None => (name, true),
        };
        if name.is_empty() {
            continue;
        }

        // IndexMap::insert keeps the original slot for an existing key.
        params.insert(name.to_string(), required);
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(params: &ParamDescriptor) -> Vec<(&str, bool)> {
        params.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    #[test]
    fn test_required_param() {
        assert_eq!(entries(&parse_params("/users/:id")), vec![("id", true)]);
    }

    #[test]
    fn test_optional_param() {
        assert_eq!(entries(&parse_params("/users/:id?")), vec![("id", false)]);
    }

    #[test]
    fn test_splat_param() {
        assert_eq!(entries(&parse_params("/files/*")), vec![("*", true)]);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let params = parse_params("/a/:id?/b/:id");
        assert_eq!(entries(&params), vec![("id", true)]);

        let params = parse_params("/a/:id/b/:id?");
        assert_eq!(entries(&params), vec![("id", false)]);
    }

    #[test]
    fn test_first_appearance_order() {
        let params = parse_params("orgs/:org/:repo?/tree/:org/*");
        assert_eq!(
            entries(&params),
            vec![("org", true), ("repo", false), ("*", true)]
        );
    }

    #[test]
    fn test_static_and_empty_segments() {
        assert!(parse_params("").is_empty());
        assert!(parse_params("/").is_empty());
        assert!(parse_params("//about//team/").is_empty());
        assert_eq!(entries(&parse_params("//blog//:slug//")), vec![("slug", true)]);
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        // Bare markers carry no name; `*?` and `x*` are static text.
        let params = parse_params("/:/:?/*?/x*/:ok");
        assert_eq!(entries(&params), vec![("ok", true)]);
    }

    #[test]
    fn test_keys_match_dynamic_and_splat_names() {
        let samples = [
            "/",
            ":lang?/docs/*",
            "/shop/:category/:item?/reviews/:page?",
            "a/b/c",
            "::double/:x??",
        ];
        for sample in samples {
            let params = parse_params(sample);
            let mut expected: Vec<String> = Vec::new();
            for segment in sample.split('/') {
                let name = if segment == "*" {
                    Some("*".to_string())
                } else {
                    segment
                        .strip_prefix(':')
                        .map(|s| s.strip_suffix('?').unwrap_or(s).to_string())
                        .filter(|s| !s.is_empty())
                };
                if let Some(name) = name {
                    if !expected.contains(&name) {
                        expected.push(name);
                    }
                }
            }
            let keys: Vec<String> = params.keys().cloned().collect();
            assert_eq!(keys, expected, "keys for {sample}");
        }
    }

    #[test]
    fn test_unusual_names_are_kept_verbatim() {
        // `::double` declares `:double`; `:x??` strips one `?` and is optional.
        let params = parse_params("::double/:x??");
        assert_eq!(entries(&params), vec![(":double", true), ("x?", false)]);
    }
}
