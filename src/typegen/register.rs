//! Global fullpath -> params map (`+register.ts`).

use indexmap::IndexMap;

use super::TypegenContext;
use super::route::future_augmentation;
use super::ts::{HEADER, params_object, string_literal};
use crate::error::TypegenResult;
use crate::routes::{ConfigSnapshot, ParamDescriptor, parse_params};

pub const REGISTER_FILE: &str = "+register.ts";

/// Distinct full paths with their params, in order of first discovery.
///
/// A route contributes its full path when it is the root or declares a
/// non-empty path segment; pathless layouts only shape their descendants'
/// paths. Identical full paths collapse into one entry. An empty full path
/// (a pathless root) has no key to register and is skipped.
pub fn collect_fullpaths(
    snapshot: &ConfigSnapshot,
) -> TypegenResult<IndexMap<String, ParamDescriptor>> {
    let mut fullpaths = IndexMap::new();

    for route in snapshot.routes.iter() {
        if route.id != snapshot.root_id() && route.segment().is_none() {
            continue;
        }
        let full = snapshot.routes.fullpath_of(&route.id)?;
        if full.is_empty() || fullpaths.contains_key(&full) {
            continue;
        }
        let params = parse_params(&full);
        fullpaths.insert(full, params);
    }

    Ok(fullpaths)
}

/// Generate `+register.ts`.
pub fn generate(ctx: &TypegenContext) -> TypegenResult<String> {
    let fullpaths = collect_fullpaths(&ctx.config)?;
    let module = string_literal(&ctx.target.framework_module);

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&format!("import {module};\n\n"));
    out.push_str(&format!("declare module {module} {{\n"));
    out.push_str("  interface Register {\n");
    out.push_str("    params: Params;\n");
    out.push_str("  }\n");
    out.push_str("}\n\n");

    if fullpaths.is_empty() {
        out.push_str("type Params = {};\n");
    } else {
        out.push_str("type Params = {\n");
        for (full, params) in &fullpaths {
            out.push_str(&format!(
                "  {}: {};\n",
                string_literal(full),
                params_object(params, 1)
            ));
        }
        out.push_str("};\n");
    }

    out.push('\n');
    out.push_str(&future_augmentation(ctx));
    Ok(out)
}
