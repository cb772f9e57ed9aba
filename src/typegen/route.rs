//! Per-route declaration files.
//!
//! Each route gets `<app>/<id dirs>/+types/<id name>.ts` declaring its
//! `Info` (lineage, id, file, path and params) and a `Route` namespace of
//! helpers. The root route's file also augments the framework's `Future`
//! interface with the middleware flag.

use std::path::PathBuf;

use super::TypegenContext;
use super::ts::{HEADER, params_object, relative_import, string_literal};
use crate::error::TypegenResult;
use crate::routes::{ConfigSnapshot, RouteEntry, fullpath, parse_params};

/// Path of a route's declaration file relative to the output dir, as
/// `/`-free components.
///
/// `.` and `..` id components are replaced so a route id can never place a
/// file outside the output directory.
pub fn types_components(snapshot: &ConfigSnapshot, route: &RouteEntry) -> Vec<String> {
    let mut parts: Vec<String> = snapshot
        .app_directory
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .map(sanitize)
        .collect();

    let mut id_parts: Vec<String> = route
        .id
        .split('/')
        .filter(|p| !p.is_empty())
        .map(sanitize)
        .collect();
    let name = id_parts.pop().unwrap_or_else(|| "_".to_string());

    parts.extend(id_parts);
    parts.push("+types".to_string());
    parts.push(format!("{name}.ts"));
    parts
}

/// [`types_components`] as a relative filesystem path.
pub fn types_path(snapshot: &ConfigSnapshot, route: &RouteEntry) -> PathBuf {
    types_components(snapshot, route).iter().collect()
}

fn sanitize(part: &str) -> String {
    match part {
        "." | ".." => "_".repeat(part.len()),
        other => other.to_string(),
    }
}

/// Generate the declaration source for one route.
pub fn generate(ctx: &TypegenContext, route: &RouteEntry) -> TypegenResult<String> {
    let snapshot = ctx.config.as_ref();
    let lineage = snapshot.routes.lineage(&route.id)?;
    let full = fullpath(&lineage);
    let params = parse_params(&full);
    let own = types_components(snapshot, route);
    let parents = &lineage[..lineage.len() - 1];

    let mut out = String::from(HEADER);
    out.push('\n');

    if !parents.is_empty() {
        for (i, parent) in parents.iter().enumerate() {
            let spec = relative_import(&own, &types_components(snapshot, parent));
            out.push_str(&format!(
                "import type {{ Info as Parent{i} }} from {};\n",
                string_literal(&spec)
            ));
        }
        out.push('\n');
    }

    let parent_list = (0..parents.len())
        .map(|i| format!("Parent{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str("export type Info = {\n");
    out.push_str(&format!("  parents: [{parent_list}];\n"));
    out.push_str(&format!("  id: {};\n", string_literal(&route.id)));
    out.push_str(&format!("  file: {};\n", optional_literal(route.file.as_deref())));
    out.push_str(&format!("  path: {};\n", optional_literal(route.path.as_deref())));
    out.push_str(&format!("  fullpath: {};\n", string_literal(&full)));
    out.push_str(&format!("  index: {};\n", route.index));
    out.push_str(&format!(
        "  params: {} & {{ [key: string]: string | undefined }};\n",
        params_object(&params, 1)
    ));
    out.push_str("};\n\n");

    out.push_str("export namespace Route {\n");
    out.push_str("  export type Params = Info[\"params\"];\n");
    out.push_str("  export type Parents = Info[\"parents\"];\n");
    out.push_str("  export type Fullpath = Info[\"fullpath\"];\n");
    out.push_str("}\n");

    if route.id == snapshot.root_id() {
        out.push('\n');
        out.push_str(&future_augmentation(ctx));
    }

    Ok(out)
}

/// `declare module` block exposing the middleware flag as a literal type.
pub(crate) fn future_augmentation(ctx: &TypegenContext) -> String {
    format!(
        "declare module {} {{\n  interface Future {{\n    unstable_middleware: {};\n  }}\n}}\n",
        string_literal(&ctx.target.framework_module),
        ctx.config.future.unstable_middleware
    )
}

fn optional_literal(value: Option<&str>) -> String {
    match value {
        Some(value) => string_literal(value),
        None => "undefined".to_string(),
    }
}
