//! Ambient module for the server build virtual module.
//!
//! Independent of the route config: the same text is written on every pass.

use super::ts::{HEADER, string_literal};

pub const SERVER_BUILD_FILE: &str = "+server-build.d.ts";

/// Virtual module id the bundler exposes the server build under.
pub const SERVER_BUILD_MODULE: &str = "virtual:react-router/server-build";

const SERVER_BUILD_EXPORTS: &[&str] = &[
    "assets",
    "assetsBuildDirectory",
    "basename",
    "entry",
    "future",
    "isSpaMode",
    "prerender",
    "publicPath",
    "routes",
    "ssr",
];

pub fn generate(framework_module: &str) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&format!(
        "declare module {} {{\n",
        string_literal(SERVER_BUILD_MODULE)
    ));
    out.push_str(&format!(
        "  import {{ ServerBuild }} from {};\n",
        string_literal(framework_module)
    ));
    for export in SERVER_BUILD_EXPORTS {
        out.push_str(&format!(
            "  export const {export}: ServerBuild[\"{export}\"];\n"
        ));
    }
    out.push_str("}\n");
    out
}
