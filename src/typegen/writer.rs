//! Output writer: full replace of the output directory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{TypegenContext, register, route, server_build};
use crate::error::{TypegenError, TypegenResult};

/// Summary of one write pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteStats {
    pub routes: usize,
    pub files: usize,
}

/// Replace the output directory with the complete output set for `ctx`.
///
/// All sources are rendered before anything is deleted, so a corrupt route
/// tree, two routes sharing a declaration file, or an output directory that
/// covers the project leaves everything on disk in place. Once deletion
/// starts, I/O errors abort the pass and are returned as-is.
pub fn write_all(ctx: &TypegenContext) -> TypegenResult<WriteStats> {
    ctx.target.check_output_dir()?;
    let out_dir = ctx.output_dir();

    let mut owners: HashMap<PathBuf, &str> = HashMap::with_capacity(ctx.config.routes.len());
    let mut files: Vec<(PathBuf, String)> = Vec::with_capacity(ctx.config.routes.len() + 2);
    for entry in ctx.config.routes.iter() {
        let rel = route::types_path(&ctx.config, entry);
        if let Some(first) = owners.insert(rel.clone(), &entry.id) {
            return Err(TypegenError::TypesPathCollision {
                path: rel,
                first: first.to_string(),
                second: entry.id.clone(),
            });
        }
        files.push((out_dir.join(&rel), route::generate(ctx, entry)?));
    }
    files.push((
        out_dir.join(register::REGISTER_FILE),
        register::generate(ctx)?,
    ));
    files.push((
        out_dir.join(server_build::SERVER_BUILD_FILE),
        server_build::generate(&ctx.target.framework_module),
    ));

    clear_output(out_dir)?;
    for (path, source) in &files {
        write_file(path, source)?;
    }

    crate::debug_event!(
        "typegen",
        "wrote",
        "{} files to {}",
        files.len(),
        out_dir.display()
    );

    Ok(WriteStats {
        routes: ctx.config.routes.len(),
        files: files.len(),
    })
}

/// Recursively delete `dir`. A missing directory is fine.
fn clear_output(dir: &Path) -> TypegenResult<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(TypegenError::Clear {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, contents: &str) -> TypegenResult<()> {
    let to_err = |source: std::io::Error| TypegenError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    std::fs::write(path, contents).map_err(to_err)
}
