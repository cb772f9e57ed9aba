//! Route tree with explicit parent/child adjacency.
//!
//! Parent links are resolved once when the tree is built, so lineage queries
//! are plain index walks instead of repeated id splitting.

use std::collections::HashMap;

use super::types::RouteEntry;
use crate::error::{TypegenError, TypegenResult};

#[derive(Debug, Clone)]
pub struct RouteTree {
    root_id: String,
    /// Entries in declaration order.
    entries: Vec<RouteEntry>,
    /// Route id -> position in `entries`.
    positions: HashMap<String, usize>,
    /// Position -> parent position. `None` only for the root.
    parents: Vec<Option<usize>>,
    /// Position -> child positions, in declaration order.
    children: Vec<Vec<usize>>,
}

impl PartialEq for RouteTree {
    fn eq(&self, other: &Self) -> bool {
        // Adjacency is derived from these two.
        self.root_id == other.root_id && self.entries == other.entries
    }
}

impl RouteTree {
    /// Build the tree, validating ids and parent links.
    ///
    /// Fails on duplicate ids, a missing root, a parent that does not exist,
    /// or a parent cycle.
    pub fn build(root_id: impl Into<String>, entries: Vec<RouteEntry>) -> TypegenResult<Self> {
        let root_id = root_id.into();

        let mut positions = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if positions.insert(entry.id.clone(), pos).is_some() {
                return Err(TypegenError::DuplicateRoute(entry.id.clone()));
            }
        }
        if !positions.contains_key(&root_id) {
            return Err(TypegenError::MissingRoot(root_id));
        }

        let mut parents = vec![None; entries.len()];
        let mut children = vec![Vec::new(); entries.len()];
        for (pos, entry) in entries.iter().enumerate() {
            if entry.id == root_id {
                continue;
            }
            let parent = parent_id_of(entry, &root_id);
            let parent_pos =
                *positions
                    .get(parent)
                    .ok_or_else(|| TypegenError::MissingParent {
                        id: entry.id.clone(),
                        parent: parent.to_string(),
                    })?;
            parents[pos] = Some(parent_pos);
            children[parent_pos].push(pos);
        }

        let tree = Self {
            root_id,
            entries,
            positions,
            parents,
            children,
        };

        for pos in 0..tree.entries.len() {
            tree.chain(pos)?;
        }

        Ok(tree)
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> &RouteEntry {
        // `build` guarantees the root exists.
        &self.entries[self.positions[&self.root_id]]
    }

    pub fn get(&self, id: &str) -> Option<&RouteEntry> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parent(&self, id: &str) -> Option<&RouteEntry> {
        let pos = *self.positions.get(id)?;
        self.parents[pos].map(|parent| &self.entries[parent])
    }

    pub fn children(&self, id: &str) -> Vec<&RouteEntry> {
        match self.positions.get(id) {
            Some(&pos) => self.children[pos]
                .iter()
                .map(|&child| &self.entries[child])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ancestor chain of `id`, root first and `id` last.
    pub fn lineage(&self, id: &str) -> TypegenResult<Vec<&RouteEntry>> {
        let pos = *self
            .positions
            .get(id)
            .ok_or_else(|| TypegenError::UnknownRoute { id: id.to_string() })?;
        Ok(self
            .chain(pos)?
            .into_iter()
            .map(|p| &self.entries[p])
            .collect())
    }

    /// Full path of `id`: its lineage joined by [`fullpath`].
    pub fn fullpath_of(&self, id: &str) -> TypegenResult<String> {
        Ok(fullpath(&self.lineage(id)?))
    }

    /// Positions from the root down to `pos`.
    fn chain(&self, pos: usize) -> TypegenResult<Vec<usize>> {
        let mut chain = vec![pos];
        let mut current = pos;
        while let Some(parent) = self.parents[current] {
            if chain.len() > self.entries.len() {
                return Err(TypegenError::ParentCycle {
                    id: self.entries[pos].id.clone(),
                });
            }
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        Ok(chain)
    }
}

fn parent_id_of<'a>(entry: &'a RouteEntry, root_id: &'a str) -> &'a str {
    if let Some(parent) = entry.parent_id.as_deref() {
        return parent;
    }
    match entry.id.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent,
        _ => root_id,
    }
}

/// Join the path segments of a lineage.
///
/// Routes without a segment are skipped, runs of `/` collapse to one and a
/// trailing `/` is dropped. A leading `/` survives only when a segment
/// carries one.
pub fn fullpath(lineage: &[&RouteEntry]) -> String {
    let joined = lineage
        .iter()
        .filter_map(|route| route.segment())
        .collect::<Vec<_>>()
        .join("/");

    let mut path = String::with_capacity(joined.len());
    for ch in joined.chars() {
        if ch == '/' && path.ends_with('/') {
            continue;
        }
        path.push(ch);
    }
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_tree() -> RouteTree {
        RouteTree::build(
            "root",
            vec![
                RouteEntry::new("root").with_file("root.tsx"),
                RouteEntry::new("blog").with_path("blog"),
                RouteEntry::new("blog/layout"),
                RouteEntry::new("blog/layout/post").with_path(":slug"),
                RouteEntry::new("home").as_index(),
            ],
        )
        .unwrap()
    }

    fn ids(lineage: &[&RouteEntry]) -> Vec<String> {
        lineage.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_lineage_root_first() {
        let tree = blog_tree();
        let lineage = tree.lineage("blog/layout/post").unwrap();
        assert_eq!(ids(&lineage), vec!["root", "blog", "blog/layout", "blog/layout/post"]);

        let lineage = tree.lineage("root").unwrap();
        assert_eq!(ids(&lineage), vec!["root"]);
    }

    #[test]
    fn test_fullpath_skips_pathless_routes() {
        let tree = blog_tree();
        assert_eq!(tree.fullpath_of("blog/layout/post").unwrap(), "blog/:slug");
        assert_eq!(tree.fullpath_of("blog/layout").unwrap(), "blog");
        assert_eq!(tree.fullpath_of("home").unwrap(), "");
        assert_eq!(tree.fullpath_of("root").unwrap(), "");
    }

    #[test]
    fn test_fullpath_normalizes_separators() {
        let root = RouteEntry::new("root").with_path("/");
        let a = RouteEntry::new("a").with_path("/docs/");
        let b = RouteEntry::new("b").with_path("/:page/");
        assert_eq!(fullpath(&[&root]), "/");
        assert_eq!(fullpath(&[&root, &a]), "/docs");
        assert_eq!(fullpath(&[&root, &a, &b]), "/docs/:page");
        assert_eq!(fullpath(&[&a, &b]), "/docs/:page");

        let plain = RouteEntry::new("c").with_path("users");
        let id = RouteEntry::new("d").with_path(":id");
        assert_eq!(fullpath(&[&plain, &id]), "users/:id");
        assert!(!fullpath(&[&root, &a, &b]).contains("//"));
    }

    #[test]
    fn test_explicit_parent_overrides_id() {
        let tree = RouteTree::build(
            "root",
            vec![
                RouteEntry::new("root"),
                RouteEntry::new("routes/_auth"),
                RouteEntry::new("routes/login")
                    .with_path("login")
                    .with_parent("routes/_auth"),
                RouteEntry::new("routes").with_path("r"),
            ],
        )
        .unwrap();

        let lineage = tree.lineage("routes/login").unwrap();
        assert_eq!(ids(&lineage), vec!["root", "routes", "routes/_auth", "routes/login"]);
        assert_eq!(tree.fullpath_of("routes/login").unwrap(), "r/login");
    }

    #[test]
    fn test_children_adjacency() {
        let tree = blog_tree();
        let children = tree.children("root");
        assert_eq!(ids(&children), vec!["blog", "home"]);
        assert_eq!(tree.parent("blog/layout").map(|r| r.id.as_str()), Some("blog"));
        assert!(tree.parent("root").is_none());
        assert!(tree.children("nope").is_empty());
        assert_eq!(tree.root().file.as_deref(), Some("root.tsx"));
    }

    #[test]
    fn test_missing_parent_is_fatal() {
        let err = RouteTree::build(
            "root",
            vec![RouteEntry::new("root"), RouteEntry::new("admin/users")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TypegenError::MissingParent { ref id, ref parent } if id == "admin/users" && parent == "admin"
        ));
    }

    #[test]
    fn test_invalid_trees_rejected() {
        let err = RouteTree::build("root", vec![RouteEntry::new("a")]).unwrap_err();
        assert!(matches!(err, TypegenError::MissingRoot(_)));

        let err = RouteTree::build(
            "root",
            vec![RouteEntry::new("root"), RouteEntry::new("a"), RouteEntry::new("a")],
        )
        .unwrap_err();
        assert!(matches!(err, TypegenError::DuplicateRoute(ref id) if id == "a"));

        let err = RouteTree::build(
            "root",
            vec![
                RouteEntry::new("root"),
                RouteEntry::new("x").with_parent("y"),
                RouteEntry::new("y").with_parent("x"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TypegenError::ParentCycle { .. }));
    }

    #[test]
    fn test_unknown_route_lineage() {
        let tree = blog_tree();
        assert!(matches!(
            tree.lineage("missing"),
            Err(TypegenError::UnknownRoute { .. })
        ));
    }
}
