//! Route and snapshot types.

use serde::{Deserialize, Serialize};

use super::tree::RouteTree;

/// Reserved id of the root route unless the route config overrides it.
pub const DEFAULT_ROOT_ID: &str = "root";

/// One node of the route tree, as declared in the route config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Unique route id. Unless `parent_id` is set, the parent is the id with
    /// its last `/` component removed (or the root).
    pub id: String,

    /// Path pattern segment. Absent for layout and index routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Route module file, relative to the app directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Explicit parent id, overriding the id-derived parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub index: bool,
}

impl RouteEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            file: None,
            parent_id: None,
            index: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn as_index(mut self) -> Self {
        self.index = true;
        self
    }

    /// The path segment this route adds to its lineage, if any.
    pub fn segment(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Opt-in capability flags of the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureFlags {
    #[serde(default)]
    pub unstable_middleware: bool,
}

/// One fully loaded route configuration.
///
/// Never mutated; a reload produces a new snapshot that replaces the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    pub app_directory: String,
    pub mode: String,
    pub future: FutureFlags,
    pub routes: RouteTree,
}

impl ConfigSnapshot {
    pub fn new(
        app_directory: impl Into<String>,
        mode: impl Into<String>,
        future: FutureFlags,
        routes: RouteTree,
    ) -> Self {
        Self {
            app_directory: app_directory.into(),
            mode: mode.into(),
            future,
            routes,
        }
    }

    pub fn root_id(&self) -> &str {
        self.routes.root_id()
    }

    /// True when the route tree differs in any generated-relevant way.
    pub fn routes_differ(&self, other: &ConfigSnapshot) -> bool {
        self.routes != other.routes
    }

    /// True when the general (non-route) configuration differs.
    pub fn config_differs(&self, other: &ConfigSnapshot) -> bool {
        self.app_directory != other.app_directory
            || self.mode != other.mode
            || self.future != other.future
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(routes: Vec<RouteEntry>) -> ConfigSnapshot {
        let tree = RouteTree::build(DEFAULT_ROOT_ID, routes).unwrap();
        ConfigSnapshot::new("app", "development", FutureFlags::default(), tree)
    }

    #[test]
    fn test_segment_skips_empty_path() {
        assert_eq!(RouteEntry::new("a").segment(), None);
        assert_eq!(RouteEntry::new("a").with_path("").segment(), None);
        assert_eq!(RouteEntry::new("a").with_path("x").segment(), Some("x"));
    }

    #[test]
    fn test_change_classification() {
        let base = snapshot(vec![
            RouteEntry::new("root"),
            RouteEntry::new("posts").with_path("posts"),
        ]);

        let same = snapshot(vec![
            RouteEntry::new("root"),
            RouteEntry::new("posts").with_path("posts"),
        ]);
        assert!(!base.routes_differ(&same));
        assert!(!base.config_differs(&same));

        let moved = snapshot(vec![
            RouteEntry::new("root"),
            RouteEntry::new("posts").with_path("articles"),
        ]);
        assert!(base.routes_differ(&moved));
        assert!(!base.config_differs(&moved));

        let mut flagged = same.clone();
        flagged.future.unstable_middleware = true;
        assert!(!base.routes_differ(&flagged));
        assert!(base.config_differs(&flagged));
    }

    #[test]
    fn test_route_entry_from_toml() {
        let entry: RouteEntry = toml::from_str(
            r#"
id = "posts/$slug"
path = ":slug"
file = "routes/post.tsx"
"#,
        )
        .unwrap();
        assert_eq!(entry.id, "posts/$slug");
        assert_eq!(entry.segment(), Some(":slug"));
        assert_eq!(entry.parent_id, None);
        assert!(!entry.index);
    }
}
