//! Route model: entries, the route tree, lineage and path params.

pub mod params;
pub mod tree;
pub mod types;

pub use params::{ParamDescriptor, SPLAT, parse_params};
pub use tree::{RouteTree, fullpath};
pub use types::{ConfigSnapshot, DEFAULT_ROOT_ID, FutureFlags, RouteEntry};
