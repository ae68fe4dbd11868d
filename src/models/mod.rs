//! Model layer
//!
//! Kind identifiers shared by the resolver, the tree and the renderer.
//! The resource objects themselves are the `k8s-openapi` types.

pub mod resource_kind;

pub use resource_kind::{KindCategory, ResourceKind};
