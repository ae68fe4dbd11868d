//! Namespace resource tree
//!
//! Resolution, assembly and rendering are pure functions of one
//! [`ResourceCollections`] snapshot: the same snapshot always renders the
//! same lines.

pub mod builder;
pub mod index;
pub mod models;
pub mod printer;
pub mod resolver;
pub mod rules;
pub mod workload;

pub use builder::{build_tree, is_cron_job_owned};
pub use index::OwnerIndex;
pub use models::{FoundSet, ResourceNode, ResourceRef, TreeOutput};
pub use printer::{Palette, Printer, parse_color};
pub use resolver::{RelatedResources, Resolver};
pub use rules::RuleSet;
pub use workload::{Workload, extract_pod_spec};

use crate::kube::ResourceCollections;

/// Knobs for building and rendering a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub rules: RuleSet,
    /// `None` renders plain text
    pub palette: Option<Palette>,
    /// Hang one `Container/<name>` node under every Pod
    pub show_containers: bool,
}

impl TreeOptions {
    pub fn plain() -> Self {
        Self::default()
    }
}

/// Build the namespace tree and render it, or report that there is nothing to show
pub fn build_and_render(
    namespace: &str,
    collections: &ResourceCollections,
    options: &TreeOptions,
) -> TreeOutput {
    match build_tree(namespace, collections, options) {
        Some(root) => TreeOutput::Tree(Printer::new(options.palette).render(&root)),
        None => TreeOutput::Empty,
    }
}
