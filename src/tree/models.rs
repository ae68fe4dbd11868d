//! Data structures for the namespace tree

use std::collections::HashSet;
use std::fmt;

use crate::models::ResourceKind;

/// Identity of a resource within one namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// A node in the rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub kind: ResourceKind,
    pub name: String,
    pub children: Vec<ResourceNode>,
}

impl ResourceNode {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: ResourceNode) {
        self.children.push(child);
    }

    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(self.kind, self.name.clone())
    }

    /// Stable sort of every child list by kind name, then resource name
    pub fn sort_recursive(&mut self) {
        self.children
            .sort_by(|a, b| (a.kind.as_str(), &a.name).cmp(&(b.kind.as_str(), &b.name)));
        for child in &mut self.children {
            child.sort_recursive();
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ResourceNode::count).sum::<usize>()
    }

    /// Find a direct child by kind and name
    pub fn child(&self, kind: ResourceKind, name: &str) -> Option<&ResourceNode> {
        self.children
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }
}

/// Resources already attached somewhere in the tree being built
///
/// Shared across every workload of one build, so a ConfigMap, Secret or PVC
/// used by several workloads is listed under the first one processed.
/// Services never go through this set.
#[derive(Debug, Clone, Default)]
pub struct FoundSet {
    seen: HashSet<ResourceRef>,
}

impl FoundSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resource; returns false if it was already claimed
    pub fn claim(&mut self, resource: ResourceRef) -> bool {
        self.seen.insert(resource)
    }

    pub fn contains(&self, resource: &ResourceRef) -> bool {
        self.seen.contains(resource)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Result of building and rendering a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeOutput {
    /// The namespace has no Deployments, StatefulSets, DaemonSets, Jobs or CronJobs
    Empty,
    /// Rendered tree lines, root first
    Tree(Vec<String>),
}
