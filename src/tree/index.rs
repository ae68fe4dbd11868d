//! Owner-reference index
//!
//! Built once per tree build so that "which pods does ReplicaSet X own" is a
//! map lookup instead of a scan of every pod for every parent.

use std::collections::HashMap;

use kube::{Resource, ResourceExt};

/// Items of one collection grouped by `(owner kind, owner name)`
///
/// Positions keep collection order, and an item is listed once per owner
/// even if it repeats the same owner reference.
#[derive(Debug)]
pub struct OwnerIndex<'a, K> {
    items: &'a [K],
    by_owner: HashMap<String, HashMap<String, Vec<usize>>>,
}

impl<'a, K: Resource> OwnerIndex<'a, K> {
    pub fn new(items: &'a [K]) -> Self {
        let mut by_owner: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();

        for (position, item) in items.iter().enumerate() {
            for owner in item.owner_references() {
                let owned = by_owner
                    .entry(owner.kind.clone())
                    .or_default()
                    .entry(owner.name.clone())
                    .or_default();
                if owned.last() != Some(&position) {
                    owned.push(position);
                }
            }
        }

        Self { items, by_owner }
    }

    /// Every item whose owner references include `(kind, name)`
    ///
    /// Matching is exact and case-sensitive on both parts.
    pub fn owned_by(&self, kind: &str, name: &str) -> Vec<&'a K> {
        self.by_owner
            .get(kind)
            .and_then(|names| names.get(name))
            .map(|positions| positions.iter().map(|&i| &self.items[i]).collect())
            .unwrap_or_default()
    }

    /// Number of distinct owners indexed
    pub fn owner_count(&self) -> usize {
        self.by_owner.values().map(HashMap::len).sum()
    }
}
