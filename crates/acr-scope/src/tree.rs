// tree.rs — Scope tree construction and traversal.
//
// The tree is an arena: nodes live in a Vec, relationships are index
// lists. No parent/child pointers means no reference cycles, and the
// built tree can be traversed concurrently from multiple requests
// because nothing in it is mutable.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;
use uuid::Uuid;

use crate::error::HierarchyError;
use crate::record::{ScopeRecord, ScopeType};

/// A rooted scope hierarchy for one tenant.
///
/// Built once from flat records via [`ScopeTree::build`]; read-only after
/// that. Children are ordered by materialized path, so two builds from the
/// same rows produce structurally identical trees regardless of input
/// order.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    nodes: Vec<ScopeRecord>,
    index: HashMap<Uuid, usize>,
    children: Vec<Vec<usize>>,
    root: usize,
    regions: Vec<usize>,
    countries: Vec<usize>,
    brands: Vec<usize>,
}

impl ScopeTree {
    /// Assemble a tree from flat scope records.
    ///
    /// Validates the hierarchy invariants: exactly one enterprise root, every
    /// non-root scope has an existing parent, ids and paths are unique,
    /// and every scope is reachable from the root.
    pub fn build(mut records: Vec<ScopeRecord>) -> Result<Self, HierarchyError> {
        // Sort by path so node and child ordering is input-order independent.
        records.sort_by(|a, b| a.path.cmp(&b.path));

        let mut index = HashMap::with_capacity(records.len());
        let mut paths = HashSet::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id, i).is_some() {
                return Err(HierarchyError::DuplicateId {
                    scope_id: record.id,
                });
            }
            if !paths.insert(record.path.as_str()) {
                return Err(HierarchyError::DuplicatePath {
                    path: record.path.clone(),
                });
            }
        }

        // Exactly one enterprise root.
        let mut root: Option<usize> = None;
        for (i, record) in records.iter().enumerate() {
            if record.is_root() {
                if let Some(first) = root {
                    return Err(HierarchyError::MultipleRoots {
                        first: records[first].id,
                        second: record.id,
                    });
                }
                root = Some(i);
            }
        }
        let root = root.ok_or(HierarchyError::NoRoot)?;

        // Wire children; reject orphans and detached non-roots.
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
        let mut regions = Vec::new();
        let mut countries = Vec::new();
        let mut brands = Vec::new();
        for (i, record) in records.iter().enumerate() {
            match record.scope_type {
                ScopeType::Enterprise => {}
                ScopeType::Region => regions.push(i),
                ScopeType::Country => countries.push(i),
                ScopeType::Brand => brands.push(i),
            }
            if i == root {
                continue;
            }
            let parent_id = record.parent_id.ok_or(HierarchyError::DetachedScope {
                scope_id: record.id,
            })?;
            let parent = *index
                .get(&parent_id)
                .ok_or(HierarchyError::OrphanScope {
                    scope_id: record.id,
                    parent_id,
                })?;
            children[parent].push(i);
        }

        // Every node must be reachable from the root. A parent reference
        // that points into a detached cycle passes the orphan check but
        // fails here.
        let mut seen = vec![false; records.len()];
        let mut queue = VecDeque::from([root]);
        seen[root] = true;
        while let Some(i) = queue.pop_front() {
            for &child in &children[i] {
                if !seen[child] {
                    seen[child] = true;
                    queue.push_back(child);
                }
            }
        }
        if let Some(i) = seen.iter().position(|s| !s) {
            return Err(HierarchyError::UnreachableScope {
                scope_id: records[i].id,
            });
        }

        debug!(
            scopes = records.len(),
            regions = regions.len(),
            countries = countries.len(),
            brands = brands.len(),
            "scope tree built"
        );

        Ok(Self {
            nodes: records,
            index,
            children,
            root,
            regions,
            countries,
            brands,
        })
    }

    /// The single enterprise root.
    pub fn root(&self) -> &ScopeRecord {
        &self.nodes[self.root]
    }

    /// Look up a scope by id.
    pub fn get(&self, id: Uuid) -> Option<&ScopeRecord> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Whether the tree contains the given scope id.
    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// Direct children of a scope, ordered by path.
    pub fn children(&self, id: Uuid) -> Vec<&ScopeRecord> {
        match self.index.get(&id) {
            Some(&i) => self.children[i].iter().map(|&c| &self.nodes[c]).collect(),
            None => Vec::new(),
        }
    }

    /// The chain of scopes from the root down to (and including) the
    /// target. Returns None for an unknown id.
    ///
    /// This root-to-leaf ordering is what the inheritance resolver walks.
    pub fn path_from_root(&self, id: Uuid) -> Option<Vec<&ScopeRecord>> {
        let mut i = *self.index.get(&id)?;
        let mut chain = vec![&self.nodes[i]];
        while let Some(parent_id) = self.nodes[i].parent_id {
            // Build guarantees parents exist and the chain terminates.
            i = self.index[&parent_id];
            chain.push(&self.nodes[i]);
        }
        chain.reverse();
        Some(chain)
    }

    /// All region scopes, ordered by path.
    pub fn regions(&self) -> Vec<&ScopeRecord> {
        self.regions.iter().map(|&i| &self.nodes[i]).collect()
    }

    /// All country scopes, ordered by path.
    pub fn countries(&self) -> Vec<&ScopeRecord> {
        self.countries.iter().map(|&i| &self.nodes[i]).collect()
    }

    /// All brand scopes, ordered by path.
    pub fn brands(&self) -> Vec<&ScopeRecord> {
        self.brands.iter().map(|&i| &self.nodes[i]).collect()
    }

    /// Number of scopes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never true for a built tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
