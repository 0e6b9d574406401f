// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Category hierarchy resolution.
//!
//! Categories are stored as flat rows with a nullable parent back-reference.
//! This module turns those rows into a usable tree, flattens it for
//! selection UIs, expands category selections to their descendants for the
//! sampler, and guards the hierarchy against self-references and cycles.

use quizdeck_domain::{Category, DomainError};
use std::collections::{HashMap, HashSet};

/// A category with its ordered child subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    /// The category at this position in the tree.
    pub category: Category,
    /// Child categories, ordered by name ascending, ties by id ascending.
    pub children: Vec<CategoryNode>,
}

/// A category annotated with its depth in the tree, as produced by a
/// depth-first pre-order traversal. Roots are at depth 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategory {
    /// The category.
    pub category: Category,
    /// Distance from the root of its tree.
    pub depth: usize,
}

/// Orders sibling categories by name ascending, ties broken by id.
fn sibling_order(a: &Category, b: &Category) -> std::cmp::Ordering {
    a.name.cmp(&b.name).then(a.id.cmp(&b.id))
}

/// Builds the category tree from flat rows.
///
/// Categories whose parent id is absent, unknown, or equal to their own id
/// become roots. Sibling ordering is deterministic: name ascending, ties
/// broken by id ascending. The build terminates even when the rows contain
/// a pre-existing cycle; categories trapped in such a cycle are
/// unreachable from any root and are omitted.
#[must_use]
pub fn build_tree(rows: &[Category]) -> Vec<CategoryNode> {
    let known_ids: HashSet<i64> = rows.iter().map(|category| category.id).collect();

    let mut roots: Vec<&Category> = Vec::new();
    let mut children_index: HashMap<i64, Vec<&Category>> = HashMap::new();
    for category in rows {
        match category.parent_id {
            Some(parent_id) if known_ids.contains(&parent_id) && parent_id != category.id => {
                children_index.entry(parent_id).or_default().push(category);
            }
            _ => roots.push(category),
        }
    }

    roots.sort_unstable_by(|a, b| sibling_order(a, b));
    for siblings in children_index.values_mut() {
        siblings.sort_unstable_by(|a, b| sibling_order(a, b));
    }

    let mut visited: HashSet<i64> = HashSet::new();
    roots
        .into_iter()
        .map(|root| build_node(root, &children_index, &mut visited))
        .collect()
}

/// Recursively builds one node. The visited set guards against revisiting
/// a category through corrupt parent links.
fn build_node(
    category: &Category,
    children_index: &HashMap<i64, Vec<&Category>>,
    visited: &mut HashSet<i64>,
) -> CategoryNode {
    visited.insert(category.id);

    let mut children: Vec<CategoryNode> = Vec::new();
    if let Some(siblings) = children_index.get(&category.id) {
        for child in siblings {
            if visited.contains(&child.id) {
                continue;
            }
            children.push(build_node(child, children_index, visited));
        }
    }

    CategoryNode {
        category: category.clone(),
        children,
    }
}

/// Flattens a category tree into a depth-annotated list.
///
/// Traversal is depth-first pre-order, so each category appears before its
/// descendants and sibling order is preserved.
#[must_use]
pub fn flatten(nodes: &[CategoryNode]) -> Vec<FlatCategory> {
    let mut flat: Vec<FlatCategory> = Vec::new();
    for node in nodes {
        flatten_into(node, 0, &mut flat);
    }
    flat
}

fn flatten_into(node: &CategoryNode, depth: usize, out: &mut Vec<FlatCategory>) {
    out.push(FlatCategory {
        category: node.category.clone(),
        depth,
    });
    for child in &node.children {
        flatten_into(child, depth + 1, out);
    }
}

/// Expands a set of category ids to include every transitive descendant.
///
/// Selecting a parent category thereby includes all child categories'
/// questions. Requested ids that match no row are kept unexpanded, so the
/// result always contains the input set. Terminates on malformed (cyclic)
/// rows.
#[must_use]
pub fn expand_to_descendants(category_ids: &HashSet<i64>, rows: &[Category]) -> HashSet<i64> {
    let mut children_index: HashMap<i64, Vec<i64>> = HashMap::new();
    for category in rows {
        if let Some(parent_id) = category.parent_id {
            if parent_id != category.id {
                children_index.entry(parent_id).or_default().push(category.id);
            }
        }
    }

    let mut expanded: HashSet<i64> = category_ids.clone();
    let mut frontier: Vec<i64> = category_ids.iter().copied().collect();
    while let Some(current) = frontier.pop() {
        if let Some(children) = children_index.get(&current) {
            for &child in children {
                if expanded.insert(child) {
                    frontier.push(child);
                }
            }
        }
    }

    expanded
}

/// Validates that making `candidate_parent_id` the parent of `category_id`
/// keeps the hierarchy acyclic.
///
/// This is a full ancestor walk, not a single equality test: starting from
/// the candidate parent it follows parent links upward and rejects the
/// assignment if it encounters `category_id` again. The walk is bounded by
/// the total row count, so it terminates even when the stored rows already
/// contain a corrupt cycle; a chain that fails to reach a root within that
/// bound is itself cyclic and the assignment is rejected.
///
/// # Arguments
///
/// * `category_id` - The category being reparented
/// * `candidate_parent_id` - The proposed parent, or `None` for root
/// * `rows` - The current category rows
///
/// # Errors
///
/// Returns `DomainError::HierarchyCycle` if the assignment would create a
/// self-reference or a transitive cycle, or would attach the category to
/// an already-cyclic ancestor chain.
pub fn validate_parent(
    category_id: i64,
    candidate_parent_id: Option<i64>,
    rows: &[Category],
) -> Result<(), DomainError> {
    let Some(parent_id) = candidate_parent_id else {
        return Ok(());
    };

    // Rule: a category must not be its own parent
    if parent_id == category_id {
        return Err(DomainError::HierarchyCycle {
            category_id,
            parent_id,
        });
    }

    let parent_of: HashMap<i64, Option<i64>> = rows
        .iter()
        .map(|category| (category.id, category.parent_id))
        .collect();

    // Rule: walking up from the candidate parent must never reach the
    // category itself
    let mut current: i64 = parent_id;
    for _ in 0..rows.len() {
        match parent_of.get(&current) {
            Some(Some(next)) => {
                if *next == category_id {
                    return Err(DomainError::HierarchyCycle {
                        category_id,
                        parent_id,
                    });
                }
                current = *next;
            }
            // Reached a root or an id outside the rows: no cycle.
            _ => return Ok(()),
        }
    }

    // The ancestor chain did not terminate within the row count, so the
    // chain already contains a cycle. Refuse to attach to it.
    Err(DomainError::HierarchyCycle {
        category_id,
        parent_id,
    })
}
