use std::collections::HashSet;

use crate::features::categories::models::{Category, CategoryNode};

/// Build a forest from the flat record list.
///
/// Roots are the records with no parent, in input order; each node's
/// children are the records naming it as parent, in input order. A record
/// with an unknown `parent_id` is an orphan and is attached nowhere; records
/// whose parent chain loops back on itself are unreachable from any root and
/// fall out the same way. A duplicate id keeps its first record. Malformed
/// input degrades, it never panics.
pub fn build_forest(flat: &[Category]) -> Vec<CategoryNode> {
    let mut seen = HashSet::new();
    let deduped: Vec<&Category> = flat.iter().filter(|c| seen.insert(c.id)).collect();

    deduped
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(|root| build_node(root, &deduped))
        .collect()
}

fn build_node(category: &Category, all: &[&Category]) -> CategoryNode {
    let children = all
        .iter()
        .filter(|c| c.parent_id == Some(category.id))
        .map(|child| build_node(child, all))
        .collect();

    CategoryNode {
        category: category.clone(),
        children,
    }
}
