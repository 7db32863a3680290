use std::collections::HashMap;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;

/// Re-parenting work implied by deleting a category.
///
/// Children are never cascade-deleted. Each id listed here must be
/// reassigned to `reassign_to` (the deleted node's own parent; `None`
/// promotes to root) before the delete commits, so no record is left
/// pointing at a parent that no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionPlan {
    pub orphaned_child_ids: Vec<i64>,
    pub reassign_to: Option<i64>,
}

/// Reject a parent assignment that would make `node_id` its own ancestor.
///
/// Walks up from the candidate through `parent_id` links; hitting `node_id`
/// anywhere on that chain (the candidate itself included) is a cycle. A new
/// node (`node_id` of `None`) cannot yet be anyone's ancestor, and a `None`
/// candidate always promotes to root; both are accepted. A non-null
/// candidate must exist in the current list, so a committed write never
/// dangles.
///
/// The dropdown already hides a node's own subtree when editing it; this is
/// the authoritative check for intents that bypass the dropdown.
pub fn validate_parent_assignment(
    node_id: Option<i64>,
    candidate_parent_id: Option<i64>,
    flat: &[Category],
) -> Result<()> {
    let Some(candidate) = candidate_parent_id else {
        return Ok(());
    };

    let parents: HashMap<i64, Option<i64>> =
        flat.iter().map(|c| (c.id, c.parent_id)).collect();

    if !parents.contains_key(&candidate) {
        return Err(AppError::BadRequest(format!(
            "Parent category {} does not exist",
            candidate
        )));
    }

    let Some(node_id) = node_id else {
        return Ok(());
    };

    let mut cursor = Some(candidate);
    let mut hops = 0usize;
    while let Some(id) = cursor {
        if id == node_id {
            return Err(AppError::Conflict(
                "would create a circular category reference".to_string(),
            ));
        }
        // A missing parent ends the walk, same as reaching a root. The hop
        // cap keeps already-cyclic input data from spinning the walk forever.
        hops += 1;
        if hops > flat.len() {
            break;
        }
        cursor = parents.get(&id).copied().flatten();
    }

    Ok(())
}

/// Plan what deleting `node_id` does to its direct children. Informational:
/// nothing is mutated here, and nothing cascades.
pub fn plan_deletion(node_id: i64, flat: &[Category]) -> Result<DeletionPlan> {
    let node = flat
        .iter()
        .find(|c| c.id == node_id)
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", node_id)))?;

    let orphaned_child_ids = flat
        .iter()
        .filter(|c| c.parent_id == Some(node_id))
        .map(|c| c.id)
        .collect();

    Ok(DeletionPlan {
        orphaned_child_ids,
        reassign_to: node.parent_id,
    })
}
