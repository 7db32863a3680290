use crate::features::categories::dtos::{CategoryOptionDto, CategoryRowDto};
use crate::features::categories::models::CategoryNode;

const INDENT: &str = "  ";
const BRANCH_MARKER: &str = "└ ";

/// Indented label for a node at the given depth: one two-space indent per
/// level, then a branch marker for anything below the root.
fn display_name(name: &str, level: usize) -> String {
    if level == 0 {
        name.to_string()
    } else {
        format!("{}{}{}", INDENT.repeat(level), BRANCH_MARKER, name)
    }
}

/// Pre-order projection of the whole forest for table rendering. Every
/// source field rides along unchanged next to the computed `level` and
/// `display_name`.
pub fn flatten_for_display(forest: &[CategoryNode]) -> Vec<CategoryRowDto> {
    let mut rows = Vec::new();
    for node in forest {
        push_rows(node, 0, &mut rows);
    }
    rows
}

fn push_rows(node: &CategoryNode, level: usize, rows: &mut Vec<CategoryRowDto>) {
    let category = &node.category;
    rows.push(CategoryRowDto {
        id: category.id,
        parent_id: category.parent_id,
        name: category.name.clone(),
        description: category.description.clone(),
        created_at: category.created_at,
        updated_at: category.updated_at,
        level,
        display_name: display_name(&category.name, level),
    });
    for child in &node.children {
        push_rows(child, level + 1, rows);
    }
}

/// Pre-order projection for the parent dropdown.
///
/// When `exclude_subtree_root` is given (the id being edited), that node and
/// its entire subtree are omitted from the output, not merely disabled, so
/// the dropdown can never offer a parent choice that loops the hierarchy.
pub fn flatten_for_selection(
    forest: &[CategoryNode],
    exclude_subtree_root: Option<i64>,
) -> Vec<CategoryOptionDto> {
    let mut options = Vec::new();
    for node in forest {
        push_options(node, 0, exclude_subtree_root, &mut options);
    }
    options
}

fn push_options(
    node: &CategoryNode,
    level: usize,
    excluded: Option<i64>,
    options: &mut Vec<CategoryOptionDto>,
) {
    if excluded == Some(node.category.id) {
        return;
    }
    options.push(CategoryOptionDto {
        id: node.category.id,
        name: node.category.name.clone(),
        level,
        display_name: display_name(&node.category.name, level),
    });
    for child in &node.children {
        push_options(child, level + 1, excluded, options);
    }
}
