use chrono::{DateTime, Utc};

/// Flat category record, the stored shape. Parentage is carried by
/// `parent_id` only; `None` means root-level.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Nested tree node produced by the tree builder. `children` is derived
/// from the flat records and is never itself a source of truth for
/// parentage.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}
