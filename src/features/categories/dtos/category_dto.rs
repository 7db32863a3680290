use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::categories::models::Category;

/// Category as carried on the wire by the catalog API.
///
/// Listing responses may arrive flat or pre-nested via `subcategories`;
/// nesting is flattened away before the tree builder runs, so derived
/// structure never competes with `parentId` as a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<CategoryPayload>,
}

impl CategoryPayload {
    /// Flatten a possibly pre-nested listing into flat records, pre-order.
    /// A nested child that omits its own `parentId` inherits the enclosing
    /// node's id.
    pub fn flatten_all(payloads: Vec<CategoryPayload>) -> Vec<Category> {
        let mut records = Vec::new();
        for payload in payloads {
            Self::flatten_into(payload, None, &mut records);
        }
        records
    }

    /// Single-node conversion for create/update responses. Any nesting on
    /// the payload is dropped; only the node itself is taken.
    pub fn into_record(self) -> Category {
        Category {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn flatten_into(payload: CategoryPayload, enclosing_id: Option<i64>, out: &mut Vec<Category>) {
        let id = payload.id;
        let parent_id = payload.parent_id.or(enclosing_id);
        out.push(Category {
            id,
            parent_id,
            name: payload.name,
            description: payload.description,
            created_at: payload.created_at,
            updated_at: payload.updated_at,
        });
        for child in payload.subcategories {
            Self::flatten_into(child, Some(id), out);
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub parent_id: Option<i64>,
}

/// Request DTO for updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub parent_id: Option<i64>,
}

/// Table row for hierarchical display: every source field plus the computed
/// depth and indented display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRowDto {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub level: usize,
    pub display_name: String,
}

/// Dropdown entry for choosing a category's parent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionDto {
    pub id: i64,
    pub name: String,
    pub level: usize,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: i64, parent_id: Option<i64>, name: &str) -> CategoryPayload {
        CategoryPayload {
            id,
            parent_id,
            name: name.to_string(),
            description: None,
            created_at: None,
            updated_at: None,
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn test_flatten_all_passes_flat_input_through() {
        let records = CategoryPayload::flatten_all(vec![
            payload(1, None, "Electronics"),
            payload(2, Some(1), "Phones"),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].parent_id, Some(1));
    }

    #[test]
    fn test_flatten_all_unnests_subcategories_preorder() {
        let mut root = payload(1, None, "Electronics");
        let mut phones = payload(2, Some(1), "Phones");
        phones.subcategories.push(payload(3, Some(2), "Smartphones"));
        root.subcategories.push(phones);

        let records = CategoryPayload::flatten_all(vec![root]);

        let ids: Vec<i64> = records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[2].parent_id, Some(2));
    }

    #[test]
    fn test_flatten_all_infers_missing_parent_from_enclosing_node() {
        let mut root = payload(1, None, "Electronics");
        // Some API responses omit parentId on nested entries
        root.subcategories.push(payload(2, None, "Phones"));

        let records = CategoryPayload::flatten_all(vec![root]);

        assert_eq!(records[1].parent_id, Some(1));
    }

    #[test]
    fn test_into_record_drops_nesting() {
        let mut root = payload(1, None, "Electronics");
        root.subcategories.push(payload(2, Some(1), "Phones"));

        let record = root.into_record();

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Electronics");
    }

    #[test]
    fn test_create_dto_rejects_empty_name() {
        let dto = CreateCategoryDto {
            name: String::new(),
            description: None,
            parent_id: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_payload_deserializes_camel_case_wire_names() {
        let json = r#"{"id": 7, "parentId": 3, "name": "Cables"}"#;

        let payload: CategoryPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.id, 7);
        assert_eq!(payload.parent_id, Some(3));
        assert!(payload.subcategories.is_empty());
    }
}
