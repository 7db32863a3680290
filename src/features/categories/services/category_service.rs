use std::sync::{Arc, Mutex, MutexGuard};

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::clients::CatalogApi;
use crate::features::categories::dtos::{
    CategoryOptionDto, CategoryPayload, CategoryRowDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::flatten::{flatten_for_display, flatten_for_selection};
use crate::features::categories::guards::{self, DeletionPlan};
use crate::features::categories::store::CategoryStore;
use crate::features::categories::tree::build_forest;

/// Service for admin category management.
///
/// Owns the category store and coordinates it with the remote catalog API.
/// Reads flow fetch → whole-list swap → tree → projection; writes flow
/// guard → remote call → per-node store patch. The store lock is never held
/// across an await.
pub struct CategoryService {
    client: Arc<dyn CatalogApi>,
    store: Mutex<CategoryStore>,
}

impl CategoryService {
    pub fn new(client: Arc<dyn CatalogApi>) -> Self {
        Self {
            client,
            store: Mutex::new(CategoryStore::new()),
        }
    }

    /// Refresh the store from the remote listing and return display rows.
    /// A listing superseded by a newer refresh is discarded, so rapid
    /// navigation cannot land stale data on top of fresh data.
    pub async fn refresh(&self) -> Result<Vec<CategoryRowDto>> {
        let ticket = self.lock_store().begin_fetch();

        let payloads = self.client.list_categories().await?;
        let flat = CategoryPayload::flatten_all(payloads);

        let mut store = self.lock_store();
        if !store.complete_fetch(ticket, flat) {
            tracing::debug!("Discarding superseded category listing (ticket {})", ticket);
        }
        let snapshot = store.snapshot();
        drop(store);

        Ok(flatten_for_display(&build_forest(&snapshot)))
    }

    /// Current display rows without touching the network.
    pub fn list_rows(&self) -> Vec<CategoryRowDto> {
        let snapshot = self.lock_store().snapshot();
        flatten_for_display(&build_forest(&snapshot))
    }

    /// Dropdown options for choosing a parent. Pass the id being edited so
    /// the node and its whole subtree stay out of its own parent choices.
    pub fn parent_options(&self, editing_id: Option<i64>) -> Vec<CategoryOptionDto> {
        let snapshot = self.lock_store().snapshot();
        flatten_for_selection(&build_forest(&snapshot), editing_id)
    }

    /// Create a category. The intent is validated and guarded locally
    /// before anything is sent; the store is patched with the single node
    /// the remote confirms.
    pub async fn create(&self, request: CreateCategoryDto) -> Result<CategoryRowDto> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let snapshot = self.lock_store().snapshot();
        guards::validate_parent_assignment(None, request.parent_id, &snapshot)?;

        let created = self.client.create_category(&request).await?;
        tracing::info!("Created category {} ('{}')", created.id, created.name);

        let id = created.id;
        self.lock_store().upsert(created.into_record());
        self.row_for(id)
    }

    /// Update a category. Rejected before the remote call when the new
    /// parent is the node itself or any of its descendants.
    pub async fn update(&self, id: i64, request: UpdateCategoryDto) -> Result<CategoryRowDto> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let snapshot = self.lock_store().snapshot();
        guards::validate_parent_assignment(Some(id), request.parent_id, &snapshot)?;

        let updated = self.client.update_category(id, &request).await?;
        tracing::info!("Updated category {}", id);

        self.lock_store().upsert(updated.into_record());
        self.row_for(id)
    }

    /// Delete a category. Its direct children are re-parented onto the
    /// deleted node's own parent through the remote update operation first,
    /// so the remote data never holds a dangling parent reference. Returns
    /// the plan that was carried out.
    pub async fn delete(&self, id: i64) -> Result<DeletionPlan> {
        let snapshot = self.lock_store().snapshot();
        let plan = guards::plan_deletion(id, &snapshot)?;

        for child_id in &plan.orphaned_child_ids {
            let child = snapshot
                .iter()
                .find(|c| c.id == *child_id)
                .ok_or_else(|| AppError::Internal(format!("Category {} not in store", child_id)))?;

            let reassign = UpdateCategoryDto {
                name: child.name.clone(),
                description: child.description.clone(),
                parent_id: plan.reassign_to,
            };
            let updated = self.client.update_category(*child_id, &reassign).await?;
            self.lock_store().upsert(updated.into_record());
        }

        self.client.delete_category(id).await?;
        tracing::info!("Deleted category {}", id);

        self.lock_store().remove(id);
        Ok(plan)
    }

    fn row_for(&self, id: i64) -> Result<CategoryRowDto> {
        self.list_rows()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::Internal(format!("Category {} missing from rebuilt tree", id)))
    }

    fn lock_store(&self) -> MutexGuard<'_, CategoryStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// In-memory stand-in for the remote catalog API
    struct FakeCatalogApi {
        categories: Mutex<Vec<CategoryPayload>>,
        next_id: AtomicI64,
    }

    impl FakeCatalogApi {
        fn seeded(categories: Vec<CategoryPayload>) -> Arc<Self> {
            let next_id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            Arc::new(Self {
                categories: Mutex::new(categories),
                next_id: AtomicI64::new(next_id),
            })
        }

        fn remote_parent_of(&self, id: i64) -> Option<i64> {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.parent_id)
        }

        fn remote_len(&self) -> usize {
            self.categories.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CatalogApi for FakeCatalogApi {
        async fn list_categories(&self) -> Result<Vec<CategoryPayload>> {
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn create_category(&self, request: &CreateCategoryDto) -> Result<CategoryPayload> {
            let created = payload(
                self.next_id.fetch_add(1, Ordering::SeqCst),
                request.parent_id,
                &request.name,
            );
            self.categories.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_category(
            &self,
            id: i64,
            request: &UpdateCategoryDto,
        ) -> Result<CategoryPayload> {
            let mut categories = self.categories.lock().unwrap();
            let entry = categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
            entry.name = request.name.clone();
            entry.description = request.description.clone();
            entry.parent_id = request.parent_id;
            Ok(entry.clone())
        }

        async fn delete_category(&self, id: i64) -> Result<()> {
            self.categories.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

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

    fn electronics_chain() -> Vec<CategoryPayload> {
        vec![
            payload(1, None, "Electronics"),
            payload(2, Some(1), "Phones"),
            payload(3, Some(2), "Smartphones"),
        ]
    }

    fn create_dto(name: &str, parent_id: Option<i64>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: None,
            parent_id,
        }
    }

    fn update_dto(name: &str, parent_id: Option<i64>) -> UpdateCategoryDto {
        UpdateCategoryDto {
            name: name.to_string(),
            description: None,
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_refresh_projects_display_rows() {
        let service = CategoryService::new(FakeCatalogApi::seeded(electronics_chain()));

        let rows = service.refresh().await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].display_name, "  └ Phones");
        assert_eq!(rows[2].level, 2);
    }

    #[tokio::test]
    async fn test_refresh_accepts_pre_nested_listing() {
        let mut root = payload(1, None, "Electronics");
        root.subcategories.push(payload(2, Some(1), "Phones"));
        let service = CategoryService::new(FakeCatalogApi::seeded(vec![root]));

        let rows = service.refresh().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].level, 1);
    }

    #[tokio::test]
    async fn test_create_patches_store_with_confirmed_node() {
        let service = CategoryService::new(FakeCatalogApi::seeded(electronics_chain()));
        service.refresh().await.unwrap();

        let row = service.create(create_dto("Tablets", Some(1))).await.unwrap();

        assert_eq!(row.parent_id, Some(1));
        assert_eq!(row.level, 1);
        assert_eq!(service.list_rows().len(), 4);
    }

    #[tokio::test]
    async fn test_create_with_unknown_parent_never_reaches_remote() {
        let fake = FakeCatalogApi::seeded(electronics_chain());
        let service = CategoryService::new(fake.clone());
        service.refresh().await.unwrap();

        let err = service.create(create_dto("Stray", Some(99))).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(fake.remote_len(), 3);
    }

    #[tokio::test]
    async fn test_create_with_blank_name_is_rejected() {
        let service = CategoryService::new(FakeCatalogApi::seeded(electronics_chain()));
        service.refresh().await.unwrap();

        let err = service.create(create_dto("", None)).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_descendant_as_new_parent() {
        let fake = FakeCatalogApi::seeded(electronics_chain());
        let service = CategoryService::new(fake.clone());
        service.refresh().await.unwrap();

        // Re-parenting "Electronics" under "Smartphones" would loop the tree
        let err = service
            .update(1, update_dto("Electronics", Some(3)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(fake.remote_parent_of(1), None);
    }

    #[tokio::test]
    async fn test_update_moves_node_to_new_parent() {
        let service = CategoryService::new(FakeCatalogApi::seeded(electronics_chain()));
        service.refresh().await.unwrap();

        let row = service
            .update(3, update_dto("Smartphones", Some(1)))
            .await
            .unwrap();

        assert_eq!(row.level, 1);
        assert_eq!(row.display_name, "  └ Smartphones");
    }

    #[tokio::test]
    async fn test_delete_reparents_children_onto_grandparent() {
        let fake = FakeCatalogApi::seeded(electronics_chain());
        let service = CategoryService::new(fake.clone());
        service.refresh().await.unwrap();

        let plan = service.delete(2).await.unwrap();

        assert_eq!(plan.orphaned_child_ids, vec![3]);
        assert_eq!(plan.reassign_to, Some(1));
        // Remote and local state agree: 3 now hangs off 1
        assert_eq!(fake.remote_parent_of(3), Some(1));
        let rows = service.list_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, 3);
        assert_eq!(rows[1].level, 1);
    }

    #[tokio::test]
    async fn test_delete_of_leaf_touches_nothing_else() {
        let fake = FakeCatalogApi::seeded(electronics_chain());
        let service = CategoryService::new(fake.clone());
        service.refresh().await.unwrap();

        let plan = service.delete(3).await.unwrap();

        assert!(plan.orphaned_child_ids.is_empty());
        assert_eq!(fake.remote_len(), 2);
        assert_eq!(service.list_rows().len(), 2);
    }

    #[tokio::test]
    async fn test_parent_options_exclude_edited_subtree() {
        let service = CategoryService::new(FakeCatalogApi::seeded(electronics_chain()));
        service.refresh().await.unwrap();

        let options = service.parent_options(Some(2));

        let ids: Vec<i64> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
