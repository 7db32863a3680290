use crate::features::categories::models::Category;

/// In-memory container for the authoritative flat category list.
///
/// Contents are replaced wholesale from a listing fetch and patched per
/// node from create/update/delete confirmations, never field-by-field from
/// a partial response. Fetch tickets keep a superseded listing from
/// clobbering a newer one: only the most recently issued ticket may commit.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
    last_ticket: u64,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current flat list, in stored order.
    pub fn snapshot(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Issue a ticket for a listing fetch that is about to start.
    pub fn begin_fetch(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Swap in a fetched list. Returns false, changing nothing, when a
    /// newer fetch was started after this ticket was issued.
    pub fn complete_fetch(&mut self, ticket: u64, categories: Vec<Category>) -> bool {
        if ticket != self.last_ticket {
            return false;
        }
        self.categories = categories;
        true
    }

    /// Insert or replace the single node confirmed by a create or update.
    pub fn upsert(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Drop the node confirmed deleted. Returns whether it was present.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        self.categories.len() != before
    }
}
