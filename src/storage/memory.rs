//! In-process catalog store.
//!
//! Identity order is id order (ids are handed out monotonically and records
//! live in `BTreeMap`s). Category references are not enforced, so a deleted
//! category can leave books pointing at nothing.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, CategoryStore, StoreResult};
use crate::domain::model::{Book, Category, NewBook, NewCategory};
use crate::domain::query::{execute_page, PageQuery};

#[derive(Default)]
struct MemoryState {
    books: BTreeMap<i32, Book>,
    categories: BTreeMap<i32, Category>,
    last_book_id: i32,
    last_category_id: i32,
}

/// Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryCatalogStore {
    async fn get_all_books(&self) -> StoreResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn get_book_by_id(&self, id: i32) -> StoreResult<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn query_page(&self, query: &PageQuery) -> StoreResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(execute_page(state.books.values(), query))
    }

    async fn add_book(&self, book: NewBook) -> StoreResult<Book> {
        let mut state = self.state.write().await;
        state.last_book_id += 1;
        let stored = book.with_id(state.last_book_id);
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_book(&self, book: &Book) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_book(&self, id: i32) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.books.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalogStore {
    async fn get_all_categories(&self) -> StoreResult<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn get_category_by_id(&self, id: i32) -> StoreResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn add_category(&self, category: NewCategory) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        state.last_category_id += 1;
        let stored = category.with_id(state.last_category_id);
        state.categories.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_category(&self, category: &Category) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.categories.remove(&id).is_some())
    }
}
