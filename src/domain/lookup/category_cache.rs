//! Per-request memo of category names.
//!
//! A [`CategoryLookup`] lives for one service call. Every distinct category
//! id costs at most one store round trip; ids with no matching category are
//! remembered as [`CachedCategory::Missing`] so they are not fetched again,
//! while still resolving to `None` for the caller.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::model::{Book, BookWithCategory};
use crate::storage::{CategoryStore, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedCategory {
    Found(String),
    Missing,
}

impl CachedCategory {
    pub fn name(&self) -> Option<&str> {
        match self {
            CachedCategory::Found(name) => Some(name),
            CachedCategory::Missing => None,
        }
    }
}

pub struct CategoryLookup<'a> {
    store: &'a dyn CategoryStore,
    entries: HashMap<i32, CachedCategory>,
    round_trips: usize,
}

impl<'a> CategoryLookup<'a> {
    pub fn new(store: &'a dyn CategoryStore) -> Self {
        Self {
            store,
            entries: HashMap::new(),
            round_trips: 0,
        }
    }

    /// Store errors are returned as-is and leave the id unresolved.
    pub async fn resolve(&mut self, category_id: i32) -> StoreResult<&CachedCategory> {
        if !self.entries.contains_key(&category_id) {
            self.round_trips += 1;
            let entry = match self.store.get_category_by_id(category_id).await? {
                Some(category) => CachedCategory::Found(category.name),
                None => {
                    debug!(target: "book_catalog::lookup", category_id, "dangling category reference");
                    CachedCategory::Missing
                }
            };
            self.entries.insert(category_id, entry);
        }
        Ok(&self.entries[&category_id])
    }

    pub async fn resolve_name(&mut self, category_id: i32) -> StoreResult<Option<String>> {
        Ok(self.resolve(category_id).await?.name().map(str::to_string))
    }

    /// Attaches a category name to each book, preserving order.
    pub async fn annotate(&mut self, books: Vec<Book>) -> StoreResult<Vec<BookWithCategory>> {
        let mut out = Vec::with_capacity(books.len());
        for book in books {
            let category_name = self.resolve_name(book.category_id).await?;
            out.push(BookWithCategory {
                book,
                category_name,
            });
        }
        Ok(out)
    }

    /// Number of store lookups issued so far.
    pub fn round_trips(&self) -> usize {
        self.round_trips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, NewCategory};
    use crate::storage::StoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCategories {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingCategories {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CategoryStore for CountingCategories {
        async fn get_all_categories(&self) -> StoreResult<Vec<Category>> {
            Ok(Vec::new())
        }

        async fn get_category_by_id(&self, id: i32) -> StoreResult<Option<Category>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Unavailable("down".to_string()));
            }
            Ok((id <= 2).then(|| Category {
                id,
                name: format!("category-{}", id),
                description: None,
            }))
        }

        async fn add_category(&self, category: NewCategory) -> StoreResult<Category> {
            Ok(category.with_id(0))
        }

        async fn update_category(&self, _category: &Category) -> StoreResult<bool> {
            Ok(false)
        }

        async fn delete_category(&self, _id: i32) -> StoreResult<bool> {
            Ok(false)
        }
    }

    fn book(id: i32, category_id: i32) -> Book {
        Book {
            id,
            title: format!("book-{}", id),
            author: "a".to_string(),
            isbn: None,
            publication_year: 2000,
            quantity: 1,
            category_id,
        }
    }

    #[tokio::test]
    async fn each_distinct_id_is_fetched_once() {
        let store = CountingCategories::new(false);
        let mut lookup = CategoryLookup::new(&store);
        let books = vec![book(1, 1), book(2, 2), book(3, 1), book(4, 2), book(5, 1)];

        let annotated = lookup.annotate(books).await.unwrap();

        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert_eq!(lookup.round_trips(), 2);
        let names: Vec<_> = annotated.iter().map(|b| b.category_name.as_deref()).collect();
        assert_eq!(
            names,
            vec![
                Some("category-1"),
                Some("category-2"),
                Some("category-1"),
                Some("category-2"),
                Some("category-1")
            ]
        );
    }

    #[tokio::test]
    async fn dangling_ids_are_remembered_as_missing() {
        let store = CountingCategories::new(false);
        let mut lookup = CategoryLookup::new(&store);

        assert_eq!(lookup.resolve(7).await.unwrap(), &CachedCategory::Missing);
        assert_eq!(lookup.resolve_name(7).await.unwrap(), None);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_propagate_and_are_not_cached() {
        let store = CountingCategories::new(true);
        let mut lookup = CategoryLookup::new(&store);

        assert!(lookup.resolve(1).await.is_err());
        assert!(lookup.resolve(1).await.is_err());
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn separate_lookups_do_not_share_entries() {
        let store = CountingCategories::new(false);
        CategoryLookup::new(&store).resolve(1).await.unwrap();
        CategoryLookup::new(&store).resolve(1).await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }
}
