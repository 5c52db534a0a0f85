//! The Catalog Service.
//!
//! This module is the entry point collaborators (HTTP handlers, tools) call into.
//! It is responsible for:
//! 1.  Normalizing untrusted paging/search/sort input before it reaches a store.
//! 2.  Running every store call under a bounded time budget, so a stalled
//!     store surfaces as a transient error instead of hanging the caller.
//! 3.  Enriching query results with category names through a per-call
//!     `CategoryLookup`.
//! 4.  Mapping "no such row" outcomes to typed not-found errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::error::{CatalogError, CatalogResult};
use crate::domain::lookup::CategoryLookup;
use crate::domain::model::{Book, BookWithCategory, Category, NewBook, NewCategory};
use crate::domain::query::QuerySanitizer;
use crate::infra::config::{CatalogConfig, StoreBackend};
use crate::storage::{
    BookStore, CategoryStore, MemoryCatalogStore, PostgresCatalogStore, StoreError, StoreResult,
};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// The main service over the book and category stores.
#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
    categories: Arc<dyn CategoryStore>,
    sanitizer: QuerySanitizer,
    query_timeout: Duration,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            books,
            categories,
            sanitizer: QuerySanitizer::default(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// A service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryCatalogStore::new());
        Self::new(store.clone(), store)
    }

    /// Builds the store selected by `config` and wires the service around it.
    /// For Postgres this also connects the pool and ensures the schema exists.
    pub async fn from_config(config: &CatalogConfig) -> anyhow::Result<Self> {
        let service = match config.backend {
            StoreBackend::Memory => Self::in_memory(),
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
                let store = Arc::new(
                    PostgresCatalogStore::connect(
                        url,
                        config.max_connections,
                        config.query_timeout,
                    )
                    .await?,
                );
                store.ensure_schema().await?;
                Self::new(store.clone(), store)
            }
        };
        info!(
            target: "book_catalog::service",
            backend = ?config.backend,
            timeout_ms = config.query_timeout.as_millis() as u64,
            max_page_size = config.max_page_size,
            "catalog service ready"
        );
        Ok(service
            .with_query_timeout(config.query_timeout)
            .with_sanitizer(QuerySanitizer::new(config.max_page_size)))
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: QuerySanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Runs one store interaction under the configured budget.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> CatalogResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let result = match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(inner) => inner,
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        };
        result.map_err(|e| {
            if e.is_transient() {
                warn!(target: "book_catalog::service", op, error = %e, "transient store failure");
            }
            CatalogError::Store(e)
        })
    }

    // ---------------------------------------------------------------------
    // Paged query path
    // ---------------------------------------------------------------------

    /// Returns one page of books matching `search_term` in title or author,
    /// ordered by the whitelisted `sort_column`/`sort_direction`.
    ///
    /// Unknown columns fall back to `Title`, unknown directions to ascending,
    /// and non-positive paging values are clamped to 1. None of these are errors.
    pub async fn get_paged_books(
        &self,
        page_number: i64,
        page_size: i64,
        search_term: &str,
        sort_column: &str,
        sort_direction: &str,
    ) -> CatalogResult<Vec<BookWithCategory>> {
        let query = self.sanitizer.sanitize(
            page_number,
            page_size,
            search_term,
            sort_column,
            sort_direction,
        );
        debug!(
            target: "book_catalog::query",
            offset = query.offset,
            limit = query.limit,
            column = query.column.as_str(),
            direction = ?query.direction,
            has_search = query.has_search(),
            "running paged query"
        );

        let books = self.bounded("query_page", self.books.query_page(&query)).await?;

        let mut lookup = CategoryLookup::new(self.categories.as_ref());
        let annotated = self.bounded("annotate", lookup.annotate(books)).await?;
        debug!(
            target: "book_catalog::query",
            rows = annotated.len(),
            category_lookups = lookup.round_trips(),
            "paged query done"
        );
        Ok(annotated)
    }

    // ---------------------------------------------------------------------
    // Books
    // ---------------------------------------------------------------------

    pub async fn get_all_books(&self) -> CatalogResult<Vec<Book>> {
        self.bounded("get_all_books", self.books.get_all_books()).await
    }

    /// The book with its category name attached; `Ok(None)` when the id is unknown.
    pub async fn get_book_by_id(&self, id: i32) -> CatalogResult<Option<BookWithCategory>> {
        let book = match self.bounded("get_book", self.books.get_book_by_id(id)).await? {
            Some(book) => book,
            None => return Ok(None),
        };
        let mut lookup = CategoryLookup::new(self.categories.as_ref());
        let category_name = self
            .bounded("resolve_category", lookup.resolve_name(book.category_id))
            .await?;
        Ok(Some(BookWithCategory {
            book,
            category_name,
        }))
    }

    pub async fn add_book(&self, book: NewBook) -> CatalogResult<Book> {
        book.validate().map_err(CatalogError::Validation)?;
        let stored = self.bounded("add_book", self.books.add_book(book)).await?;
        info!(target: "book_catalog::service", book_id = stored.id, "book added");
        Ok(stored)
    }

    /// Overwrites every field of an existing book.
    pub async fn update_book(&self, book: &Book) -> CatalogResult<()> {
        book.validate().map_err(CatalogError::Validation)?;
        if !self.bounded("update_book", self.books.update_book(book)).await? {
            return Err(CatalogError::book_not_found(book.id));
        }
        info!(target: "book_catalog::service", book_id = book.id, "book updated");
        Ok(())
    }

    pub async fn delete_book(&self, id: i32) -> CatalogResult<()> {
        if !self.bounded("delete_book", self.books.delete_book(id)).await? {
            return Err(CatalogError::book_not_found(id));
        }
        info!(target: "book_catalog::service", book_id = id, "book deleted");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    /// `Ok(None)` when no category has this id.
    pub async fn resolve_category_name(&self, category_id: i32) -> CatalogResult<Option<String>> {
        let mut lookup = CategoryLookup::new(self.categories.as_ref());
        self.bounded("resolve_category", lookup.resolve_name(category_id))
            .await
    }

    pub async fn get_all_categories(&self) -> CatalogResult<Vec<Category>> {
        self.bounded("get_all_categories", self.categories.get_all_categories())
            .await
    }

    pub async fn get_category_by_id(&self, id: i32) -> CatalogResult<Option<Category>> {
        self.bounded("get_category", self.categories.get_category_by_id(id))
            .await
    }

    pub async fn add_category(&self, category: NewCategory) -> CatalogResult<Category> {
        category.validate().map_err(CatalogError::Validation)?;
        let stored = self
            .bounded("add_category", self.categories.add_category(category))
            .await?;
        info!(target: "book_catalog::service", category_id = stored.id, "category added");
        Ok(stored)
    }

    pub async fn update_category(&self, category: &Category) -> CatalogResult<()> {
        category.validate().map_err(CatalogError::Validation)?;
        if !self
            .bounded("update_category", self.categories.update_category(category))
            .await?
        {
            return Err(CatalogError::category_not_found(category.id));
        }
        Ok(())
    }

    /// Books referencing the category are not touched.
    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        if !self
            .bounded("delete_category", self.categories.delete_category(id))
            .await?
        {
            return Err(CatalogError::category_not_found(id));
        }
        info!(target: "book_catalog::service", category_id = id, "category deleted");
        Ok(())
    }

    /// One round trip to the book store, under the usual budget.
    pub async fn ping(&self) -> CatalogResult<()> {
        self.bounded("ping", self.books.ping()).await
    }
}
