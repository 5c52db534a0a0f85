//! Catalog persistence.
//!
//! `BookStore` and `CategoryStore` are the capability seams the service is
//! written against. Two variants implement both: [`MemoryCatalogStore`] and
//! [`PostgresCatalogStore`]. The composition root picks one and hands it to
//! the service as trait objects.

use async_trait::async_trait;

use crate::domain::model::{Book, Category, NewBook, NewCategory};
use crate::domain::query::PageQuery;

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in identity order.
    async fn get_all_books(&self) -> StoreResult<Vec<Book>>;

    async fn get_book_by_id(&self, id: i32) -> StoreResult<Option<Book>>;

    /// Runs a sanitized paged query. Implementations must filter, order and
    /// page exactly as `domain::query::execute_page` does.
    async fn query_page(&self, query: &PageQuery) -> StoreResult<Vec<Book>>;

    /// Inserts the book and returns it with its store-assigned id.
    async fn add_book(&self, book: NewBook) -> StoreResult<Book>;

    /// Overwrites every field of the book with `book.id`. Returns `false` if
    /// no such book exists.
    async fn update_book(&self, book: &Book) -> StoreResult<bool>;

    /// Returns `false` if no such book exists.
    async fn delete_book(&self, id: i32) -> StoreResult<bool>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_all_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category_by_id(&self, id: i32) -> StoreResult<Option<Category>>;

    async fn add_category(&self, category: NewCategory) -> StoreResult<Category>;

    async fn update_category(&self, category: &Category) -> StoreResult<bool>;

    /// Books still pointing at the category are left alone; whether that is
    /// allowed is up to the store's integrity rules.
    async fn delete_category(&self, id: i32) -> StoreResult<bool>;
}
