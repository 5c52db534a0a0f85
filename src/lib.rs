pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{seed_demo_catalog, CatalogError, CatalogResult, CatalogService};
pub use domain::model::{Book, BookWithCategory, Category, NewBook, NewCategory};
pub use domain::query::{PageQuery, QuerySanitizer, SortColumn, SortDirection};
pub use infra::config::CatalogConfig;
pub use storage::{BookStore, CategoryStore, MemoryCatalogStore, PostgresCatalogStore, StoreError};
