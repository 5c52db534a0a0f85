pub mod catalog_service;
pub mod error;
pub mod seed;

pub use catalog_service::CatalogService;
pub use error::{CatalogError, CatalogResult};
pub use seed::{seed_demo_catalog, SeedReport};
