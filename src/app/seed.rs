//! Loads the demo catalog into an empty store.

use tracing::info;

use crate::app::catalog_service::CatalogService;
use crate::app::error::CatalogResult;
use crate::domain::model::seed::{demo_books, demo_categories, extended_books};
use crate::domain::model::{Book, Category};

#[derive(Debug, Default)]
pub struct SeedReport {
    pub categories: Vec<Category>,
    pub books: Vec<Book>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.books.is_empty()
    }
}

/// Seeds "Fiction"/"Non-Fiction" and the four starter books, plus the extended
/// set when `extended` is true. Does nothing if the store already holds any
/// category or book.
pub async fn seed_demo_catalog(service: &CatalogService, extended: bool) -> CatalogResult<SeedReport> {
    if !service.get_all_categories().await?.is_empty() || !service.get_all_books().await?.is_empty() {
        info!(target: "book_catalog::seed", "store not empty, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    for category in demo_categories() {
        report.categories.push(service.add_category(category).await?);
    }
    let (fiction, non_fiction) = (report.categories[0].id, report.categories[1].id);

    let mut books = demo_books(fiction, non_fiction);
    if extended {
        books.extend(extended_books(fiction, non_fiction));
    }
    for book in books {
        report.books.push(service.add_book(book).await?);
    }

    info!(
        target: "book_catalog::seed",
        categories = report.categories.len(),
        books = report.books.len(),
        "demo catalog seeded"
    );
    Ok(report)
}
