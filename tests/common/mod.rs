#![allow(dead_code)]

use book_catalog::app::SeedReport;
use book_catalog::{seed_demo_catalog, CatalogService};

/// In-memory service holding the two demo categories and the four starter books.
pub async fn seeded_memory_catalog() -> (CatalogService, SeedReport) {
    let service = CatalogService::in_memory();
    let report = seed_demo_catalog(&service, false)
        .await
        .expect("seeding an empty in-memory store cannot fail");
    assert_eq!(report.books.len(), 4);
    (service, report)
}

pub fn titles<T, F>(items: &[T], title: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    items.iter().map(|i| title(i).to_string()).collect()
}

pub fn sorted_case_insensitive(mut titles: Vec<String>) -> Vec<String> {
    titles.sort_by_key(|t| t.to_lowercase());
    titles
}

pub const INJECTION: &str = "'; DROP TABLE Books;--";
