//! The paged book query: sanitizing untrusted inputs and evaluating the result.

pub mod executor;
pub mod sanitizer;

pub use executor::execute_page;
pub use sanitizer::{escape_like, PageQuery, QuerySanitizer, SortColumn, SortDirection};
