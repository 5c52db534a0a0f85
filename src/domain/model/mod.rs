//! Catalog records: books and the categories they belong to.

pub mod book;
pub mod category;
pub mod seed;

pub use book::{Book, NewBook};
pub use category::{Category, NewCategory};

/// A book together with the name of its category, as returned to callers.
///
/// `category_name` is `None` when the book's category reference is dangling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithCategory {
    pub book: Book,
    pub category_name: Option<String>,
}

pub(crate) fn check_required_text(field: &str, value: &str, max_chars: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    check_len(field, value, max_chars)
}

pub(crate) fn check_optional_len(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), String> {
    match value {
        Some(v) => check_len(field, v, max_chars),
        None => Ok(()),
    }
}

fn check_len(field: &str, value: &str, max_chars: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max_chars {
        return Err(format!(
            "{} exceeds {} characters (got {})",
            field, max_chars, len
        ));
    }
    Ok(())
}
