use serde::{Deserialize, Serialize};

use super::{check_optional_len, check_required_text};

pub const TITLE_MAX_CHARS: usize = 255;
pub const AUTHOR_MAX_CHARS: usize = 255;
pub const ISBN_MAX_CHARS: usize = 13;

/// A persisted book. `id` is assigned by the store on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    /// Negative values denote BCE years.
    pub publication_year: i32,
    pub quantity: i32,
    pub category_id: i32,
}

/// A book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publication_year: i32,
    pub quantity: i32,
    pub category_id: i32,
}

impl NewBook {
    /// Validates field constraints before the record is handed to a store.
    /// Returns Ok(()) if valid, Err(String) with error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(
            &self.title,
            &self.author,
            self.isbn.as_deref(),
            self.quantity,
        )
    }

    pub fn with_id(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publication_year: self.publication_year,
            quantity: self.quantity,
            category_id: self.category_id,
        }
    }
}

impl Book {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(
            &self.title,
            &self.author,
            self.isbn.as_deref(),
            self.quantity,
        )
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    isbn: Option<&str>,
    quantity: i32,
) -> Result<(), String> {
    check_required_text("title", title, TITLE_MAX_CHARS)?;
    check_required_text("author", author, AUTHOR_MAX_CHARS)?;
    check_optional_len("isbn", isbn, ISBN_MAX_CHARS)?;
    if quantity < 0 {
        return Err(format!("quantity cannot be negative (got {})", quantity));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewBook {
        NewBook {
            title: "The Odyssey".to_string(),
            author: "Homer".to_string(),
            isbn: Some("9780143039952".to_string()),
            publication_year: -800,
            quantity: 9,
            category_id: 1,
        }
    }

    #[test]
    fn accepts_bce_publication_year() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn rejects_blank_title_and_author() {
        let mut b = draft();
        b.title = "   ".to_string();
        assert!(b.validate().unwrap_err().contains("title"));

        let mut b = draft();
        b.author = String::new();
        assert!(b.validate().unwrap_err().contains("author"));
    }

    #[test]
    fn length_limits_count_chars_not_bytes() {
        let mut b = draft();
        b.title = "é".repeat(TITLE_MAX_CHARS);
        assert!(b.validate().is_ok());
        b.title.push('é');
        assert!(b.validate().is_err());
    }

    #[test]
    fn isbn_is_optional_but_bounded() {
        let mut b = draft();
        b.isbn = None;
        assert!(b.validate().is_ok());
        b.isbn = Some("97801430399521".to_string());
        assert!(b.validate().unwrap_err().contains("isbn"));
    }

    #[test]
    fn rejects_negative_quantity() {
        let mut b = draft();
        b.quantity = -1;
        assert!(b.validate().is_err());
    }

    #[test]
    fn with_id_keeps_every_field() {
        let book = draft().with_id(42);
        assert_eq!(book.id, 42);
        assert_eq!(book.publication_year, -800);
        assert_eq!(book.isbn.as_deref(), Some("9780143039952"));
    }
}
