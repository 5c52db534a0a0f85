use serde::{Deserialize, Serialize};

use super::{check_optional_len, check_required_text};

pub const NAME_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A grouping label for books. Books point at categories through
/// `Book::category_id`; the category itself holds no book list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.name, self.description.as_deref())
    }

    pub fn with_id(self, id: i32) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

impl Category {
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.name, self.description.as_deref())
    }
}

fn validate_fields(name: &str, description: Option<&str>) -> Result<(), String> {
    check_required_text("name", name, NAME_MAX_CHARS)?;
    check_optional_len("description", description, DESCRIPTION_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_limit() {
        let mut c = NewCategory {
            name: "Fiction".to_string(),
            description: Some("x".repeat(DESCRIPTION_MAX_CHARS)),
        };
        assert!(c.validate().is_ok());
        c.description = Some("x".repeat(DESCRIPTION_MAX_CHARS + 1));
        assert!(c.validate().unwrap_err().contains("description"));
    }

    #[test]
    fn name_required() {
        let c = Category {
            id: 1,
            name: " ".to_string(),
            description: None,
        };
        assert!(c.validate().is_err());
    }
}
