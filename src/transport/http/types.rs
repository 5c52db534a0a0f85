use crate::app::CatalogService;
use crate::domain::model::{Book, BookWithCategory, Category, NewBook, NewCategory};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query string of `GET /api/books`. Missing parameters take the defaults below;
/// invalid sort values are corrected by the catalog, not rejected here.
#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PagedBooksParams {
    /// 1-based page number (default 1).
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    /// Rows per page (default 100).
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Case-insensitive substring matched against title and author.
    #[serde(default)]
    pub search_term: String,
    /// One of Title, Author, ISBN, PublicationYear (default Title).
    #[serde(default = "default_sort_column")]
    pub sort_column: String,
    /// asc or desc (default asc).
    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    100
}

fn default_sort_column() -> String {
    "Title".to_string()
}

fn default_sort_direction() -> String {
    "asc".to_string()
}

impl Default for PagedBooksParams {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            search_term: String::new(),
            sort_column: default_sort_column(),
            sort_direction: default_sort_direction(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    /// Ignored on create; must match the path id on update.
    #[serde(default)]
    pub id: i32,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub publication_year: i32,
    pub quantity: i32,
    pub category_id: i32,
    /// Output only. Absent when the book's category no longer exists.
    #[serde(default, skip_deserializing)]
    pub category_name: Option<String>,
}

impl BookDto {
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publication_year: self.publication_year,
            quantity: self.quantity,
            category_id: self.category_id,
        }
    }

    pub fn into_book(self) -> Book {
        let id = self.id;
        self.into_new_book().with_id(id)
    }
}

impl From<BookWithCategory> for BookDto {
    fn from(value: BookWithCategory) -> Self {
        let BookWithCategory {
            book,
            category_name,
        } = value;
        Self {
            category_name,
            ..BookDto::from(book)
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            publication_year: book.publication_year,
            quantity: book.quantity,
            category_id: book.category_id,
            category_name: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryDto {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            description: self.description,
        }
    }

    pub fn into_category(self) -> Category {
        let id = self.id;
        self.into_new_category().with_id(id)
    }
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
