//! Persistent catalog store implementation using PostgreSQL.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::info;

use super::{BookStore, CategoryStore, StoreResult};
use crate::domain::model::{Book, Category, NewBook, NewCategory};
use crate::domain::query::PageQuery;

pub mod query;

use query::{build_page_query, BOOK_COLUMNS};

const CREATE_CATEGORIES_SQL: &str = "CREATE TABLE IF NOT EXISTS categories (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description VARCHAR(500)
)";

// No ON DELETE action: removing a category that still has books is refused.
const CREATE_BOOKS_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    author VARCHAR(255) NOT NULL,
    isbn VARCHAR(13),
    publication_year INTEGER NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    category_id INTEGER NOT NULL REFERENCES categories (id)
)";

const CREATE_BOOKS_CATEGORY_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS books_category_id_idx ON books (category_id)";

/// A catalog store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool; `acquire_timeout` bounds how long a call waits for a connection.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the catalog tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for sql in [
            CREATE_CATEGORIES_SQL,
            CREATE_BOOKS_SQL,
            CREATE_BOOKS_CATEGORY_INDEX_SQL,
        ] {
            sqlx::query(sql).execute(&self.pool).await?;
        }
        info!(target: "book_catalog::store", "catalog schema ready");
        Ok(())
    }

    /// Removes every book and category and restarts id sequences.
    pub async fn clear(&self) -> StoreResult<()> {
        sqlx::query("TRUNCATE TABLE books, categories RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn book_from_row(row: &PgRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        isbn: row.try_get("isbn")?,
        publication_year: row.try_get("publication_year")?,
        quantity: row.try_get("quantity")?,
        category_id: row.try_get("category_id")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
    })
}

fn books_from_rows(rows: &[PgRow]) -> StoreResult<Vec<Book>> {
    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        books.push(book_from_row(row)?);
    }
    Ok(books)
}

#[async_trait]
impl BookStore for PostgresCatalogStore {
    async fn get_all_books(&self) -> StoreResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        books_from_rows(&rows)
    }

    async fn get_book_by_id(&self, id: i32) -> StoreResult<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => Ok(Some(book_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn query_page(&self, query: &PageQuery) -> StoreResult<Vec<Book>> {
        let mut qb = build_page_query(query);
        let rows = qb.build().fetch_all(&self.pool).await?;
        books_from_rows(&rows)
    }

    async fn add_book(&self, book: NewBook) -> StoreResult<Book> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO books (title, author, isbn, publication_year, quantity, category_id)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.publication_year)
        .bind(book.quantity)
        .bind(book.category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(book.with_id(id))
    }

    async fn update_book(&self, book: &Book) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, author = $2, isbn = $3, publication_year = $4,
             quantity = $5, category_id = $6 WHERE id = $7",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.publication_year)
        .bind(book.quantity)
        .bind(book.category_id)
        .bind(book.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_book(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for PostgresCatalogStore {
    async fn get_all_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, description FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut categories = Vec::with_capacity(rows.len());
        for row in &rows {
            categories.push(category_from_row(row)?);
        }
        Ok(categories)
    }

    async fn get_category_by_id(&self, id: i32) -> StoreResult<Option<Category>> {
        let row = sqlx::query("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => Ok(Some(category_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn add_category(&self, category: NewCategory) -> StoreResult<Category> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(category.with_id(id))
    }

    async fn update_category(&self, category: &Category) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $1, description = $2 WHERE id = $3")
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
