use crate::transport::http::handlers::{books, categories, health};
use crate::transport::http::types::{ApiResponse, BookDto, CategoryDto};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::create_book_handler,
        books::update_book_handler,
        books::delete_book_handler,
        categories::list_categories_handler,
        categories::get_category_handler,
        categories::create_category_handler,
        categories::update_category_handler,
        categories::delete_category_handler
    ),
    components(schemas(ApiResponse, BookDto, CategoryDto))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/books",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/api/books/:id",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .route(
            "/api/categories",
            get(categories::list_categories_handler).post(categories::create_category_handler),
        )
        .route(
            "/api/categories/:id",
            get(categories::get_category_handler)
                .put(categories::update_category_handler)
                .delete(categories::delete_category_handler),
        )
        .with_state(app_state)
}
