use crate::transport::http::handlers::common::{
    catalog_error_response, fail_response, ok_response,
};
use crate::transport::http::types::{json_422, AppState, BookDto, PagedBooksParams};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/books",
    params(PagedBooksParams),
    responses(
        (status = 200, description = "One page of books (data is an array of BookDto)", body = ApiResponse),
        (status = 400, description = "Malformed query string", body = ApiResponse),
        (status = 503, description = "Store unavailable or too slow; retry", body = ApiResponse)
    )
)]
pub async fn list_books_handler(
    State(state): State<AppState>,
    params: Result<Query<PagedBooksParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(v) => v,
        Err(e) => {
            return fail_response(StatusCode::BAD_REQUEST, format!("Invalid query string: {}", e))
        }
    };

    match state
        .catalog
        .get_paged_books(
            params.page_number,
            params.page_size,
            &params.search_term,
            &params.sort_column,
            &params.sort_direction,
        )
        .await
    {
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            ok_response(StatusCode::OK, &dtos)
        }
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book (data is a BookDto)", body = ApiResponse),
        (status = 404, description = "No book with this id", body = ApiResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.catalog.get_book_by_id(id).await {
        Ok(Some(book)) => ok_response(StatusCode::OK, &BookDto::from(book)),
        Ok(None) => fail_response(StatusCode::NOT_FOUND, format!("book {} not found", id)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created (data is the stored BookDto)", body = ApiResponse),
        (status = 400, description = "Invalid field values", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    request: Result<Json<BookDto>, JsonRejection>,
) -> impl IntoResponse {
    let Json(dto) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "BookDto").into_response(),
    };

    match state.catalog.add_book(dto.into_new_book()).await {
        Ok(book) => ok_response(StatusCode::CREATED, &BookDto::from(book)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse),
        (status = 400, description = "Id mismatch or invalid field values", body = ApiResponse),
        (status = 404, description = "No book with this id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<BookDto>, JsonRejection>,
) -> impl IntoResponse {
    let Json(dto) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "BookDto").into_response(),
    };
    if dto.id != id {
        return fail_response(StatusCode::BAD_REQUEST, "Book ID mismatch.");
    }

    let book = dto.into_book();
    match state.catalog.update_book(&book).await {
        Ok(()) => ok_response(StatusCode::OK, &BookDto::from(book)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "No book with this id", body = ApiResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.catalog.delete_book(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error_response(e),
    }
}
