use crate::transport::http::handlers::common::{
    catalog_error_response, fail_response, ok_response,
};
use crate::transport::http::types::{json_422, AppState, CategoryDto};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories (data is an array of CategoryDto)", body = ApiResponse),
        (status = 503, description = "Store unavailable or too slow; retry", body = ApiResponse)
    )
)]
pub async fn list_categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.get_all_categories().await {
        Ok(categories) => {
            let dtos: Vec<CategoryDto> = categories.into_iter().map(CategoryDto::from).collect();
            ok_response(StatusCode::OK, &dtos)
        }
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = ApiResponse),
        (status = 404, description = "No category with this id", body = ApiResponse)
    )
)]
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.catalog.get_category_by_id(id).await {
        Ok(Some(category)) => ok_response(StatusCode::OK, &CategoryDto::from(category)),
        Ok(None) => fail_response(StatusCode::NOT_FOUND, format!("category {} not found", id)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse),
        (status = 400, description = "Invalid field values", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_category_handler(
    State(state): State<AppState>,
    request: Result<Json<CategoryDto>, JsonRejection>,
) -> impl IntoResponse {
    let Json(dto) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "CategoryDto").into_response(),
    };
    match state.catalog.add_category(dto.into_new_category()).await {
        Ok(category) => ok_response(StatusCode::CREATED, &CategoryDto::from(category)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse),
        (status = 400, description = "Id mismatch or invalid field values", body = ApiResponse),
        (status = 404, description = "No category with this id", body = ApiResponse)
    )
)]
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<CategoryDto>, JsonRejection>,
) -> impl IntoResponse {
    let Json(dto) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "CategoryDto").into_response(),
    };
    if dto.id != id {
        return fail_response(StatusCode::BAD_REQUEST, "Category ID mismatch.");
    }
    let category = dto.into_category();
    match state.catalog.update_category(&category).await {
        Ok(()) => ok_response(StatusCode::OK, &CategoryDto::from(category)),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No category with this id", body = ApiResponse),
        (status = 409, description = "Books still reference this category", body = ApiResponse)
    )
)]
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.catalog.delete_category(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error_response(e),
    }
}
