use crate::app::CatalogError;
use crate::storage::StoreError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

pub fn ok_response<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => fail_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode response: {}", e),
        ),
    }
}

pub fn fail_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

pub fn catalog_error_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
        CatalogError::Store(StoreError::Unavailable(_) | StoreError::Timeout(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        CatalogError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn catalog_error_response(err: CatalogError) -> Response {
    let status = catalog_error_status(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(target: "book_catalog::http", error = %err, "request failed");
    }
    fail_response(status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_kinds_map_to_distinct_statuses() {
        assert_eq!(
            catalog_error_status(&CatalogError::book_not_found(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            catalog_error_status(&CatalogError::Validation("title is required".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            catalog_error_status(&CatalogError::Store(StoreError::Timeout(Duration::from_secs(1)))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            catalog_error_status(&CatalogError::Store(StoreError::Conflict("fk".into()))),
            StatusCode::CONFLICT
        );
    }
}
