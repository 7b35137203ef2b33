mod catalog;
mod lists;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};

use grocer_core::ServiceError;

use crate::catalog::CatalogStore;
use crate::lists::ListStore;

/// Shared state of the grocery routes.
#[derive(Clone)]
pub struct GroceryState {
    pub catalog: Arc<CatalogStore>,
    pub lists: Arc<ListStore>,
}

/// Build the grocery router. Routes are mounted at the root.
pub fn build_router(state: GroceryState) -> Router {
    Router::new()
        .merge(catalog::routes())
        .merge(lists::routes())
        .with_state(state)
}

/// Error response of the mutating endpoints:
/// `{"success": false, "code": "...", "message": "..."}`.
#[derive(Debug)]
pub struct Failure(pub ServiceError);

impl From<ServiceError> for Failure {
    fn from(e: ServiceError) -> Self {
        Failure(e)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_client_error() {
            tracing::warn!(code = err.error_code(), "request rejected: {err}");
        } else {
            tracing::error!(code = err.error_code(), "request failed: {err}");
        }
        let body = serde_json::json!({
            "success": false,
            "code": err.error_code(),
            "message": err.to_string(),
        });
        (err.status_code(), Json(body)).into_response()
    }
}

/// Unwrap a JSON body, turning a malformed one into a validation error.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServiceError::Validation(rejection.body_text()))
}
