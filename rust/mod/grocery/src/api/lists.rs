use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use grocer_core::ServiceError;

use crate::api::{body, Failure, GroceryState};
use crate::model::SaveListRequest;
use crate::render;
use crate::views;

pub fn routes() -> Router<GroceryState> {
    Router::new()
        .route("/save_list", post(save_list))
        .route("/generate_pdf/{id}", get(generate_pdf))
        .route("/view_saved_lists", get(view_saved_lists))
        .route("/view_list/{id}", get(view_list))
}

async fn save_list(
    State(state): State<GroceryState>,
    payload: Result<Json<SaveListRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Failure> {
    let list = body(payload)?.validate()?;
    let list_id = state.lists.save_list(
        &list.created_date,
        list.delivery_address.as_deref(),
        &list.items,
        list.total_amount,
    )?;
    Ok(Json(serde_json::json!({"success": true, "list_id": list_id})))
}

async fn generate_pdf(
    State(state): State<GroceryState>,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    let list = state.lists.get_list(id)?;
    let bytes = render::render_pdf(&list)?;
    tracing::info!(id, bytes = bytes.len(), "pdf generated");

    let disposition = format!("attachment; filename={}", render::pdf_filename(id));
    Ok((
        [
            (header::CONTENT_TYPE, render::PDF_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

async fn view_saved_lists(
    State(state): State<GroceryState>,
) -> Result<Html<String>, ServiceError> {
    let lists = state.lists.list_summaries()?;
    Ok(Html(views::saved_lists_html(&lists)))
}

async fn view_list(State(state): State<GroceryState>, Path(id): Path<i64>) -> Response {
    match state.lists.get_list(id) {
        Ok(list) => Html(views::list_detail_html(&list)).into_response(),
        Err(ServiceError::NotFound(message)) => {
            (StatusCode::NOT_FOUND, Html(views::not_found_html(&message))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
