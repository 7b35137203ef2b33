use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};

use grocer_core::ServiceError;

use crate::api::{body, Failure, GroceryState};
use crate::model::{AddItemRequest, CatalogItem, DeleteItemRequest, UpdateItemRequest};
use crate::views;

pub fn routes() -> Router<GroceryState> {
    Router::new()
        .route("/", get(index_page))
        .route("/get_common_items", get(list_items))
        .route("/add_common_item", post(add_item))
        .route("/update_common_item", post(update_item))
        .route("/delete_common_item", post(delete_item))
}

async fn index_page() -> impl IntoResponse {
    Html(views::index_html())
}

async fn list_items(
    State(state): State<GroceryState>,
) -> Result<Json<Vec<CatalogItem>>, ServiceError> {
    Ok(Json(state.catalog.list_items()?))
}

async fn add_item(
    State(state): State<GroceryState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Failure> {
    let (name, price) = body(payload)?.validate()?;
    let id = state.catalog.add_item(&name, price)?;
    Ok(Json(serde_json::json!({"success": true, "id": id})))
}

async fn update_item(
    State(state): State<GroceryState>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Failure> {
    let (id, name, price) = body(payload)?.validate()?;
    state.catalog.update_item(id, &name, price)?;
    tracing::info!(id, name = %name, price, "catalog item updated");
    Ok(Json(serde_json::json!({"success": true})))
}

async fn delete_item(
    State(state): State<GroceryState>,
    payload: Result<Json<DeleteItemRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Failure> {
    let id = body(payload)?.validate()?;
    state.catalog.delete_item(id)?;
    Ok(Json(serde_json::json!({"success": true})))
}
