use crate::models::NewsItem;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

pub async fn list_news(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

pub async fn add_news_item(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let item = NewsItem::from_json(&body)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid required parameters: {}", e)))?;

    tracing::info!(title = %item.title, "Inserting news item");
    state.store.insert(item).await?;

    // The generated document id is deliberately not returned.
    Ok(Json(json!({ "status": "success" })))
}
