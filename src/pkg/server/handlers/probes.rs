use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{pkg::server::state::AppState, prelude::Result};

pub async fn health() -> Json<Value> {
    tracing::debug!("service is live");
    Json(json!({ "ok": true }))
}

pub async fn healthz(State(state): State<AppState>) -> Result<Json<Value>> {
    state.applications.ping().await?;
    tracing::debug!("service is healthy");
    Ok(Json(json!({ "ok": true })))
}
