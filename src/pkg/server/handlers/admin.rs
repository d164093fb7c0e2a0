use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::{
        internal::{adaptors::applications::spec::Application, storage::Disposition},
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

#[derive(Deserialize)]
pub struct ResumeQuery {
    pub disposition: Option<String>,
}

#[derive(Serialize)]
pub struct ResumeLink {
    pub url: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Application>>> {
    let applications = state.applications.list_all().await?;
    tracing::debug!("listing {} applications", applications.len());
    Ok(Json(applications))
}

pub async fn resume_link(
    State(state): State<AppState>,
    Path(application_id): Path<i32>,
    Query(query): Query<ResumeQuery>,
) -> Result<Json<ResumeLink>> {
    let not_found = || AppError::NotFound("Resume not found".to_string());
    let application = state
        .applications
        .get(application_id)
        .await?
        .ok_or_else(not_found)?;
    let key = application.resume_path.ok_or_else(not_found)?;

    // bytes that fell back to local disk are only reachable there
    let url = match application.resume_url {
        Some(url) => url,
        None => {
            let disposition = Disposition::from_param(query.disposition.as_deref());
            state.resumes.retrieve(&key, disposition).await?
        }
    };
    Ok(Json(ResumeLink { url }))
}
