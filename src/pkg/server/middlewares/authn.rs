use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::{internal::admin::BasicCredentials, server::state::AppState},
    prelude::{AppError, Result},
};

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response> {
    let Some(admin) = state.admin.as_deref() else {
        tracing::warn!("admin route requested but admin credentials are not configured");
        return Err(AppError::AdminNotConfigured);
    };
    let supplied = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BasicCredentials::parse);
    if supplied.is_none() {
        tracing::debug!("credentials missing, authentication required");
    }
    admin.check(supplied.as_ref())?;
    Ok(next.run(request).await)
}
