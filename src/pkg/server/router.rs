use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::handlers::probes::{health, healthz};
use super::middlewares::authn;
use super::state::AppState;
use crate::conf::Settings;

/// Room for the text fields that travel alongside the resume.
const FORM_FIELDS_ALLOWANCE: usize = 64 * 1024;

/// Pages carry their own inline script and style. Uploaded resumes are
/// served from this origin too, so nothing may frame or sniff them.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline'; \
    style-src 'self' 'unsafe-inline'; \
    img-src 'self' data:; \
    base-uri 'self'; \
    form-action 'self'; \
    frame-ancestors 'none'";

pub fn build_routes(state: AppState, settings: &Settings) -> Router {
    let body_limit = state.max_upload_bytes + FORM_FIELDS_ALLOWANCE;
    let admin = Router::new()
        .route("/admin", get(handlers::ui::admin))
        .route("/api/admin/applications", get(handlers::admin::list))
        .route(
            "/api/admin/application/:id/resume",
            get(handlers::admin::resume_link),
        )
        .route_layer(from_fn_with_state(state.clone(), authn::authenticate));

    Router::new()
        .route("/", get(handlers::ui::rush))
        .route(
            "/api/applications",
            post(handlers::applications::create).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .merge(admin)
        .nest_service("/uploads", ServeDir::new(&settings.uploads_dir))
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .with_state(state)
}
