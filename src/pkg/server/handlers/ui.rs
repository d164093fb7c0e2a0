use askama::Template;
use axum::{extract::State, response::Html};

use crate::{
    pkg::{
        internal::intake::Year,
        server::{
            state::AppState,
            uispec::{Admin, Rush},
        },
    },
    prelude::Result,
};

pub async fn rush(State(state): State<AppState>) -> Result<Html<String>> {
    let template = Rush {
        years: Year::ALL.iter().map(Year::as_str).collect(),
        max_upload_mb: state.max_upload_bytes / (1024 * 1024),
    };
    Ok(Html(template.render()?))
}

pub async fn admin() -> Result<Html<String>> {
    Ok(Html(Admin {}.render()?))
}
