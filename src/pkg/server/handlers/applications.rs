use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    pkg::{
        internal::{
            adaptors::applications::spec::Application,
            intake::ApplicationForm,
            storage::ResumeUpload,
        },
        server::state::AppState,
    },
    prelude::{AppError, Result},
};

#[derive(Serialize)]
pub struct Created {
    pub ok: bool,
    pub application: Application,
}

pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Created>)> {
    let mut form = ApplicationForm::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                if bytes.len() > state.max_upload_bytes {
                    return Err(AppError::PayloadTooLarge(state.max_upload_bytes));
                }
                form.attach_resume(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {
                let value = field.text().await?;
                if !form.set_text(&field_name, value) {
                    tracing::debug!("ignoring unknown field {}", &field_name);
                }
            }
        }
    }
    let (submission, resume) = form.validate()?;

    let stored = match resume {
        Some(upload) => Some(state.resumes.store(&upload).await?),
        None => None,
    };
    let orphan = stored.as_ref().map(|s| s.key.clone());
    // no compensating delete: a failed insert leaves the blob behind
    let application = match state
        .applications
        .insert(submission.into_new_application(stored))
        .await
    {
        Ok(application) => application,
        Err(err) => {
            if let Some(key) = orphan {
                tracing::warn!("resume {} stored without an application row", key);
            }
            return Err(err);
        }
    };
    tracing::info!("application {} received", application.id);
    Ok((
        StatusCode::CREATED,
        Json(Created {
            ok: true,
            application,
        }),
    ))
}
