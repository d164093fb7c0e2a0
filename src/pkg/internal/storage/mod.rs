use std::{fmt, path::Path, sync::Arc};

use axum::body::Bytes;
use rand::Rng;

use crate::{
    conf::Settings,
    prelude::{AppError, Result},
};

pub mod local;
pub mod managed;

pub use local::LocalDisk;
pub use managed::ManagedStore;

pub const PDF_MIME: &str = "application/pdf";
const MAX_BASE_LEN: usize = 120;

/// A resume as it arrived in the multipart body.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeUpload {
    /// Both the declared MIME type and the extension have to say PDF.
    pub fn ensure_pdf(&self) -> Result<()> {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        let is_pdf_mime = mime.eq_ignore_ascii_case(PDF_MIME);
        let is_pdf_ext = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf_mime || !is_pdf_ext {
            return Err(AppError::InvalidResume(
                "Resume must be a PDF file".to_string(),
            ));
        }
        Ok(())
    }

    pub fn base_name(&self) -> String {
        sanitize_base(&self.file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub key: String,
    /// Only set when the bytes landed on local disk.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    Inline,
    #[default]
    Attachment,
}

impl Disposition {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_ascii_lowercase()) {
            Some(p) if p == "inline" => Disposition::Inline,
            _ => Disposition::Attachment,
        }
    }

    pub fn header_value(&self, file_name: &str) -> String {
        format!("{}; filename=\"{}\"", self, file_name)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Inline => write!(f, "inline"),
            Disposition::Attachment => write!(f, "attachment"),
        }
    }
}

#[async_trait::async_trait]
pub trait ResumeStorage: Send + Sync {
    async fn store(&self, upload: &ResumeUpload) -> Result<StoredResume>;

    async fn retrieve(&self, key: &str, disposition: Disposition) -> Result<String>;

    fn describe(&self) -> &'static str;
}

/// Last path component with anything outside `[A-Za-z0-9_.-]` replaced.
pub fn sanitize_base(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_BASE_LEN)
        .collect()
}

pub fn storage_key(original_name: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let rand_bytes: [u8; 8] = rand::rng().random();
    let rand_hex: String = rand_bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}_{}_{}", timestamp, rand_hex, sanitize_base(original_name))
}

pub fn local_url(key: &str) -> String {
    format!("/uploads/{}", key)
}

/// Picks the backend once, at startup.
pub async fn select(settings: &Settings) -> Result<Arc<dyn ResumeStorage>> {
    let local = LocalDisk::new(&settings.uploads_dir).await?;
    let storage: Arc<dyn ResumeStorage> = match settings.s3() {
        Some(s3) => {
            tracing::info!(
                "S3 configured: true (bucket={}, region={})",
                &s3.bucket,
                &s3.region
            );
            Arc::new(ManagedStore::new(&s3, local))
        }
        None => {
            tracing::warn!("S3 not configured, uploads will be saved locally");
            Arc::new(local)
        }
    };
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: &str, content_type: &str) -> ResumeUpload {
        ResumeUpload {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[test]
    fn test_ensure_pdf() {
        assert!(upload("resume.pdf", "application/pdf").ensure_pdf().is_ok());
        assert!(upload("Resume.PDF", "Application/PDF").ensure_pdf().is_ok());
        assert!(upload("resume.pdf", "application/pdf; name=resume.pdf")
            .ensure_pdf()
            .is_ok());

        let wrong_mime = upload("resume.pdf", "text/plain").ensure_pdf().unwrap_err();
        assert!(wrong_mime.to_string().contains("PDF"));
        assert!(matches!(wrong_mime, AppError::InvalidResume(_)));

        assert!(upload("resume.txt", "application/pdf").ensure_pdf().is_err());
        assert!(upload("resume", "application/pdf").ensure_pdf().is_err());
        assert!(upload("resume.pdf.exe", "application/pdf").ensure_pdf().is_err());
    }

    #[test]
    fn test_sanitize_base() {
        assert_eq!(sanitize_base("Jane Doe (final).pdf"), "Jane_Doe__final_.pdf");
        assert_eq!(sanitize_base("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_base("C:\\Users\\jane\\cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_base("résumé.pdf"), "r_sum_.pdf");
        assert_eq!(sanitize_base(&"a".repeat(300)).len(), 120);
    }

    #[test]
    fn test_storage_key_shape() {
        let a = storage_key("my resume.pdf");
        let b = storage_key("my resume.pdf");
        assert_ne!(a, b);
        let parts: Vec<&str> = a.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<i64>().is_ok());
        assert_eq!(parts[1].len(), 16);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[2], "my_resume.pdf");
    }

    #[test]
    fn test_disposition() {
        assert_eq!(Disposition::from_param(None), Disposition::Attachment);
        assert_eq!(Disposition::from_param(Some("INLINE")), Disposition::Inline);
        assert_eq!(Disposition::from_param(Some("bogus")), Disposition::Attachment);
        assert_eq!(
            Disposition::Inline.header_value("k.pdf"),
            "inline; filename=\"k.pdf\""
        );
    }
}
