use std::time::Duration;

use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
    types::{ObjectCannedAcl, ServerSideEncryption},
    Client,
};

use super::{storage_key, Disposition, LocalDisk, ResumeStorage, ResumeUpload, StoredResume};
use crate::{
    conf::S3Settings,
    prelude::{AppError, Result},
};

pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Private S3 bucket with a local disk to fall back on when a put fails.
#[derive(Debug, Clone)]
pub struct ManagedStore {
    client: Client,
    bucket: String,
    fallback: LocalDisk,
}

impl ManagedStore {
    pub fn new(s3: &S3Settings, fallback: LocalDisk) -> Self {
        let credentials = Credentials::new(
            &s3.access_key_id,
            &s3.secret_access_key,
            None,
            None,
            "rushd-env",
        );
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(s3.region.clone()))
            .credentials_provider(credentials)
            .build();
        ManagedStore::from_conf(conf, &s3.bucket, fallback)
    }

    pub fn from_conf(conf: aws_sdk_s3::Config, bucket: &str, fallback: LocalDisk) -> Self {
        ManagedStore {
            client: Client::from_conf(conf),
            bucket: bucket.to_string(),
            fallback,
        }
    }

    async fn put(&self, key: &str, upload: &ResumeUpload) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(upload.bytes.clone()))
            .content_type(&upload.content_type)
            .content_disposition(Disposition::Attachment.header_value(&upload.base_name()))
            .server_side_encryption(ServerSideEncryption::Aes256)
            .acl(ObjectCannedAcl::Private)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResumeStorage for ManagedStore {
    async fn store(&self, upload: &ResumeUpload) -> Result<StoredResume> {
        upload.ensure_pdf()?;
        let key = storage_key(&upload.file_name);
        match self.put(&key, upload).await {
            Ok(()) => {
                tracing::info!("uploaded resume to S3 bucket={} key={}", &self.bucket, &key);
                Ok(StoredResume { key, url: None })
            }
            Err(err) => {
                tracing::warn!("S3 upload failed, falling back to local save: {}", err);
                self.fallback.write(&key, upload).await
            }
        }
    }

    async fn retrieve(&self, key: &str, disposition: Disposition) -> Result<String> {
        let presigning = PresigningConfig::expires_in(SIGNED_URL_TTL)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(disposition.header_value(key))
            .presigned(presigning)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        tracing::debug!("signed {} link for {}", disposition, key);
        Ok(request.uri().to_string())
    }

    fn describe(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::retry::RetryConfig;
    use axum::body::Bytes;
    use tracing_test::traced_test;

    use super::*;

    fn settings() -> S3Settings {
        S3Settings {
            region: "us-east-1".into(),
            bucket: "rush-resumes".into(),
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
        }
    }

    #[tokio::test]
    async fn test_retrieve_signs_for_one_hour() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = ManagedStore::new(&settings(), LocalDisk::new(dir.path()).await?);

        let url = store
            .retrieve("1700000000000_abcdef0123456789_cv.pdf", Disposition::Inline)
            .await?;
        assert!(url.contains("rush-resumes"));
        assert!(url.contains("1700000000000_abcdef0123456789_cv.pdf"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("response-content-disposition=inline"));

        let url = store.retrieve("k.pdf", Disposition::Attachment).await?;
        assert!(url.contains("response-content-disposition=attachment"));
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_failed_put_falls_back_to_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let s3 = settings();
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(s3.region.clone()))
            .credentials_provider(Credentials::new(
                &s3.access_key_id,
                &s3.secret_access_key,
                None,
                None,
                "test",
            ))
            .endpoint_url("http://127.0.0.1:9")
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .build();
        let store = ManagedStore::from_conf(conf, &s3.bucket, LocalDisk::new(dir.path()).await?);
        let upload = ResumeUpload {
            file_name: "cv.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: Bytes::from_static(b"%PDF-1.7"),
        };

        let stored = store.store(&upload).await?;
        assert_eq!(stored.url.as_deref(), Some(format!("/uploads/{}", stored.key).as_str()));
        assert_eq!(std::fs::read(dir.path().join(&stored.key))?, b"%PDF-1.7");
        assert!(logs_contain("falling back to local save"));
        Ok(())
    }
}
