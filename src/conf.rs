use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::{pkg::internal::admin::AdminCredentials, prelude::Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    pub database_url: String,
    pub database_pool_max_connections: u32,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub uploads_dir: PathBuf,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    //s3
    pub aws_region: Option<String>,
    pub s3_bucket: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    //admin
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/rush".into(),
            database_pool_max_connections: 5,
            port: None,
            host: None,
            uploads_dir: PathBuf::from("uploads"),
            static_dir: PathBuf::from("public"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            aws_region: None,
            s3_bucket: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            admin_user: None,
            admin_pass: None,
        }
    }
}

/// Connection details for the managed object store, present only when every
/// piece is configured.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl Settings {
    pub fn new() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }

    pub fn s3(&self) -> Option<S3Settings> {
        let parts = (
            present(&self.aws_region),
            present(&self.s3_bucket),
            present(&self.aws_access_key_id),
            present(&self.aws_secret_access_key),
        );
        match parts {
            (Some(region), Some(bucket), Some(access_key_id), Some(secret_access_key)) => {
                Some(S3Settings {
                    region,
                    bucket,
                    access_key_id,
                    secret_access_key,
                })
            }
            (None, None, None, None) => None,
            _ => {
                tracing::warn!(
                    "S3 partially configured (AWS_REGION, S3_BUCKET, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY all required), uploads will be saved locally"
                );
                None
            }
        }
    }

    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        match (present(&self.admin_user), present(&self.admin_pass)) {
            (Some(username), Some(password)) => Some(AdminCredentials::new(username, password)),
            _ => None,
        }
    }

    /// Platforms that inject `PORT` expect the service on every interface;
    /// local runs stay on loopback.
    pub fn listen_addr(&self) -> String {
        let host = present(&self.host).unwrap_or_else(|| match self.port {
            Some(_) => "0.0.0.0".into(),
            None => "127.0.0.1".into(),
        });
        format!("{}:{}", host, self.port.unwrap_or(DEFAULT_PORT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_requires_all_four_values() {
        let mut s = Settings {
            aws_region: Some("us-east-1".into()),
            s3_bucket: Some("rush-resumes".into()),
            aws_access_key_id: Some("AKIA".into()),
            ..Default::default()
        };
        assert!(s.s3().is_none());
        s.aws_secret_access_key = Some("   ".into());
        assert!(s.s3().is_none());
        s.aws_secret_access_key = Some("secret".into());
        let s3 = s.s3().unwrap();
        assert_eq!(s3.bucket, "rush-resumes");
        assert_eq!(s3.region, "us-east-1");
    }

    #[test]
    fn test_admin_requires_both_values() {
        let mut s = Settings {
            admin_user: Some("admin".into()),
            ..Default::default()
        };
        assert!(s.admin_credentials().is_none());
        s.admin_pass = Some("".into());
        assert!(s.admin_credentials().is_none());
        s.admin_pass = Some("hunter2".into());
        assert!(s.admin_credentials().is_some());
    }

    #[test]
    fn test_listen_addr() {
        let mut s = Settings::default();
        assert_eq!(s.listen_addr(), "127.0.0.1:3000");
        s.port = Some(8080);
        assert_eq!(s.listen_addr(), "0.0.0.0:8080");
        s.host = Some("10.0.0.2".into());
        assert_eq!(s.listen_addr(), "10.0.0.2:8080");
    }
}
