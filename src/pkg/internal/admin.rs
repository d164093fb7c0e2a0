use base64::{engine::general_purpose::STANDARD as b64, Engine as _};
use subtle::ConstantTimeEq;

use crate::prelude::{AppError, Result};

/// The single configured admin login.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

/// A username/password pair lifted out of an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = b64.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl AdminCredentials {
    pub fn new(username: String, password: String) -> Self {
        AdminCredentials { username, password }
    }

    fn matches(&self, supplied: &BasicCredentials) -> bool {
        let user = supplied.username.as_bytes().ct_eq(self.username.as_bytes());
        let pass = supplied.password.as_bytes().ct_eq(self.password.as_bytes());
        (user & pass).into()
    }

    /// 401 when nothing usable was supplied, 403 for the wrong pair.
    pub fn check(&self, supplied: Option<&BasicCredentials>) -> Result<()> {
        match supplied {
            None => Err(AppError::Unauthorized),
            Some(c) if self.matches(c) => Ok(()),
            Some(c) => {
                tracing::warn!("admin login rejected for user {}", &c.username);
                Err(AppError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(pair: &str) -> String {
        format!("Basic {}", b64.encode(pair))
    }

    #[test]
    fn test_parse() {
        let c = BasicCredentials::parse(&header("admin:s3cr:et")).unwrap();
        assert_eq!(c.username, "admin");
        assert_eq!(c.password, "s3cr:et");

        assert!(BasicCredentials::parse("Bearer abc").is_none());
        assert!(BasicCredentials::parse("Basic !!!not-base64").is_none());
        assert!(BasicCredentials::parse(&header("no-colon")).is_none());
        assert!(BasicCredentials::parse("Basic").is_none());
    }

    #[test]
    fn test_check() {
        let admin = AdminCredentials::new("admin".into(), "hunter2".into());
        assert!(matches!(admin.check(None), Err(AppError::Unauthorized)));

        let wrong = BasicCredentials::parse(&header("admin:hunter3")).unwrap();
        assert!(matches!(admin.check(Some(&wrong)), Err(AppError::Forbidden)));

        for pair in ["root:hunter2", "admin:hunter22", "admin:", "admi:hunter2"] {
            let wrong = BasicCredentials::parse(&header(pair)).unwrap();
            assert!(matches!(admin.check(Some(&wrong)), Err(AppError::Forbidden)), "{}", pair);
        }

        let right = BasicCredentials::parse(&header("admin:hunter2")).unwrap();
        assert!(admin.check(Some(&right)).is_ok());
    }
}
