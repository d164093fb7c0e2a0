use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub year: String,
    pub major: String,
    pub gpa: Option<BigDecimal>,
    pub linkedin: Option<String>,
    pub why: Option<String>,
    pub referral: Option<String>,
    pub resume_path: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything the insert needs; `id` and `created_at` come from the database.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub year: String,
    pub major: String,
    pub gpa: Option<BigDecimal>,
    pub linkedin: Option<String>,
    pub why: Option<String>,
    pub referral: Option<String>,
    pub resume_path: Option<String>,
    pub resume_url: Option<String>,
}
