use std::sync::Mutex;

use chrono::Utc;

use super::{
    spec::{Application, NewApplication},
    ApplicationRepository,
};
use crate::prelude::Result;

/// Stand-in for Postgres in router tests.
#[derive(Default)]
pub struct MemoryApplications {
    rows: Mutex<Vec<Application>>,
}

impl MemoryApplications {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for MemoryApplications {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let mut rows = self.rows.lock().unwrap();
        let row = Application {
            id: rows.len() as i32 + 1,
            name: application.name,
            email: application.email,
            year: application.year,
            major: application.major,
            gpa: application.gpa,
            linkedin: application.linkedin,
            why: application.why,
            referral: application.referral,
            resume_path: application.resume_path,
            resume_url: application.resume_url,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Application>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Application>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// A repository whose database never answers.
pub struct UnreachableApplications;

#[async_trait::async_trait]
impl ApplicationRepository for UnreachableApplications {
    async fn insert(&self, _: NewApplication) -> Result<Application> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list_all(&self) -> Result<Vec<Application>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get(&self, _: i32) -> Result<Option<Application>> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn ping(&self) -> Result<()> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
