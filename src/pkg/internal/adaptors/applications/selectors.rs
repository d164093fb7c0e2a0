use sqlx::PgConnection;

use super::spec::Application;
use crate::prelude::Result;

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, Application>(
            "SELECT id, name, email, year, major, gpa, linkedin, why, referral, resume_path, resume_url, created_at
             FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, Application>(
            "SELECT id, name, email, year, major, gpa, linkedin, why, referral, resume_path, resume_url, created_at
             FROM applications ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
