use sqlx::PgConnection;

use super::spec::{Application, NewApplication};
use crate::prelude::Result;

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    pub async fn create(&mut self, application: NewApplication) -> Result<Application> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (name, email, year, major, gpa, linkedin, why, referral, resume_path, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, email, year, major, gpa, linkedin, why, referral, resume_path, resume_url, created_at
            "#,
        )
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.year)
        .bind(&application.major)
        .bind(&application.gpa)
        .bind(&application.linkedin)
        .bind(&application.why)
        .bind(&application.referral)
        .bind(&application.resume_path)
        .bind(&application.resume_url)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
