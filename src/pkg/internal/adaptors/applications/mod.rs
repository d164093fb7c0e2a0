use std::sync::Arc;

use sqlx::PgPool;

use crate::{pkg::server::state::GetTxn, prelude::Result};

pub mod mutators;
pub mod selectors;
pub mod spec;

#[cfg(test)]
pub mod memory;

use mutators::ApplicationMutator;
use selectors::ApplicationSelector;
use spec::{Application, NewApplication};

/// Rows are written once and only ever read back afterwards.
#[async_trait::async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: NewApplication) -> Result<Application>;

    /// Newest first.
    async fn list_all(&self) -> Result<Vec<Application>>;

    async fn get(&self, id: i32) -> Result<Option<Application>>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgApplications {
    pool: Arc<PgPool>,
}

impl PgApplications {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgApplications { pool }
    }
}

#[async_trait::async_trait]
impl ApplicationRepository for PgApplications {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let mut tx = self.pool.begin_txn().await?;
        let row = ApplicationMutator::new(&mut tx).create(application).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Application>> {
        let mut tx = self.pool.begin_txn().await?;
        let rows = ApplicationSelector::new(&mut tx).get_all().await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Application>> {
        let mut tx = self.pool.begin_txn().await?;
        let row = ApplicationSelector::new(&mut tx).get_by_id(id).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&*self.pool).await?;
        Ok(())
    }
}
