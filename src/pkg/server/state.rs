use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres, Transaction};

use crate::{
    conf::Settings,
    pkg::internal::{
        adaptors::applications::{ApplicationRepository, PgApplications},
        admin::AdminCredentials,
        storage::{self, ResumeStorage},
    },
    prelude::Result,
};

#[async_trait::async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait::async_trait]
impl GetTxn for Arc<PgPool> {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}

pub fn db_pool(settings: &Settings) -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<dyn ApplicationRepository>,
    pub resumes: Arc<dyn ResumeStorage>,
    /// `None` disables every admin route.
    pub admin: Option<Arc<AdminCredentials>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub async fn new(settings: &Settings) -> Result<AppState> {
        let applications = PgApplications::new(Arc::new(db_pool(settings)?));
        let resumes = storage::select(settings).await?;
        let admin = settings.admin_credentials().map(Arc::new);
        if admin.is_none() {
            tracing::warn!("ADMIN_USER/ADMIN_PASS not set, admin routes are disabled");
        }
        Ok(AppState {
            applications: Arc::new(applications),
            resumes,
            admin,
            max_upload_bytes: settings.max_upload_bytes,
        })
    }
}
