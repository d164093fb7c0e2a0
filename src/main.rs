mod cmd;
pub mod conf;
pub mod pkg;
mod prelude;

use tracing_subscriber::EnvFilter;

use crate::prelude::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();
    // panics are logged, the server keeps running
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("uncaught panic: {}", info);
    }));

    cmd::run().await?;
    Ok(())
}
