use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_server::{ServerConfig, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.addr(), seed = config.seed, "configuration loaded");

    let store = if config.seed {
        TodoStore::seeded()?
    } else {
        TodoStore::new()
    };

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    todo_server::serve(listener, store).await?;
    Ok(())
}
