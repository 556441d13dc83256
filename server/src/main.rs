use std::sync::Arc;

use todo_core::Store;
use todo_server::config::Config;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(Store::new());

    let listener = TcpListener::bind(config.addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    todo_server::run(listener, store).await
}
