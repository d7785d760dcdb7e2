use storefront_server::{Config, Server, ServerState, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )?;

    tracing::info!(
        env = %config.environment,
        backend = ?config.store_backend,
        "Starting storefront-server"
    );

    if let Some(dir) = config.log_dir.as_deref()
        && let Err(e) = storefront_server::cleanup_old_logs(std::path::Path::new(dir))
    {
        tracing::warn!(error = %e, "Log cleanup failed");
    }

    let state = ServerState::initialize(config).await?;
    Server::new(state).run().await
}
