use auth_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional)
    let _ = dotenv::dotenv();

    // 2. Configuration
    let config = Config::from_env();

    // 3. Logging
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), config.log_dir.as_deref());

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Auth server starting"
    );

    // 4. HTTP server
    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
