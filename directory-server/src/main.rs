use directory_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env and logging
    setup_environment()?;

    // 2. Configuration
    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        addr = %config.bind_addr(),
        database = %config.database_path,
        "Employee directory starting..."
    );

    // 3. Serve (state is initialized inside)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
