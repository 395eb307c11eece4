use anyhow::Context;
use mesa_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    print_banner();

    // 2. Configuration
    let config = Config::from_env();
    tracing::info!(
        environment = %config.environment,
        timezone = %config.timezone,
        port = config.http_port,
        "Mesa server starting..."
    );

    // 3. State (work dir, database, migrations)
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 4. HTTP server until Ctrl-C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
