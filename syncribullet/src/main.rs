use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use syncribullet_api::{create_router, AppState};
use syncribullet_core::{
    env::{EnvironmentLookup, LayeredEnvironment, ProcessEnvironment, StaticEnvironment, SIMKL_CLIENT_ID_VAR},
    logging,
    provider::{ProviderRegistry, SimklListProvider},
    Config,
};

#[derive(Parser, Debug)]
#[command(name = "syncribullet")]
#[command(about = "Watch-list catalogs for Stremio", long_about = None)]
struct Args {
    /// Config file (yaml, toml or json)
    #[arg(long, env = "SYNCRIBULLET_CONFIG_PATH")]
    config: Option<String>,

    /// HTTP listen host, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// HTTP listen port, overrides the config file
    #[arg(long)]
    port: Option<u16>,
}

/// Explicit path first, then ./config.yaml, then environment only
fn load_config(args: &Args) -> Result<Config> {
    let path = args.config.clone().or_else(|| {
        let cwd = "config.yaml";
        Path::new(cwd).exists().then(|| cwd.to_string())
    });

    let mut config = match path {
        Some(path) => {
            eprintln!("Loading config from {path}");
            Config::from_file(&path)?
        }
        None => Config::from_env()?,
    };

    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.http_port = port;
    }

    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("Config validation error: {e}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s)",
            errors.len()
        ));
    }

    Ok(config)
}

/// A client id from the config file wins over the process environment
fn environment(config: &Config) -> Arc<dyn EnvironmentLookup> {
    let mut layers: Vec<Box<dyn EnvironmentLookup>> = Vec::new();
    if let Some(client_id) = &config.simkl.default_client_id {
        layers.push(Box::new(
            StaticEnvironment::new().with(SIMKL_CLIENT_ID_VAR, client_id.as_str()),
        ));
    }
    layers.push(Box::new(ProcessEnvironment));
    Arc::new(LayeredEnvironment(layers))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load and validate configuration
    let config = load_config(&args)?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("SyncriBullet starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Register list providers
    let registry = ProviderRegistry::new().with(Arc::new(SimklListProvider::from_config(&config.simkl)?));
    info!(providers = ?registry.kinds(), "list providers registered");

    let env = environment(&config);
    if env.get(SIMKL_CLIENT_ID_VAR).is_none() {
        info!("{SIMKL_CLIENT_ID_VAR} not set, users must supply their own Simkl client id");
    }

    // 4. Serve
    let state = AppState::new(&config, Arc::new(registry), env);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.http_address()).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
        return Err(e.into());
    }

    info!("HTTP server shut down gracefully");
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
