//! RAX Register - Entry Point
//!
//! A small user-registration backend: `POST /register` hashes and stores
//! credentials in memory.

use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

use rax_register::Server;
use rax_register::auth::MemoryCredentialStore;
use rax_register::config::AppConfig;
use rax_register::error::ServerError;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG, defaulting to info)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching registration server...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server startup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = AppConfig::load()?;
    let store = Arc::new(MemoryCredentialStore::new());

    let server = Server::new(config, store).await?;
    server.start().await
}
