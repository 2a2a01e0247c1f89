use log::{info, warn};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use axum::Router;
use axum::middleware::from_fn;

use crate::auth::{CredentialStore, PasswordHasher, Registrar};
use crate::config::AppConfig;
use crate::error::ServerError;
use crate::middleware::{cors_layer, log_request};
use crate::server::routes::api_routes;

pub struct Server {
    listener: TcpListener,
    router: Router,
    config: Arc<AppConfig>,
}

impl Server {
    /// Binds the listener and assembles the router. Nothing is served until
    /// [`Server::start`] is called.
    pub async fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, ServerError> {
        let addr = config.listen_addr()?;
        let router = Self::router(&config, store)?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            config: Arc::new(config),
        })
    }

    /// Build the full application router without binding a socket.
    pub fn router(
        config: &AppConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Router, ServerError> {
        let origins = config.origin_header_values()?;
        let registrar = Registrar::new(store, PasswordHasher::new(config.bcrypt_cost));

        Ok(api_routes(registrar)
            .layer(cors_layer(origins))
            .layer(from_fn(log_request)))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C.
    pub async fn start(self) -> Result<(), ServerError> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn start_with_shutdown<F>(self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            "Starting RAX register server on {} (allowed origins: {})",
            self.local_addr()?,
            self.config.allowed_origins.join(", ")
        );

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
