//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Run the single doctor-list fetch in the background
//! - Publish the loaded list to handlers without locking
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DirectoryConfig;
use crate::directory::session::{Directory, DirectoryState};
use crate::directory::source::DoctorSource;
use crate::http::handlers::{
    health, list_doctors, list_specialities, list_suggestions, update_filters,
};
use crate::http::request::{propagate_request_id, set_request_id};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<ArcSwap<DirectoryState>>,
}

impl AppState {
    /// A state in `Loading`.
    pub fn new() -> Self {
        Self {
            directory: Arc::new(ArcSwap::from_pointee(DirectoryState::Loading)),
        }
    }

    /// Current directory state.
    pub fn snapshot(&self) -> Arc<DirectoryState> {
        self.directory.load_full()
    }

    /// Move to `Ready` with the loaded directory.
    pub fn publish(&self, directory: Directory) {
        self.directory
            .store(Arc::new(DirectoryState::Ready(Arc::new(directory))));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP server for the doctor directory.
pub struct HttpServer {
    router: Router,
    config: DirectoryConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DirectoryConfig) -> Self {
        let state = AppState::new();
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DirectoryConfig, state: AppState) -> Router {
        Router::new()
            .route("/doctors", get(list_doctors))
            .route("/filters", post(update_filters))
            .route("/suggestions", get(list_suggestions))
            .route("/specialities", get(list_specialities))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id())
    }

    /// The router, for driving the API in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the shared directory state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Run the server: fetch once in the background, serve until shutdown.
    pub async fn run<S>(
        self,
        listener: TcpListener,
        source: S,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error>
    where
        S: DoctorSource + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut loader_shutdown = shutdown.resubscribe();
        let loader = tokio::spawn(async move {
            tokio::select! {
                directory = Directory::load(&source) => state.publish(directory),
                _ = loader_shutdown.recv() => {
                    tracing::info!("Shutdown before doctor list loaded");
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        loader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::doctor::fixtures::doctor;

    #[test]
    fn test_state_publish() {
        let state = AppState::new();
        assert!(!state.snapshot().is_ready());

        state.publish(Directory::from_doctors(vec![doctor("Alice", 1, 1)]));
        let snapshot = state.snapshot();
        assert!(snapshot.is_ready());
        assert_eq!(snapshot.doctors().len(), 1);
    }
}
