//! Sheetdrop web server implementation
//!
//! Axum server hosting the upload page and the JSON endpoints behind it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::excel::program_dir;
use crate::session::Session;
use crate::types::RowPolicy;

/// Default upload size limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Where saved workbooks land; `None` means the program's own directory
    pub output_dir: Option<PathBuf>,
    pub policy: RowPolicy,
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            output_dir: None,
            policy: RowPolicy::Accept,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Configured output directory, falling back to the program directory
    pub fn resolve_output_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(program_dir()?),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub output_dir: PathBuf,
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(output_dir: PathBuf, policy: RowPolicy) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            output_dir,
            session: Mutex::new(Session::new(policy)),
        }
    }

    /// Lock the session; a poisoned lock still yields the inner state
    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Install the global tracing subscriber (`RUST_LOG` overrides the default filter)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetdrop=info,tower_http=info".into()),
        )
        .try_init();
}

/// Build the router with all routes and layers
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Browser page
        .route("/", get(handlers::index))
        // Health and info endpoints
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1", get(handlers::api_info))
        // Upload / preview / save
        .route("/api/v1/upload", post(handlers::upload))
        .route("/api/v1/table", get(handlers::table))
        .route("/api/v1/save", post(handlers::save))
        .route("/api/v1/download", get(handlers::download))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the web server until SIGINT/SIGTERM
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    init_tracing();

    let output_dir = config.resolve_output_dir()?;
    let state = Arc::new(AppState::new(output_dir.clone(), config.policy));
    let app = router(state, config.max_upload_bytes);

    let addr = config.socket_addr()?;
    info!("Sheetdrop starting on http://{}", addr);
    info!("   Saving workbooks to {}", output_dir.display());
    info!("   Row policy: {}", config.policy);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sheetdrop shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.output_dir.is_none());
        assert_eq!(config.policy, RowPolicy::Accept);
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9090);
    }

    #[test]
    fn test_config_bad_host() {
        let config = ApiConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_resolve_output_dir_prefers_configured() {
        let config = ApiConfig {
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_output_dir().unwrap(),
            PathBuf::from("/tmp/out")
        );
        assert!(ApiConfig::default().resolve_output_dir().unwrap().is_dir());
    }

    #[test]
    fn test_app_state_session_starts_empty() {
        let state = AppState::new(PathBuf::from("."), RowPolicy::Pad);
        let session = state.session();
        assert!(session.table().is_none());
        assert_eq!(session.policy(), RowPolicy::Pad);
    }
}
