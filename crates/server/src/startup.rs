use std::future::Future;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// All origins, methods and headers, with credentials. Local/demo use only.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`), falling back to env vars and defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Public entry: build the app and run the HTTP server until a shutdown signal.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = routes::build_router(AppState::in_memory(), build_cors());

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener.local_addr().map_err(StartupError::Serve)?;
    info!(service = "server", event = "listening", addr = %local, "server listening");

    serve(listener, app, shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!(
        service = "server",
        event = "shutdown_signal",
        "shutdown signal received, draining connections"
    );
}
