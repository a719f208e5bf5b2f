use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so CONFIG_PATH, SERVER_* and RUST_LOG are visible
    dotenv().ok();

    let config = server::startup::load_config();
    let (format, filter) = match &config {
        Ok(cfg) => (LogFormat::from_name(&cfg.logging.format), cfg.logging.filter.clone()),
        Err(_) => (LogFormat::Compact, None),
    };
    init_logging(format, filter.as_deref());
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(
                service = "server",
                event = "config_invalid",
                error = %e,
                "cannot load configuration"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = config.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "server",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        addr = %config.server.bind_addr(),
        "server service starting"
    );

    match rt.block_on(server::run(config)) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                service = "server",
                event = "run_failed",
                error = %e,
                "server::run returned error"
            );
            std::process::ExitCode::FAILURE
        }
    }
}
