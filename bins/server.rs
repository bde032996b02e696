use std::process::ExitCode;

use tracing::{error, info};

fn main() -> ExitCode {
    server::startup::init_logging();

    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", message = %info, "unhandled panic occurred");
    }));

    // The same config sizes the runtime and configures the server.
    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(event = "start", pid = std::process::id(), version = env!("CARGO_PKG_VERSION"), threads = cfg.server.worker_threads, "product api starting");

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(event = "run_failed", error = %e, "server stopped with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
