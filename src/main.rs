use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure is fatal: report and exit non-zero, never retry
    let listener = match server::bind_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    let state = Arc::new(config::AppState::new(cfg));
    let connections = Arc::new(AtomicUsize::new(0));
    let shutdown = server::ShutdownSignal::new();

    logger::log_server_start(&addr, &state);
    server::shutdown::start_signal_handler(shutdown.clone());

    run_server(listener, state, connections, shutdown).await;

    Ok(())
}

/// Accept connections until shutdown is requested, then drain.
async fn run_server(
    listener: TcpListener,
    state: Arc<config::AppState>,
    connections: Arc<AtomicUsize>,
    shutdown: server::ShutdownSignal,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        server::connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &connections,
                            &shutdown,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => {
                logger::log_shutdown_started();
                break;
            }
        }
    }

    // The loop no longer accepts; in-flight responses get the grace period,
    // then the socket is released
    let grace = Duration::from_secs(state.config.performance.shutdown_grace);
    server::shutdown::drain_connections(&connections, grace).await;

    drop(listener);
    logger::log_shutdown_complete();
}
