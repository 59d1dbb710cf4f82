use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use foo_module::config::{AppState, Config};
use foo_module::modules::MODULES;
use foo_module::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Worker threads from config, default is one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(AppState::new(&cfg, MODULES));
    logger::log_server_start(&listener.local_addr()?, &cfg, state.hooks.handler_names());

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    let active_connections = Arc::new(AtomicUsize::new(0));
    server::start_server_loop(listener, state, active_connections, signals).await?;
    Ok(())
}
