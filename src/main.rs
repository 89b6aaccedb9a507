use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod redirect;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sizing the thread pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    // The whole redirect chain is assembled before the listener exists; a
    // failing source aborts startup instead of serving a partial chain.
    let chain = redirect::build_from_config(&cfg.redirects)?;

    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg, chain));

    // spawn_local keeps the connection tasks free of Send bounds
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state)).await
}
