use std::sync::Arc;
use std::time::Duration;

use wasm_bundle_server::config::{AppState, Config};
use wasm_bundle_server::{logger, server};

/// How long in-flight blocking file reads get after shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let result = runtime.block_on(async_main(cfg));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = cfg.root_dir()?;
    if !root.is_dir() {
        logger::log_warning(&format!(
            "Root directory not found or not a directory: {}",
            root.display()
        ));
    }

    // Listener failures are logged, not turned into a failing exit status
    let Some(listener) = server::bind_listener(&cfg).await else {
        return Ok(());
    };
    let mut shutdown = server::ShutdownSignal::register()?;

    logger::log_server_start(&root, &cfg.listen_url());
    logger::log_server_config(&cfg);

    let state = Arc::new(AppState::new(cfg, root));
    server::run_server(listener, state, async move { shutdown.recv().await }).await;

    Ok(())
}
