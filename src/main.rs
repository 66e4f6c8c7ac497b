use std::sync::Arc;

use ckbuylist::server::{router, AppState};
use ckbuylist::Config;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level, e.g. RUST_LOG=ckbuylist=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> ckbuylist::Result<()> {
    let config = Config::from_env()?;
    let addr = config.bind_addr.clone();
    log::info!(
        "Using MTGJSON at {} (prices: {}, cache: {}s)",
        config.cdn_base,
        config.prices_file,
        config.price_cache_ttl.as_secs()
    );

    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    log::info!("Listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
