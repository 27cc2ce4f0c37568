use gainers::GainersError;
use gainers::client::BinanceClient;
use gainers::config::fetch_config;
use gainers::credentials::load_dotenv;
use gainers::pipeline::Pipeline;
use gainers::scheduler;
use gainers::store::SnapshotLog;
use gainers::tls::build_tls_config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), GainersError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    load_dotenv();
    let app_config = fetch_config()?;

    let tls_config = build_tls_config(app_config.binance.ca_bundle.as_deref())?;
    let client = BinanceClient::new(&app_config.binance, tls_config)?;
    let log = SnapshotLog::new(app_config.log.path.clone(), app_config.log.schema);
    info!(
        rest_url = %app_config.binance.rest_url,
        log_path = %log.path().display(),
        schema = ?log.schema(),
        "Tracking top gainers"
    );

    let pipeline = Pipeline::new(client, log);
    scheduler::run(
        app_config.poll_interval,
        || pipeline.run_tick(),
        shutdown_signal(),
    )
    .await;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
