use std::time::Duration;

use linda_space::file_io::open_file_for_append;
use linda_space::LindaConfig;
use linda_space::LoggingConfig;
use linda_space::NodeBuilder;
use linda_space::Result;
use linda_space::SystemError;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

fn main() -> Result<()> {
    let config = LindaConfig::new()?.validate()?;

    // Initializing Logs
    let _guard = init_observability(&config.logging)?;
    info!("loaded config: {:?}", config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .max_blocking_threads(config.server.max_blocking_threads)
        .thread_name("linda-worker")
        .enable_all()
        .build()?;

    let result = runtime.block_on(serve(config.clone()));

    // Blocking pool threads parked in RD/IN/EX never return on their own.
    runtime.shutdown_timeout(Duration::from_millis(config.server.shutdown_timeout_in_ms));

    info!("Exiting program.");
    result
}

async fn serve(config: LindaConfig) -> Result<()> {
    // Initializing Shutdown Signal
    let (graceful_tx, graceful_rx) = watch::channel(());

    let node = NodeBuilder::new(config, graceful_rx.clone())
        .build()
        .await?
        .start_metrics_server(graceful_rx.clone())
        .ready()?;

    info!("Application started. Waiting for CTRL+C signal...");
    tokio::spawn(async {
        if let Err(e) = graceful_shutdown(graceful_tx).await {
            error!("Failed to shutdown: {:?}", e);
        }
    });

    if let Err(e) = node.run().await {
        error!("node stops: {:?}", e);
        return Err(e);
    }
    Ok(())
}

async fn graceful_shutdown(graceful_tx: watch::Sender<()>) -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C detected.");
        },
    }

    info!("Shutdown server..");
    graceful_tx.send(()).map_err(|e| {
        error!("Failed to send shutdown signal: {}", e);
        SystemError::SignalSenderClosed(format!("Failed to send shutdown signal: {}", e))
    })?;

    info!("Shutdown completed");
    Ok(())
}

/// Logs go to `<log_dir>/linda.log` when configured, stdout otherwise.
/// `RUST_LOG` takes precedence over `logging.default_filter`.
fn init_observability(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.default_filter));

    let (non_blocking, guard) = match logging.log_file() {
        Some(path) => tracing_appender::non_blocking(open_file_for_append(&path)?),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let base_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_filter(filter);
    tracing_subscriber::registry().with(base_subscriber).init();

    Ok(guard)
}
