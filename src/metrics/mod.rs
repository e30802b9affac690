
use lazy_static::lazy_static;
use prometheus::Encoder;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

pub(crate) const METRICS_NAMESPACE: &str = "linda";

lazy_static! {
    /// Completed engine operations, by `op` = write | read | take | exchange
    pub static ref OPERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("operations_total", "Completed tuple space operations"),
        &["op"]
    )
    .expect("metric can not be created");

    /// Exchange outcomes, by `status` = OK | NO-SERVICE
    pub static ref EXCHANGE_RESULTS: IntCounterVec = IntCounterVec::new(
        Opts::new("exchange_results_total", "Exchange outcomes by status"),
        &["status"]
    )
    .expect("metric can not be created");

    pub static ref BLOCKED_WAITERS: IntGauge = IntGauge::new(
        "blocked_waiters",
        "Callers currently suspended in read, take or exchange"
    )
    .expect("metric can not be created");

    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("active_sessions", "Open client connections")
            .expect("metric can not be created");

    pub static ref MALFORMED_REQUESTS: IntCounter =
        IntCounter::new("malformed_requests_total", "Request lines answered with ERROR")
            .expect("metric can not be created");

    pub static ref REGISTRY: Registry = {
        let registry = Registry::new_custom(Some(METRICS_NAMESPACE.to_string()), None)
            .expect("registry can be created");
        register_custom_metrics(&registry).expect("collector can be registered");
        registry
    };
}

pub(crate) fn register_custom_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(OPERATIONS_TOTAL.clone()))?;
    registry.register(Box::new(EXCHANGE_RESULTS.clone()))?;
    registry.register(Box::new(BLOCKED_WAITERS.clone()))?;
    registry.register(Box::new(ACTIVE_SESSIONS.clone()))?;
    registry.register(Box::new(MALFORMED_REQUESTS.clone()))?;
    Ok(())
}

/// Serves `/metrics` until `shutdown_signal` fires.
pub async fn start_server(
    port: u16,
    mut shutdown_signal: watch::Receiver<()>,
) {
    let metrics_route = warp::path!("metrics").and_then(metrics_handler);

    info!("metrics server listening on port {}", port);
    let (_, server) =
        warp::serve(metrics_route).bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
            let _ = shutdown_signal.changed().await;
        });
    server.await;
}

async fn metrics_handler() -> Result<impl Reply, Rejection> {
    Ok(encode_metrics(&REGISTRY))
}

pub(crate) fn encode_metrics(registry: &Registry) -> String {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        error!("could not encode custom metrics: {}", e);
    };
    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            error!("custom metrics could not be from_utf8'd: {}", e);
            String::default()
        }
    }
}
