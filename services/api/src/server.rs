use crate::cli::ServeArgs;
use crate::infra::{standard_evaluator, AppState, InMemoryMessageSink};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDateTime};
use movein_guide::config::AppConfig;
use movein_guide::contact::ContactService;
use movein_guide::error::AppError;
use movein_guide::hours::{BusinessHoursEvaluator, BusinessStatus};
use movein_guide::telemetry;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let evaluator = Arc::new(standard_evaluator());
    let started = Local::now().naive_local();
    let status = Arc::new(Mutex::new((started, evaluator.evaluate(started))));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        evaluator: evaluator.clone(),
        status: status.clone(),
    };

    let sink = Arc::new(InMemoryMessageSink::default());
    let contact_service = Arc::new(ContactService::new(sink, config.contact.delivery_delay));

    let app = with_service_routes(contact_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    spawn_status_refresh(evaluator, status, config.status.refresh);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "move-in guide desk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Re-evaluates the cached open/closed status on a fixed period so that
/// status reads never compute on the request path.
fn spawn_status_refresh(
    evaluator: Arc<BusinessHoursEvaluator>,
    status: Arc<Mutex<(NaiveDateTime, BusinessStatus)>>,
    period: Duration,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; the status is already warm.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = Local::now().naive_local();
            let fresh = evaluator.evaluate(now);
            *status.lock().expect("status mutex poisoned") = (now, fresh);
        }
    });
}
