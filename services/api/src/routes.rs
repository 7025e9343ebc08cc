use crate::infra::{deserialize_optional_date, parse_datetime, standard_estimator, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime};
use movein_guide::contact::{contact_router, ContactService, MessageSink};
use movein_guide::error::AppError;
use movein_guide::estimator::{format_yen, CostEstimateInput, CostEstimateResult};
use movein_guide::hours::{BusinessHoursEvaluator, BusinessStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct EstimateRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) monthly_rent: u32,
    #[serde(default)]
    pub(crate) maintenance_fee: u32,
    #[serde(default = "default_months")]
    pub(crate) deposit_months: f64,
    #[serde(default = "default_months")]
    pub(crate) key_money_months: f64,
    #[serde(default)]
    pub(crate) parking_fee: u32,
    #[serde(default)]
    pub(crate) free_rent_applied: bool,
    #[serde(default)]
    pub(crate) pet_fee_applied: bool,
    #[serde(default)]
    pub(crate) agent_fee_waived: bool,
}

fn default_months() -> f64 {
    1.0
}

impl EstimateRequest {
    fn into_input(self) -> CostEstimateInput {
        CostEstimateInput {
            move_in_date: self.move_in_date,
            monthly_rent: self.monthly_rent,
            maintenance_fee: self.maintenance_fee,
            deposit_months: self.deposit_months,
            key_money_months: self.key_money_months,
            parking_fee: self.parking_fee,
            free_rent_applied: self.free_rent_applied,
            pet_fee_applied: self.pet_fee_applied,
            agent_fee_waived: self.agent_fee_waived,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LineItemView {
    pub(crate) label: String,
    pub(crate) amount: u64,
    pub(crate) formatted: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    pub(crate) line_items: Vec<LineItemView>,
    pub(crate) total: u64,
    pub(crate) total_formatted: String,
}

impl From<CostEstimateResult> for EstimateResponse {
    fn from(result: CostEstimateResult) -> Self {
        let line_items = result
            .line_items
            .into_iter()
            .map(|item| LineItemView {
                formatted: format_yen(item.amount),
                label: item.label,
                amount: item.amount,
            })
            .collect();

        Self {
            line_items,
            total: result.total,
            total_formatted: format_yen(result.total),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    pub(crate) at: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    pub(crate) evaluated_at: NaiveDateTime,
    pub(crate) is_open: bool,
    pub(crate) headline: String,
    pub(crate) detail: String,
}

impl StatusResponse {
    fn new(evaluated_at: NaiveDateTime, status: BusinessStatus) -> Self {
        Self {
            evaluated_at,
            is_open: status.is_open,
            headline: status.headline,
            detail: status.detail,
        }
    }
}

pub(crate) fn with_service_routes<S>(contact: Arc<ContactService<S>>) -> axum::Router
where
    S: MessageSink + 'static,
{
    contact_router(contact)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/costs/estimate",
            axum::routing::post(estimate_endpoint),
        )
        .route(
            "/api/v1/hours/status",
            axum::routing::get(hours_status_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn estimate_endpoint(
    Json(payload): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let estimator = standard_estimator();
    let result = estimator.estimate(&payload.into_input())?;
    Ok(Json(EstimateResponse::from(result)))
}

pub(crate) async fn hours_status_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    match query.at {
        Some(raw) => match parse_datetime(&raw) {
            Ok(at) => Json(on_demand_status(&state.evaluator, at)).into_response(),
            Err(message) => {
                let payload = json!({ "error": message });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
        },
        None => Json(cached_status(&state.status)).into_response(),
    }
}

pub(crate) fn on_demand_status(
    evaluator: &BusinessHoursEvaluator,
    at: NaiveDateTime,
) -> StatusResponse {
    StatusResponse::new(at, evaluator.evaluate(at))
}

/// Snapshot of the cached status, stamped with the instant it was
/// computed rather than the instant it was read.
pub(crate) fn cached_status(
    cache: &std::sync::Mutex<(NaiveDateTime, BusinessStatus)>,
) -> StatusResponse {
    let (computed_at, status) = cache.lock().expect("status mutex poisoned").clone();
    StatusResponse::new(computed_at, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::standard_evaluator;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Json;
    use movein_guide::contact::{ContactMessage, DeliveryError};
    use movein_guide::estimator::EstimateError;
    use std::time::Duration;
    use tower::util::ServiceExt;

    #[derive(Default)]
    struct NullSink;

    impl MessageSink for NullSink {
        fn deliver(&self, _message: ContactMessage) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let service = Arc::new(ContactService::new(
            Arc::new(NullSink::default()),
            Duration::ZERO,
        ));
        let app = with_service_routes(service);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn sample_request() -> EstimateRequest {
        EstimateRequest {
            move_in_date: NaiveDate::from_ymd_opt(2025, 6, 10),
            monthly_rent: 100_000,
            maintenance_fee: 5_000,
            deposit_months: 1.0,
            key_money_months: 1.0,
            parking_fee: 0,
            free_rent_applied: false,
            pet_fee_applied: false,
            agent_fee_waived: false,
        }
    }

    #[tokio::test]
    async fn estimate_endpoint_returns_formatted_breakdown() {
        let Json(body) = estimate_endpoint(Json(sample_request()))
            .await
            .expect("estimate builds");

        assert_eq!(body.line_items.len(), 6);
        assert_eq!(body.total, 530_999);
        assert_eq!(body.total_formatted, "¥530,999");
        assert_eq!(body.line_items[0].formatted, "¥100,000");
    }

    #[tokio::test]
    async fn estimate_endpoint_rejects_missing_rent() {
        let mut request = sample_request();
        request.monthly_rent = 0;

        match estimate_endpoint(Json(request)).await {
            Err(AppError::Estimate(EstimateError::MissingRent)) => {}
            other => panic!("expected missing rent error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn estimate_endpoint_rejects_missing_date_first() {
        let mut request = sample_request();
        request.move_in_date = None;
        request.monthly_rent = 0;

        match estimate_endpoint(Json(request)).await {
            Err(AppError::Estimate(EstimateError::MissingMoveInDate)) => {}
            other => panic!("expected missing date error, got {other:?}"),
        }
    }

    #[test]
    fn on_demand_status_reports_a_wednesday_closure() {
        let evaluator = standard_evaluator();
        let at = NaiveDate::from_ymd_opt(2025, 6, 11)
            .expect("valid date")
            .and_hms_opt(11, 0, 0)
            .expect("valid time");

        let view = on_demand_status(&evaluator, at);
        assert!(!view.is_open);
        assert_eq!(view.headline, "closed today");
        assert_eq!(view.detail, "Wednesday closure");
        assert_eq!(view.evaluated_at, at);
    }

    #[test]
    fn cached_status_keeps_its_computation_timestamp() {
        let computed_at = NaiveDate::from_ymd_opt(2025, 6, 9)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time");
        let status = standard_evaluator().evaluate(computed_at);
        let cache = std::sync::Mutex::new((computed_at, status));

        let view = cached_status(&cache);
        assert_eq!(view.evaluated_at, computed_at);
        assert!(view.is_open);
    }

    #[test]
    fn on_demand_status_reports_open_hours() {
        let evaluator = standard_evaluator();
        let at = NaiveDate::from_ymd_opt(2025, 6, 9)
            .expect("valid date")
            .and_hms_opt(10, 30, 0)
            .expect("valid time");

        let view = on_demand_status(&evaluator, at);
        assert!(view.is_open);
        assert_eq!(view.detail, "open until 18:00");
    }
}
