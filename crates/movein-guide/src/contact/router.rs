use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::ContactSubmission;
use super::service::{ContactIntakeError, ContactService, MessageSink, RETRY_MESSAGE};

/// Router builder exposing the contact intake endpoint.
pub fn contact_router<S>(service: Arc<ContactService<S>>) -> Router
where
    S: MessageSink + 'static,
{
    Router::new()
        .route("/api/v1/contact", post(submit_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ContactService<S>>>,
    axum::Json(submission): axum::Json<ContactSubmission>,
) -> Response
where
    S: MessageSink + 'static,
{
    match service.submit(submission).await {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(ContactIntakeError::Validation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ContactIntakeError::SubmissionInFlight) => {
            let payload = json!({ "error": "a submission is already in progress" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(ContactIntakeError::Delivery(_)) => {
            let payload = json!({ "error": RETRY_MESSAGE });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
