use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::{ContactSubmission, ContactValidationError};

/// Confirmation copy shown after a successful submission.
pub const CONFIRMATION_MESSAGE: &str =
    "We have received your inquiry. Thank you for contacting us.";

/// Generic retry copy shown when delivery fails.
pub const RETRY_MESSAGE: &str = "An error occurred while sending. Please try again.";

/// Delivery target for accepted inquiries (mail gateway, CRM, ...).
pub trait MessageSink: Send + Sync {
    fn deliver(&self, message: ContactMessage) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub String);

/// Inquiry as handed to the sink once validation has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub receipt_id: ReceiptId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub body: String,
}

/// Confirmation returned to the caller on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub receipt_id: ReceiptId,
    pub confirmation: String,
}

#[derive(Debug, thiserror::Error)]
#[error("message delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum ContactIntakeError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("{}", RETRY_MESSAGE)]
    Delivery(#[source] DeliveryError),
}

static RECEIPT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_receipt_id() -> ReceiptId {
    let id = RECEIPT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReceiptId(format!("inq-{id:06}"))
}

/// Clears the in-flight flag when dropped, so the flag is released even
/// when the caller drops the `submit` future mid-delay.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Intake front end: validates the submission, models the upstream call
/// with a fixed delay, and admits one submission at a time.
///
/// Nothing cancels the delay from the inside, but a caller may drop the
/// future mid-delay; the in-flight slot is freed either way.
pub struct ContactService<S> {
    sink: Arc<S>,
    delay: Duration,
    in_flight: AtomicBool,
}

impl<S> ContactService<S>
where
    S: MessageSink + 'static,
{
    pub fn new(sink: Arc<S>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactReceipt, ContactIntakeError> {
        submission.validate()?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ContactIntakeError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        tokio::time::sleep(self.delay).await;

        let receipt_id = next_receipt_id();
        let message = ContactMessage {
            receipt_id: receipt_id.clone(),
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            subject: submission.subject.trim().to_string(),
            body: submission.message.trim().to_string(),
        };

        self.sink
            .deliver(message)
            .map_err(ContactIntakeError::Delivery)?;

        Ok(ContactReceipt {
            receipt_id,
            confirmation: CONFIRMATION_MESSAGE.to_string(),
        })
    }
}
