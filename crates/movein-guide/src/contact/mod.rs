//! Contact inquiry intake.
//!
//! Validation mirrors the public form (name, email, message, checked in
//! that order). Delivery is simulated with a fixed delay behind the
//! [`MessageSink`] trait, and only one submission may be in flight at a
//! time.

pub mod domain;
mod router;
mod service;

pub use domain::{ContactSubmission, ContactValidationError};
pub use router::contact_router;
pub use service::{
    ContactIntakeError, ContactMessage, ContactReceipt, ContactService, DeliveryError,
    MessageSink, ReceiptId, CONFIRMATION_MESSAGE, RETRY_MESSAGE,
};
