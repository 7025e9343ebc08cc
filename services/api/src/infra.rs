use chrono::{NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use movein_guide::contact::{ContactMessage, DeliveryError, MessageSink};
use movein_guide::estimator::{FeeSchedule, MoveInCostEstimator};
use movein_guide::hours::{BusinessHoursEvaluator, BusinessStatus};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) evaluator: Arc<BusinessHoursEvaluator>,
    /// Cached status paired with the instant it was computed.
    pub(crate) status: Arc<Mutex<(NaiveDateTime, BusinessStatus)>>,
}

/// Sink that records deliveries in memory. `fail_next` forces the
/// delivery-failure branch for demos and tests.
#[derive(Default)]
pub(crate) struct InMemoryMessageSink {
    messages: Mutex<Vec<ContactMessage>>,
    fail_next: AtomicBool,
}

impl MessageSink for InMemoryMessageSink {
    fn deliver(&self, message: ContactMessage) -> Result<(), DeliveryError> {
        if self.fail_next.swap(false, Ordering::AcqRel) {
            return Err(DeliveryError("simulated gateway outage".to_string()));
        }
        self.messages
            .lock()
            .expect("sink mutex poisoned")
            .push(message);
        Ok(())
    }
}

impl InMemoryMessageSink {
    pub(crate) fn messages(&self) -> Vec<ContactMessage> {
        self.messages.lock().expect("sink mutex poisoned").clone()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::Release);
    }
}

pub(crate) fn standard_estimator() -> MoveInCostEstimator {
    MoveInCostEstimator::new(FeeSchedule::standard())
}

pub(crate) fn standard_evaluator() -> BusinessHoursEvaluator {
    BusinessHoursEvaluator::standard()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS] ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
