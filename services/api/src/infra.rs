use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use survey_quote::quoting::{EnquiryError, EnquiryPayload, EnquiryReceipt, EnquirySink};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sink used until the mail/PDF pipeline is wired in: accepted enquiries
/// are logged and retained in memory so the demo and tests can inspect
/// them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEnquirySink {
    submissions: Arc<Mutex<Vec<EnquiryPayload>>>,
}

impl EnquirySink for InMemoryEnquirySink {
    fn submit(&self, payload: EnquiryPayload) -> Result<EnquiryReceipt, EnquiryError> {
        let reference = payload.reference.clone();
        info!(%reference, "enquiry accepted");

        let mut guard = self.submissions.lock().expect("enquiry mutex poisoned");
        guard.push(payload);

        Ok(EnquiryReceipt {
            reference,
            status: "received".to_string(),
        })
    }
}

impl InMemoryEnquirySink {
    #[cfg(test)]
    pub(crate) fn submissions(&self) -> Vec<EnquiryPayload> {
        self.submissions
            .lock()
            .expect("enquiry mutex poisoned")
            .clone()
    }
}
