//! Seam between the contact form and whatever delivers the request.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;

use super::FormData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    // Raised by network-backed transports; the simulated one never fails.
    #[allow(dead_code)]
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Delivers a contact request. May take arbitrarily long.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait SubmissionTransport {
    async fn submit(&self, data: &FormData) -> Result<SubmitReceipt, SubmitError>;
}

/// Stand-in transport: waits, logs the payload and reports success.
pub struct SimulatedTransport {
    delay_ms: u32,
}

impl SimulatedTransport {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

#[async_trait(?Send)]
impl SubmissionTransport for SimulatedTransport {
    async fn submit(&self, data: &FormData) -> Result<SubmitReceipt, SubmitError> {
        // Simulate network delay
        TimeoutFuture::new(self.delay_ms).await;

        match serde_wasm_bindgen::to_value(data) {
            Ok(payload) => gloo_console::log!("Form data submitted:", payload),
            Err(e) => log::warn!("could not convert form data for console: {}", e),
        }
        log::info!("contact request from {} simulated as delivered", data.email);
        Ok(SubmitReceipt { success: true })
    }
}
