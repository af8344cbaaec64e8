use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::info;
use thiserror::Error;

use crate::config;
use crate::submission::ContactPayload;

/// How long the simulated send pretends the network takes.
pub const SIMULATED_DELAY_MS: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not encode contact payload: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("contact endpoint answered with status {0}")]
    Status(u16),
}

/// Delivers a validated contact payload somewhere.
#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError>;
}

/// Logs the payload and waits a fixed delay. Never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTransport {
    delay_ms: u32,
}

impl SimulatedTransport {
    pub fn with_delay(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::with_delay(SIMULATED_DELAY_MS)
    }
}

impl ContactTransport for SimulatedTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        let body = serde_json::to_string(payload).map_err(|e| TransportError::Encode(e.to_string()))?;
        info!("Simulating contact submission ({} ms)", self.delay_ms);
        gloo_console::log!("Form data submitted:", body);
        TimeoutFuture::new(self.delay_ms).await;
        Ok(())
    }
}

/// POSTs the payload as JSON to the backend contact endpoint.
#[cfg_attr(not(feature = "http-transport"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTransport {
    endpoint: String,
}

#[cfg_attr(not(feature = "http-transport"), allow(dead_code))]
impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(config::contact_endpoint())
    }
}

impl ContactTransport for HttpTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        info!("Posting contact form to {}", self.endpoint);
        let response = Request::post(&self.endpoint)
            .json(payload)
            .map_err(|e| TransportError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(TransportError::Status(response.status()))
        }
    }
}

#[cfg(feature = "http-transport")]
pub type DefaultTransport = HttpTransport;

#[cfg(not(feature = "http-transport"))]
pub type DefaultTransport = SimulatedTransport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_transport_waits_one_second_by_default() {
        assert_eq!(SimulatedTransport::default(), SimulatedTransport::with_delay(1_000));
    }

    #[test]
    fn http_transport_targets_contact_endpoint() {
        assert_eq!(HttpTransport::default(), HttpTransport::new(config::contact_endpoint()));
    }

    #[test]
    fn errors_describe_the_failure() {
        assert_eq!(
            TransportError::Status(502).to_string(),
            "contact endpoint answered with status 502"
        );
    }
}
