//! HTTP transport: POSTs JSON bodies with reqwest (when the `http` feature
//! is enabled). No retries here; the dispatcher re-queues failed batches.

use std::time::Duration;

use pagelog_core::config::TransportConfig;
#[cfg(feature = "http")]
use pagelog_core::constants::{CONTENT_TYPE_JSON, USER_ID_HEADER};
use pagelog_core::errors::TransportError;
use pagelog_core::traits::{Delivery, OutboundRequest, Transport};

#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Prefix for relative endpoints such as `/api/logs`.
    pub base_url: String,
    pub timeout: Duration,
    /// Tighter bound for `Delivery::Beacon` sends, which run during unload.
    pub beacon_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(
                pagelog_core::config::defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            beacon_timeout: Duration::from_millis(
                pagelog_core::config::defaults::DEFAULT_BEACON_TIMEOUT_MS,
            ),
        }
    }
}

impl HttpTransportConfig {
    pub fn from_transport_config(base_url: impl Into<String>, config: &TransportConfig) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            beacon_timeout: Duration::from_millis(config.beacon_timeout_ms),
        }
    }

    /// Beacon sends never wait longer than the regular timeout either.
    pub fn timeout_for(&self, delivery: Delivery) -> Duration {
        match delivery {
            Delivery::Deferred => self.timeout,
            Delivery::Beacon => self.beacon_timeout.min(self.timeout),
        }
    }
}

#[derive(Debug)]
pub struct HttpTransport {
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Self {
        Self { config }
    }

    /// Absolute endpoints pass through; relative ones get the base URL.
    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
        }
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    #[cfg(feature = "http")]
    fn do_post(
        &self,
        url: &str,
        request: &OutboundRequest,
        delivery: Delivery,
    ) -> Result<(), TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout_for(delivery))
            .gzip(true)
            .build()
            .map_err(|e: reqwest::Error| TransportError::network(e.to_string()))?;

        let mut req = client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(request.body.clone());
        if let Some(ref token) = request.client_token {
            req = req.bearer_auth(token);
        }
        if let Some(ref user_id) = request.user_id {
            req = req.header(USER_ID_HEADER, user_id);
        }

        let resp = req
            .send()
            .map_err(|e: reqwest::Error| TransportError::network(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HttpTransportConfig::default())
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &OutboundRequest, delivery: Delivery) -> Result<(), TransportError> {
        let url = self.resolve_url(&request.endpoint);
        tracing::debug!(
            url = %url,
            delivery = ?delivery,
            timeout_ms = self.config.timeout_for(delivery).as_millis() as u64,
            bytes = request.body.len(),
            "http: POST"
        );

        #[cfg(feature = "http")]
        {
            self.do_post(&url, request, delivery)
        }

        #[cfg(not(feature = "http"))]
        {
            Err(TransportError::network("http feature not enabled"))
        }
    }
}
