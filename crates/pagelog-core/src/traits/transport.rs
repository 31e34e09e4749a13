use crate::errors::TransportError;

/// Whether a send may be cut short by page teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// Regular flush; the page is expected to stay around.
    #[default]
    Deferred,
    /// Final flush during unload. The transport must let the request
    /// outlive the page (keepalive / beacon semantics).
    Beacon,
}

/// A serialized request ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Target endpoint.
    pub endpoint: String,
    /// JSON body.
    pub body: String,
    /// Bearer credential, if configured.
    pub client_token: Option<String>,
    /// Opaque user id forwarded with every request, in any dispatch mode.
    pub user_id: Option<String>,
}

/// Non-blocking POST of a JSON body. The only component that touches the network.
pub trait Transport {
    fn send(&self, request: &OutboundRequest, delivery: Delivery) -> Result<(), TransportError>;
}
