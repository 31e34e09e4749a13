mod config_error;
mod decode_error;
mod store_error;
mod transport_error;

pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use store_error::StoreError;
pub use transport_error::TransportError;

/// Top-level error for the pagelog collector.
///
/// None of these ever reach the host page: the collector logs them and
/// degrades to "telemetry lost".
#[derive(Debug, thiserror::Error)]
pub enum PageLogError {
    #[error("transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("decode error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
}

pub type PageLogResult<T> = Result<T, PageLogError>;
