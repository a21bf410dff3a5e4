//! The `ReadOnlyTransport` trait, the seam between callers and HTTP.

use async_trait::async_trait;
use claritycodec_core::ClarityValue;

use crate::error::ClientError;
use crate::request::{CallReadRequest, CallReadResponse};

/// Anything that can evaluate a read-only contract function.
///
/// Implementations must be `Send + Sync` for use across Tokio tasks; the
/// trait is object-safe and can be stored as `Arc<dyn ReadOnlyTransport>`.
#[async_trait]
pub trait ReadOnlyTransport: Send + Sync {
    /// Send one call and return the node's raw response.
    async fn call_read(&self, req: &CallReadRequest) -> Result<CallReadResponse, ClientError>;

    /// Endpoint identifier (base URL or name) for logs.
    fn url(&self) -> &str;

    /// Convenience: call and decode the result value.
    async fn call_read_value(&self, req: &CallReadRequest) -> Result<ClarityValue, ClientError> {
        self.call_read(req).await?.into_value()
    }
}
