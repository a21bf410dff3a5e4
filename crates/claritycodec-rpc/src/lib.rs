//! # claritycodec-rpc
//!
//! Client for the Stacks node read-only call endpoint
//! (`POST /v2/contracts/call-read/{address}/{contract}/{function}`).
//!
//! Arguments are serialized with the Clarity encoder and results come back
//! through the decoder, so callers work with [`ClarityValue`]s only.
//!
//! ```no_run
//! use claritycodec_core::ClarityValue;
//! use claritycodec_rpc::{ApiConfig, CallReadRequest, HttpReadOnlyClient, ReadOnlyTransport};
//!
//! # async fn run() -> Result<(), claritycodec_rpc::ClientError> {
//! let client = HttpReadOnlyClient::new(&ApiConfig::default().with_env_overrides())?;
//! let req = CallReadRequest::new(
//!     "SP000000000000000000002Q6VF78.pox-4".parse()?,
//!     "get-reward-set-size",
//!     "SP000000000000000000002Q6VF78",
//! )
//! .arg(ClarityValue::UInt(90));
//! let size = client.call_read_value(&req).await?;
//! println!("{size:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod policy;
pub mod request;
pub mod transport;

pub use client::HttpReadOnlyClient;
pub use config::{ApiConfig, RetrySettings, DEFAULT_API_URL};
pub use error::ClientError;
pub use policy::{RateLimiter, RateLimiterConfig, RetryConfig, RetryPolicy};
pub use request::{CallReadBody, CallReadRequest, CallReadResponse, ContractId};
pub use transport::ReadOnlyTransport;
