//! # claritycodec-observability
//!
//! Logging initialisation for the claritycodec binaries.
//!
//! Libraries in this workspace only emit `tracing` events; the binary calls
//! [`init_tracing`] once at startup to decide where they go. Levels are
//! configurable per component and `RUST_LOG` wins over the config file.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig, LogInitError};
