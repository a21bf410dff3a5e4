//! # claritycodec-pox
//!
//! Harvests the PoX reward set of the `pox-4` contract: for each reward
//! cycle it reads the set size, then every slot, projects each slot's tuple
//! into a flat [`StackerRecord`] and exports the records as CSV.
//!
//! Reads go through any [`ReadOnlyTransport`](claritycodec_rpc::ReadOnlyTransport),
//! so the harvester runs unchanged against a mock in tests.

pub mod config;
pub mod error;
pub mod harvest;
pub mod reader;
pub mod record;
pub mod sink;

pub use config::{HarvestConfig, DEFAULT_POX_CONTRACT, DEFAULT_SENDER};
pub use error::{PoxError, SinkError};
pub use harvest::{CycleSummary, HarvestReport, Harvester};
pub use reader::{PoxReader, FN_REWARD_SET_POX_ADDRESS, FN_REWARD_SET_SIZE};
pub use record::{StackerRecord, CSV_COLUMNS};
pub use sink::{CsvSink, RecordSink};
