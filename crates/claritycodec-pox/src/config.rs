//! Harvester configuration.
//!
//! Loaded from a JSON file where every field is optional, then overlaid
//! with `STACKS_API_URL` / `STACKS_API_KEY` from the environment. Command
//! line flags are applied last by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use claritycodec_address::c32_address_decode;
use claritycodec_observability::LogConfig;
use claritycodec_rpc::{ApiConfig, ClientError, ContractId};

use crate::error::PoxError;

pub const DEFAULT_POX_CONTRACT: &str = "SP000000000000000000002Q6VF78.pox-4";
pub const DEFAULT_SENDER: &str = "SP3TRVBX53CN78AS8C3HNTM3GPNDHGA34F9M7MAH2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub api: ApiConfig,
    /// `ADDRESS.contract-name` of the PoX contract.
    #[serde(default = "default_contract")]
    pub contract: String,
    /// Principal the read-only calls are made as.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Reward cycles to harvest, in order.
    #[serde(default = "default_cycles")]
    pub cycles: Vec<u64>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_contract() -> String { DEFAULT_POX_CONTRACT.to_string() }
fn default_sender() -> String { DEFAULT_SENDER.to_string() }
fn default_cycles() -> Vec<u64> { vec![90, 91, 92, 93, 94] }
fn default_output() -> PathBuf { PathBuf::from("stackers.csv") }

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            contract: default_contract(),
            sender: default_sender(),
            cycles: default_cycles(),
            output: default_output(),
            log: LogConfig::default(),
        }
    }
}

impl HarvestConfig {
    pub fn from_json(text: &str) -> Result<Self, PoxError> {
        serde_json::from_str(text).map_err(|e| PoxError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PoxError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PoxError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn with_env_overrides(mut self) -> Self {
        self.api = self.api.with_env_overrides();
        self
    }

    pub fn contract_id(&self) -> Result<ContractId, PoxError> {
        self.contract
            .parse()
            .map_err(|e: ClientError| PoxError::Config(format!("contract {:?}: {e}", self.contract)))
    }

    /// Check the contract id, the sender address and the cycle list.
    pub fn validate(&self) -> Result<(), PoxError> {
        self.contract_id()?;
        c32_address_decode(&self.sender)
            .map_err(|e| PoxError::Config(format!("sender {:?}: {e}", self.sender)))?;
        if self.cycles.is_empty() {
            return Err(PoxError::Config("no cycles to harvest".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = HarvestConfig::from_json("{}").unwrap();
        assert_eq!(cfg, HarvestConfig::default());
        assert_eq!(cfg.cycles, vec![90, 91, 92, 93, 94]);
        assert_eq!(cfg.output, PathBuf::from("stackers.csv"));
        cfg.validate().unwrap();
        assert_eq!(cfg.contract_id().unwrap().name, "pox-4");
    }

    #[test]
    fn nested_sections() {
        let cfg = HarvestConfig::from_json(
            r#"{"api":{"base_url":"http://localhost:3999","requests_per_second":0},
                "cycles":[100],"log":{"level":"debug"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:3999");
        assert!(cfg.api.rate_limiter_config().is_none());
        assert_eq!(cfg.cycles, vec![100]);
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.sender, DEFAULT_SENDER);
    }

    #[test]
    fn validation_failures() {
        let bad_sender = HarvestConfig {
            sender: "SPNOTANADDRESS".into(),
            ..HarvestConfig::default()
        };
        assert!(matches!(bad_sender.validate(), Err(PoxError::Config(_))));

        let no_cycles = HarvestConfig {
            cycles: vec![],
            ..HarvestConfig::default()
        };
        assert!(matches!(no_cycles.validate(), Err(PoxError::Config(_))));

        let bad_contract = HarvestConfig {
            contract: "pox-4".into(),
            ..HarvestConfig::default()
        };
        match bad_contract.validate() {
            Err(PoxError::Config(msg)) => assert!(msg.starts_with("contract \"pox-4\""), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(HarvestConfig::from_json("{"), Err(PoxError::Config(_))));
    }
}
