//! Read-only call wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use claritycodec_address::c32_address_decode;
use claritycodec_core::{decode_hex, ClarityValue};

use crate::error::ClientError;

/// A deployed contract, `ADDRESS.contract-name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractId {
    pub address: String,
    pub name: String,
}

impl FromStr for ContractId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ClientError::InvalidContractId {
            id: s.to_string(),
            reason,
        };
        let (address, name) = s
            .split_once('.')
            .ok_or_else(|| invalid("expected ADDRESS.name".into()))?;
        if name.is_empty() {
            return Err(invalid("empty contract name".into()));
        }
        c32_address_decode(address).map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            address: address.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

/// One read-only function call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallReadRequest {
    pub contract: ContractId,
    pub function: String,
    pub sender: String,
    pub arguments: Vec<ClarityValue>,
}

impl CallReadRequest {
    pub fn new(contract: ContractId, function: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            contract,
            function: function.into(),
            sender: sender.into(),
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, value: ClarityValue) -> Self {
        self.arguments.push(value);
        self
    }

    /// Path below the API base URL.
    pub fn path(&self) -> String {
        format!(
            "/v2/contracts/call-read/{}/{}/{}",
            self.contract.address, self.contract.name, self.function
        )
    }

    /// JSON body with hex-encoded arguments.
    pub fn body(&self) -> Result<CallReadBody, ClientError> {
        let arguments = self
            .arguments
            .iter()
            .map(ClarityValue::to_hex)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CallReadBody {
            sender: self.sender.clone(),
            arguments,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallReadBody {
    pub sender: String,
    pub arguments: Vec<String>,
}

/// Node response to a read-only call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallReadResponse {
    pub okay: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl CallReadResponse {
    pub fn ok(result_hex: impl Into<String>) -> Self {
        Self {
            okay: true,
            result: Some(result_hex.into()),
            cause: None,
        }
    }

    /// Decode `result`, or surface `cause` when the call failed.
    pub fn into_value(self) -> Result<ClarityValue, ClientError> {
        if !self.okay {
            return Err(ClientError::CallFailed {
                cause: self.cause.unwrap_or_else(|| "unknown".into()),
            });
        }
        let hex = self.result.ok_or(ClientError::MissingResult)?;
        Ok(decode_hex(&hex)?)
    }
}
