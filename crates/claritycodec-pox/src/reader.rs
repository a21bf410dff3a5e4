//! Typed wrappers over the pox-4 read-only functions.

use claritycodec_core::ClarityValue;
use claritycodec_rpc::{CallReadRequest, ContractId, ReadOnlyTransport};

use crate::error::PoxError;
use crate::record::StackerRecord;

pub const FN_REWARD_SET_SIZE: &str = "get-reward-set-size";
pub const FN_REWARD_SET_POX_ADDRESS: &str = "get-reward-set-pox-address";

/// Reads reward-set data for one PoX contract through any transport.
pub struct PoxReader<T> {
    transport: T,
    contract: ContractId,
    sender: String,
}

impl<T: ReadOnlyTransport> PoxReader<T> {
    pub fn new(transport: T, contract: ContractId, sender: impl Into<String>) -> Self {
        Self {
            transport,
            contract,
            sender: sender.into(),
        }
    }

    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, function: &str) -> CallReadRequest {
        CallReadRequest::new(self.contract.clone(), function, self.sender.clone())
    }

    /// Number of reward-set slots for `cycle`.
    pub async fn reward_set_size(&self, cycle: u64) -> Result<u128, PoxError> {
        let req = self
            .request(FN_REWARD_SET_SIZE)
            .arg(ClarityValue::UInt(cycle.into()));
        let value = self.transport.call_read_value(&req).await?;
        tracing::debug!(cycle, result = ?value, "reward set size");

        let inner = match value.as_response() {
            Some(Ok(ok)) => ok,
            Some(Err(_)) => {
                return Err(PoxError::shape(FN_REWARD_SET_SIZE, "uint", value.type_name()))
            }
            None => &value,
        };
        inner
            .as_u128()
            .ok_or_else(|| PoxError::shape(FN_REWARD_SET_SIZE, "uint", inner.type_name()))
    }

    /// Entry `index` of the reward set for `cycle`; `None` when the slot is empty.
    pub async fn reward_set_entry(
        &self,
        cycle: u64,
        index: u64,
    ) -> Result<Option<StackerRecord>, PoxError> {
        let req = self
            .request(FN_REWARD_SET_POX_ADDRESS)
            .arg(ClarityValue::UInt(cycle.into()))
            .arg(ClarityValue::UInt(index.into()));
        let value = self.transport.call_read_value(&req).await?;

        match value.as_optional() {
            Some(None) => Ok(None),
            Some(Some(inner)) => {
                let tuple = inner.as_tuple().ok_or_else(|| {
                    PoxError::shape(FN_REWARD_SET_POX_ADDRESS, "optional tuple", inner.type_name())
                })?;
                let record = StackerRecord::from_tuple(cycle, index, tuple)?;
                tracing::debug!(cycle, index, ?record, "parsed stacker entry");
                Ok(Some(record))
            }
            None => Err(PoxError::shape(
                FN_REWARD_SET_POX_ADDRESS,
                "optional tuple",
                value.type_name(),
            )),
        }
    }
}
