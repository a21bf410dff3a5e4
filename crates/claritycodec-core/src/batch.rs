//! Parallel decoding of many independent payloads.
//!
//! Each payload gets its own cursor, so items decode on Rayon workers with no
//! coordination. The [`ErrorMode`] decides what a single bad payload does to
//! the rest of the batch.

use rayon::prelude::*;
use tracing::warn;

use crate::decoder::Decoder;
use crate::error::{BatchDecodeError, DecodeError};
use crate::value::ClarityValue;

/// Controls how the batch reacts to individual decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log and drop payloads that fail to decode.
    #[default]
    Skip,
    /// Collect decode errors alongside successes.
    Collect,
    /// Abort the batch on the first failure (lowest index wins).
    Throw,
}

/// Output of a batch decode, in input order.
#[derive(Debug, Default)]
pub struct BatchDecodeResult {
    /// `(input_index, value)` for every payload that decoded.
    pub values: Vec<(usize, ClarityValue)>,
    /// Populated only when `ErrorMode::Collect` is used.
    pub errors: Vec<(usize, DecodeError)>,
}

impl Decoder {
    /// Decode every hex payload in parallel.
    pub fn decode_batch<S>(
        &self,
        payloads: &[S],
        mode: ErrorMode,
    ) -> Result<BatchDecodeResult, BatchDecodeError>
    where
        S: AsRef<str> + Sync,
    {
        let outcomes: Vec<Result<ClarityValue, DecodeError>> = payloads
            .par_iter()
            .map(|p| self.decode_hex(p.as_ref()))
            .collect();

        let mut result = BatchDecodeResult {
            values: Vec::with_capacity(outcomes.len()),
            errors: Vec::new(),
        };

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(value) => result.values.push((index, value)),
                Err(source) => match mode {
                    ErrorMode::Skip => {
                        warn!(index, kind = source.kind(), error = %source, "skipping undecodable payload");
                    }
                    ErrorMode::Collect => result.errors.push((index, source)),
                    ErrorMode::Throw => return Err(BatchDecodeError::ItemFailed { index, source }),
                },
            }
        }

        Ok(result)
    }
}

/// Batch decode with default decoder options.
pub fn decode_batch<S>(payloads: &[S], mode: ErrorMode) -> Result<BatchDecodeResult, BatchDecodeError>
where
    S: AsRef<str> + Sync,
{
    Decoder::new().decode_batch(payloads, mode)
}
