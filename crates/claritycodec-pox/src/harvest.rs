//! Walks the reward sets of several cycles and collects stacker records.

use claritycodec_rpc::ReadOnlyTransport;
use serde::Serialize;
use tracing::{info, warn};

use crate::reader::PoxReader;
use crate::record::StackerRecord;

/// Per-cycle outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub cycle: u64,
    /// `None` when the size call failed and the cycle was skipped.
    pub reward_set_size: Option<u64>,
    pub harvested: usize,
    /// Indices that failed or came back empty.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub records: Vec<StackerRecord>,
    pub cycles: Vec<CycleSummary>,
}

impl HarvestReport {
    pub fn skipped(&self) -> usize {
        self.cycles.iter().map(|c| c.skipped).sum()
    }
}

pub struct Harvester<T> {
    reader: PoxReader<T>,
}

impl<T: ReadOnlyTransport> Harvester<T> {
    pub fn new(reader: PoxReader<T>) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &PoxReader<T> {
        &self.reader
    }

    /// Harvest every cycle in order. Failures never abort the run: a failed
    /// size call skips its cycle, a failed entry skips its index.
    pub async fn run(&self, cycles: &[u64]) -> HarvestReport {
        let mut report = HarvestReport::default();
        for &cycle in cycles {
            let summary = self.run_cycle(cycle, &mut report.records).await;
            report.cycles.push(summary);
        }
        info!(
            cycles = cycles.len(),
            records = report.records.len(),
            skipped = report.skipped(),
            contract = %self.reader.contract(),
            "harvest finished"
        );
        report
    }

    async fn run_cycle(&self, cycle: u64, records: &mut Vec<StackerRecord>) -> CycleSummary {
        let mut summary = CycleSummary {
            cycle,
            ..CycleSummary::default()
        };
        info!(cycle, "processing cycle");

        let size = match self.reader.reward_set_size(cycle).await {
            Ok(size) => size,
            Err(e) => {
                warn!(cycle, error = %e, "could not read reward set size, skipping cycle");
                return summary;
            }
        };
        let Ok(size) = u64::try_from(size) else {
            warn!(cycle, size = %size, "reward set size out of range, skipping cycle");
            return summary;
        };
        summary.reward_set_size = Some(size);

        for index in 0..size {
            match self.reader.reward_set_entry(cycle, index).await {
                Ok(Some(record)) => {
                    records.push(record);
                    summary.harvested += 1;
                }
                Ok(None) => {
                    warn!(cycle, index, "empty reward set slot, skipping");
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!(cycle, index, error = %e, "failed to read stacker entry, skipping");
                    summary.skipped += 1;
                }
            }
        }

        info!(
            cycle,
            size,
            harvested = summary.harvested,
            skipped = summary.skipped,
            "cycle done"
        );
        summary
    }
}
