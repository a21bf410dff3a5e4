//! `claritycodec stackers`: export the PoX reward set as CSV.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use claritycodec_observability::init_tracing;
use claritycodec_pox::{CsvSink, HarvestConfig, Harvester, PoxReader, RecordSink};
use claritycodec_rpc::HttpReadOnlyClient;

/// Command-line values that win over the config file and environment.
pub struct Overrides {
    pub cycles: Vec<u64>,
    pub output: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<HarvestConfig> {
    let config = match path {
        Some(path) => HarvestConfig::from_file(path)?,
        None => HarvestConfig::default(),
    };
    let mut config = config.with_env_overrides();

    if !overrides.cycles.is_empty() {
        config.cycles = overrides.cycles;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    if let Some(url) = overrides.api_url {
        config.api.base_url = url;
    }
    if let Some(key) = overrides.api_key {
        config.api.api_key = Some(key);
    }

    config.validate()?;
    Ok(config)
}

pub async fn run(config_path: Option<&Path>, overrides: Overrides, verbose: bool) -> Result<()> {
    let mut config = load_config(config_path, overrides)?;
    if verbose {
        config.log.level = "debug".into();
    }
    init_tracing(&config.log).context("failed to initialise logging")?;

    let client = HttpReadOnlyClient::new(&config.api)?;
    let reader = PoxReader::new(client, config.contract_id()?, config.sender.clone());
    info!(
        contract = %reader.contract(),
        cycles = ?config.cycles,
        api = %config.api.base_url,
        "starting reward set export"
    );

    let report = Harvester::new(reader).run(&config.cycles).await;

    if report.records.is_empty() {
        info!("no stacker data found, nothing written");
        println!("No stacker data found.");
        return Ok(());
    }

    let mut sink = CsvSink::create(&config.output)
        .with_context(|| format!("failed to create {}", config.output.display()))?;
    let written = sink.write_all(&report.records)?;
    info!(written, output = %config.output.display(), "CSV file written");
    println!(
        "Wrote {written} records to {} ({} skipped)",
        config.output.display(),
        report.skipped()
    );
    Ok(())
}
