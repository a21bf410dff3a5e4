//! `claritycodec decode` / `decode-batch`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use claritycodec_address::to_repr;
use claritycodec_core::{parse_hex, ClarityValue, Decoder, ErrorMode};

pub enum Input {
    Hex(String),
    File(PathBuf),
}

pub fn run(input: Input, max_depth: usize, exact: bool, repr: bool) -> Result<()> {
    let bytes = match input {
        Input::Hex(hex) => parse_hex(hex.trim())?,
        Input::File(path) => std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
    };

    let decoder = Decoder::with_max_depth(max_depth);
    let value = if exact {
        decoder.decode_exact(&bytes)?
    } else {
        decoder.decode(&bytes)?
    };
    tracing::debug!(len = bytes.len(), type_name = value.type_name(), "decoded");

    print_value(&value, repr)
}

fn print_value(value: &ClarityValue, repr: bool) -> Result<()> {
    if repr {
        println!("{}", to_repr(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

pub fn run_batch(file: &Path, mode: ErrorMode) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let payloads: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let result = Decoder::new().decode_batch(&payloads, mode)?;
    let values: Vec<_> = result
        .values
        .iter()
        .map(|(index, value)| serde_json::json!({ "index": index, "value": value }))
        .collect();
    let errors: Vec<_> = result
        .errors
        .iter()
        .map(|(index, e)| serde_json::json!({ "index": index, "kind": e.kind(), "error": e.to_string() }))
        .collect();

    let out = serde_json::json!({
        "total": payloads.len(),
        "decoded": values.len(),
        "values": values,
        "errors": errors,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
