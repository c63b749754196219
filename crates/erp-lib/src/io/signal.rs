use crate::signal::Signal;
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// Read a headerless single-column CSV of samples.
pub fn read_signal(path: &Path) -> Result<Signal> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open signal {}", path.display()))?;
    parse_signal(file).with_context(|| format!("loading {}", path.display()))
}

/// Parse signal samples from any reader, one value per line.
pub fn parse_signal<R: Read>(input: R) -> Result<Signal> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);
    let mut data = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading sample {}", idx + 1))?;
        if record.len() != 1 {
            return Err(anyhow!(
                "line {} has {} columns, signal must be a single column",
                idx + 1,
                record.len()
            ));
        }
        let cell = &record[0];
        let value: f64 = cell
            .parse()
            .with_context(|| format!("line {} is not f64: {}", idx + 1, cell))?;
        data.push(value);
    }
    if data.is_empty() {
        bail!("no signal samples found");
    }
    Ok(Signal::new(data))
}
