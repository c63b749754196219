use crate::signal::{Trial, TrialSchema};
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Read a comma-separated trial table. The first line is a header and is
/// skipped; every remaining cell must be an integer.
pub fn read_trials(path: &Path, schema: &TrialSchema) -> Result<Vec<Trial>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open trial table {}", path.display()))?;
    parse_trials(file, schema).with_context(|| format!("loading {}", path.display()))
}

/// Parse a trial table from any reader.
pub fn parse_trials<R: Read>(input: R, schema: &TrialSchema) -> Result<Vec<Trial>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    let mut trials = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading trial {}", idx + 1))?;
        trials.push(trial_from_record(&record, idx + 1, schema)?);
    }
    Ok(trials)
}

fn trial_from_record(record: &StringRecord, number: usize, schema: &TrialSchema) -> Result<Trial> {
    if record.len() < schema.min_columns() {
        return Err(anyhow!(
            "trial {} has {} column(s), expected at least {}",
            number,
            record.len(),
            schema.min_columns()
        ));
    }
    let values = record
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            cell.parse::<i64>().with_context(|| {
                format!("trial {} column {} is not an integer: {:?}", number, col, cell)
            })
        })
        .collect::<Result<Vec<i64>>>()?;
    Ok(Trial {
        start: values[schema.start_col],
        peak: values[schema.peak_col],
        finger_id: values[schema.finger_col],
    })
}
