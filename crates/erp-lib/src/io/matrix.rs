use crate::erp::{time_axis, ErpMatrix};
use crate::signal::Finger;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

/// Write the matrix column-wise: `time_ms` followed by one column per finger.
pub fn write_erp_csv(path: &Path, matrix: &ErpMatrix) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_erp(file, matrix).with_context(|| format!("writing {}", path.display()))
}

pub fn write_erp<W: Write>(out: W, matrix: &ErpMatrix) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(out);
    let mut header = vec!["time_ms".to_string()];
    header.extend(Finger::ALL.iter().map(|f| format!("finger_{}", f.number())));
    writer.write_record(&header)?;
    for (col, t) in time_axis().into_iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(t.to_string());
        row.extend(matrix.rows().iter().map(|r| r[col].to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erp::{compute_erp, SEGMENT_LEN};
    use crate::signal::{Signal, Trial};

    #[test]
    fn writes_time_column_and_one_column_per_finger() {
        let signal = Signal::new((0..1401).map(|i| i as f64).collect());
        let matrix = compute_erp(
            &[Trial {
                start: 300,
                peak: 350,
                finger_id: 3,
            }],
            &signal,
        );
        let mut buf = Vec::new();
        write_erp(&mut buf, &matrix).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SEGMENT_LEN + 1);
        assert_eq!(lines[0], "time_ms,finger_1,finger_2,finger_3,finger_4,finger_5");
        assert_eq!(lines[1], "-200,0,0,100,0,0");
        assert_eq!(lines[SEGMENT_LEN], "1000,0,0,1300,0,0");
    }
}
