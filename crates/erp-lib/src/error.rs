use thiserror::Error;

/// Domain errors raised by the ERP pipeline.
///
/// File and parse failures travel as `anyhow` errors with context; these
/// variants cover policy decisions made on already-loaded data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErpError {
    /// `record` is the 1-based position of the trial in its table.
    #[error("trial {record} has finger id {finger_id}, expected 1..=5")]
    FingerOutOfRange { record: usize, finger_id: i64 },
}
