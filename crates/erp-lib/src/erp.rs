use crate::{
    error::ErpError,
    io::{signal::read_signal, trials::read_trials},
    signal::{Finger, Signal, Trial, TrialSchema},
};
use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use std::path::Path;

/// Samples kept before movement onset.
pub const PRE_ONSET_SAMPLES: usize = 200;
/// Samples kept after movement onset.
pub const POST_ONSET_SAMPLES: usize = 1000;
/// Length of every extracted segment, onset included.
pub const SEGMENT_LEN: usize = PRE_ONSET_SAMPLES + POST_ONSET_SAMPLES + 1;
pub const FINGER_COUNT: usize = Finger::COUNT;

/// Relative time of each matrix column, -200..=1000.
pub fn time_axis() -> Vec<i32> {
    (-(PRE_ONSET_SAMPLES as i32)..=POST_ONSET_SAMPLES as i32).collect()
}

/// Return the window `[start - 200, start + 1000]` (inclusive) or `None`
/// when either bound falls outside the signal.
pub fn extract_segment(signal: &[f64], start: i64) -> Option<&[f64]> {
    let first = start.checked_sub(PRE_ONSET_SAMPLES as i64)?;
    let last = start.checked_add(POST_ONSET_SAMPLES as i64)?;
    if first < 0 || last >= signal.len() as i64 {
        return None;
    }
    let first = first as usize;
    Some(&signal[first..first + SEGMENT_LEN])
}

/// Per-finger averaged segments, always `FINGER_COUNT x SEGMENT_LEN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErpMatrix {
    rows: Vec<Vec<f64>>,
}

impl ErpMatrix {
    pub fn zeros() -> Self {
        Self {
            rows: vec![vec![0.0; SEGMENT_LEN]; FINGER_COUNT],
        }
    }

    pub fn row(&self, finger: Finger) -> &[f64] {
        &self.rows[finger.row()]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// `(rows, columns)`; constant for every matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), SEGMENT_LEN)
    }

    fn set_row(&mut self, finger: Finger, values: Vec<f64>) {
        debug_assert_eq!(values.len(), SEGMENT_LEN);
        self.rows[finger.row()] = values;
    }
}

impl Default for ErpMatrix {
    fn default() -> Self {
        Self::zeros()
    }
}

/// What to do with trials whose finger id is outside 1..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FingerPolicy {
    /// Leave them unmatched; they contribute to no average.
    #[default]
    Ignore,
    /// Fail on the first such trial.
    Reject,
}

/// Trial bookkeeping for one finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FingerStats {
    pub finger: Finger,
    /// Trials whose window fit inside the signal and entered the mean.
    pub accepted: usize,
    /// Trials dropped because the window crossed a signal boundary.
    pub excluded: usize,
}

/// ERP matrix plus the diagnostic counts the matrix alone does not carry.
#[derive(Debug, Clone, Serialize)]
pub struct ErpReport {
    pub matrix: ErpMatrix,
    pub fingers: Vec<FingerStats>,
    /// Trials naming no valid finger.
    pub unmatched: usize,
}

impl ErpReport {
    pub fn excluded_total(&self) -> usize {
        self.fingers.iter().map(|s| s.excluded).sum()
    }
}

/// Average every finger's in-range segments.
///
/// Trials are taken in table order. Out-of-range windows and unknown finger
/// ids are skipped without error; a finger with no segment keeps a zero row.
pub fn compute_erp(trials: &[Trial], signal: &Signal) -> ErpMatrix {
    average_by_finger(trials, signal).0
}

/// Like [`compute_erp`], also returning per-finger counts and applying
/// `policy` to unknown finger ids.
pub fn compute_erp_with_report(
    trials: &[Trial],
    signal: &Signal,
    policy: FingerPolicy,
) -> Result<ErpReport, ErpError> {
    let unmatched: Vec<(usize, &Trial)> = trials
        .iter()
        .enumerate()
        .filter(|(_, trial)| trial.finger().is_none())
        .collect();
    if policy == FingerPolicy::Reject {
        if let Some((idx, trial)) = unmatched.first() {
            return Err(ErpError::FingerOutOfRange {
                record: idx + 1,
                finger_id: trial.finger_id,
            });
        }
    }
    let (matrix, fingers) = average_by_finger(trials, signal);
    Ok(ErpReport {
        matrix,
        fingers,
        unmatched: unmatched.len(),
    })
}

fn average_by_finger(trials: &[Trial], signal: &Signal) -> (ErpMatrix, Vec<FingerStats>) {
    let mut matrix = ErpMatrix::zeros();
    let mut stats = Vec::with_capacity(FINGER_COUNT);
    for finger in Finger::ALL {
        let mut sum = vec![0.0; SEGMENT_LEN];
        let mut accepted = 0usize;
        let mut excluded = 0usize;
        for trial in trials.iter().filter(|t| t.finger() == Some(finger)) {
            match extract_segment(signal.as_slice(), trial.start) {
                Some(segment) => {
                    for (acc, value) in sum.iter_mut().zip(segment) {
                        *acc += value;
                    }
                    accepted += 1;
                }
                None => {
                    debug!(
                        "{}: onset {} leaves the signal (len {}), skipping",
                        finger,
                        trial.start,
                        signal.len()
                    );
                    excluded += 1;
                }
            }
        }
        if accepted > 0 {
            let n = accepted as f64;
            matrix.set_row(finger, sum.into_iter().map(|v| v / n).collect());
        }
        info!(
            "{}: averaged {} segment(s), excluded {}",
            finger, accepted, excluded
        );
        stats.push(FingerStats {
            finger,
            accepted,
            excluded,
        });
    }
    (matrix, stats)
}

/// Load the trial table and the signal, then average.
pub fn calc_mean_erp(trials_path: &Path, signal_path: &Path) -> Result<ErpMatrix> {
    let trials = read_trials(trials_path, &TrialSchema::default())?;
    let signal = read_signal(signal_path)?;
    Ok(compute_erp(&trials, &signal))
}
