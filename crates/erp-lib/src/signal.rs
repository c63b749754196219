use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-channel ECOG recording, indexed by sample position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Samples
    pub data: Vec<f64>,
}

impl Signal {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl From<Vec<f64>> for Signal {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

/// Finger number, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Finger(u8);

impl Finger {
    pub const COUNT: usize = 5;

    /// Every finger in ascending order (thumb first).
    pub const ALL: [Finger; Finger::COUNT] = [Finger(1), Finger(2), Finger(3), Finger(4), Finger(5)];

    pub fn from_id(id: i64) -> Option<Self> {
        if (1..=Self::COUNT as i64).contains(&id) {
            Some(Finger(id as u8))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based row in an ERP matrix.
    pub fn row(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<i64> for Finger {
    type Error = String;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Finger::from_id(id).ok_or_else(|| format!("finger id {} is outside 1..=5", id))
    }
}

impl From<Finger> for i64 {
    fn from(finger: Finger) -> Self {
        finger.0 as i64
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Finger {}", self.0)
    }
}

/// One movement event from the trial table.
///
/// The finger id is kept raw so rows naming no valid finger still load; they
/// simply match no finger during averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Movement onset sample index
    pub start: i64,
    /// Movement peak sample index (loaded, not used for averaging)
    pub peak: i64,
    pub finger_id: i64,
}

impl Trial {
    pub fn finger(&self) -> Option<Finger> {
        Finger::from_id(self.finger_id)
    }
}

/// Column positions of the trial table.
///
/// The table carries no meaningful header names, so columns are addressed
/// by position. The default is `start, peak, finger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSchema {
    pub start_col: usize,
    pub peak_col: usize,
    pub finger_col: usize,
}

impl Default for TrialSchema {
    fn default() -> Self {
        Self {
            start_col: 0,
            peak_col: 1,
            finger_col: 2,
        }
    }
}

impl TrialSchema {
    /// Minimum number of fields a record must carry.
    pub fn min_columns(&self) -> usize {
        self.start_col.max(self.peak_col).max(self.finger_col) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_ids_outside_range_are_rejected() {
        assert!(Finger::from_id(0).is_none());
        assert!(Finger::from_id(6).is_none());
        assert!(Finger::from_id(-3).is_none());
        assert_eq!(Finger::from_id(3).map(Finger::row), Some(2));
    }

    #[test]
    fn fingers_iterate_in_ascending_order() {
        let numbers: Vec<u8> = Finger::ALL.iter().map(|f| f.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(Finger::ALL[4].to_string(), "Finger 5");
    }

    #[test]
    fn schema_min_columns_covers_highest_position() {
        assert_eq!(TrialSchema::default().min_columns(), 3);
        let schema = TrialSchema {
            start_col: 4,
            peak_col: 0,
            finger_col: 1,
        };
        assert_eq!(schema.min_columns(), 5);
    }
}
