use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest integer a JSON consumer can represent exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Two integer columns of equal length.
///
/// The parser only ever produces valid lists, but the fields are public so the
/// lists can also arrive straight off the wire; [`ParsedLists::validate`] is
/// what the engine relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLists {
    pub list1: Vec<i64>,
    pub list2: Vec<i64>,
}

impl ParsedLists {
    pub fn new(list1: Vec<i64>, list2: Vec<i64>) -> Self {
        Self { list1, list2 }
    }

    pub fn len(&self) -> usize {
        self.list1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list1.is_empty() && self.list2.is_empty()
    }

    /// Length mismatch wins over emptiness, so `([], [1])` is a mismatch.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.list1.len() != self.list2.len() {
            return Err(ValidationError::LengthMismatch {
                list1: self.list1.len(),
                list2: self.list2.len(),
            });
        }
        if self.list1.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if let Some(value) = self
            .list1
            .iter()
            .chain(self.list2.iter())
            .find(|value| !is_safe_integer(**value))
        {
            return Err(ValidationError::InvalidFormat(format!(
                "{value} is outside the safe integer range"
            )));
        }
        Ok(())
    }
}

impl Extend<(i64, i64)> for ParsedLists {
    fn extend<T: IntoIterator<Item = (i64, i64)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let len = iter.size_hint().0;

        self.list1.reserve(len);
        self.list2.reserve(len);

        iter.for_each(|(left, right)| {
            self.list1.push(left);
            self.list2.push(right);
        });
    }
}

pub fn is_safe_integer(value: i64) -> bool {
    (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
}

/// One index of the sorted pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistancePair {
    /// 0-based index into the sorted lists, not the input line.
    pub position: usize,
    #[serde(rename = "list1Value")]
    pub value1: i64,
    #[serde(rename = "list2Value")]
    pub value2: i64,
    pub distance: u64,
}

impl DistancePair {
    pub fn new(position: usize, value1: i64, value2: i64) -> Self {
        Self {
            position,
            value1,
            value2,
            distance: value1.abs_diff(value2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub original_list1_length: usize,
    pub original_list2_length: usize,
    pub processing_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_distance: u64,
    pub pairs: Vec<DistancePair>,
    pub metadata: Metadata,
}
