//! Shared value types: level sequences, labels, and label sets.

use crate::error::{LevelsError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An ordered sequence of classification levels.
///
/// Levels come in two shapes: scalar boundaries describing `N-1` contiguous
/// intervals, or explicit `(lo, hi)` interval pairs. The pair form is what
/// fill-plot attribute lists hand over; the scalar form is what scale
/// generation produces.
///
/// # Example
///
/// ```rust
/// use chart_levels::Levels;
///
/// let levels = Levels::Intervals(vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0)]);
/// assert_eq!(levels.contiguous_boundaries().unwrap(), vec![0.0, 2.0, 4.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Levels {
    /// Scalar boundaries shared between adjacent intervals
    Boundaries(Vec<f64>),
    /// Explicit `(lo, hi)` interval pairs
    Intervals(Vec<(f64, f64)>),
}

impl Levels {
    /// Number of boundary values (pairs contribute their shared edges).
    pub fn len(&self) -> usize {
        match self {
            Self::Boundaries(b) => b.len(),
            Self::Intervals(pairs) => {
                if pairs.is_empty() {
                    0
                } else {
                    pairs.len() + 1
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapse interval pairs to their shared scalar boundaries.
    ///
    /// Adjacent pairs must share an endpoint (`hi[i-1] == lo[i]`); anything
    /// else is [`LevelsError::InvalidIntervals`]. Scalar boundaries pass
    /// through unchanged.
    pub fn contiguous_boundaries(&self) -> Result<Vec<f64>> {
        match self {
            Self::Boundaries(b) => Ok(b.clone()),
            Self::Intervals(pairs) => {
                if pairs.is_empty() {
                    return Ok(Vec::new());
                }
                for (i, (prev, next)) in pairs.iter().tuple_windows().enumerate() {
                    if prev.1 != next.0 {
                        return Err(LevelsError::invalid_intervals(format!(
                            "intervals are not contiguous from {} to {} (pair {})",
                            prev.1,
                            next.0,
                            i + 1
                        )));
                    }
                }
                let mut boundaries: Vec<f64> = pairs.iter().map(|p| p.0).collect();
                boundaries.push(pairs[pairs.len() - 1].1);
                Ok(boundaries)
            }
        }
    }
}

impl From<Vec<f64>> for Levels {
    fn from(boundaries: Vec<f64>) -> Self {
        Self::Boundaries(boundaries)
    }
}

impl From<&[f64]> for Levels {
    fn from(boundaries: &[f64]) -> Self {
        Self::Boundaries(boundaries.to_vec())
    }
}

impl From<Vec<(f64, f64)>> for Levels {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self::Intervals(pairs)
    }
}

/// A level value paired with its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub value: f64,
    pub text: String,
}

/// An insertion-ordered mapping from level value to display string.
///
/// Values are unique by exact floating-point equality; inserting an existing
/// value replaces its text in place. This covers both output shapes callers
/// ask for: iterate for the ordered list, [`LabelSet::get`] for the mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSet {
    entries: Vec<Label>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the label for `value`.
    pub fn insert(&mut self, value: f64, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|l| l.value == value) {
            Some(existing) => existing.text = text,
            None => self.entries.push(Label { value, text }),
        }
    }

    /// Look up the label for an exact level value.
    pub fn get(&self, value: f64) -> Option<&str> {
        self.entries
            .iter()
            .find(|l| l.value == value)
            .map(|l| l.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.entries.iter()
    }

    /// The level values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|l| l.value)
    }

    /// The display strings, in insertion order (the "list" output shape).
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|l| l.text.as_str())
    }
}

impl IntoIterator for LabelSet {
    type Item = Label;
    type IntoIter = std::vec::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(f64, String)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (f64, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (value, text) in iter {
            set.insert(value, text);
        }
        set
    }
}
