//! Spreading a palette of colors across level intervals.
//!
//! Given `N+1` boundaries there are `N` intervals to fill. The palette is
//! stretched or compressed so the first and last intervals always land on
//! the first and last palette entries. When the levels cross zero the
//! palette can instead be split into a negative half and a positive half,
//! with a dedicated color for the one interval that straddles zero.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::trace;

use crate::error::{LevelsError, Result};
use crate::range::MISSING_MAGNITUDE;
use crate::types::Levels;

/// Whether to split the palette into negative and positive halves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Never split
    #[strum(to_string = "off", serialize = "no")]
    Off,
    /// Split when the levels go from negative to positive
    #[default]
    #[strum(to_string = "auto")]
    Auto,
    /// Split even when all levels share a sign
    #[strum(to_string = "always", serialize = "force")]
    Always,
}

/// The default palette: the 224-entry contiguous color-index range `16..240`.
pub fn default_palette() -> Vec<u16> {
    (16..240).collect()
}

/// Default color for the interval that straddles zero when splitting.
pub const DEFAULT_SPLIT_COLOR: u16 = 240;

/// Assign one palette color per level interval.
///
/// The palette is an opaque ordered sequence; entries are cloned into the
/// output, one per interval (`boundary count - 1`). See [`SplitMode`] for
/// the split behavior; `split_color` fills the interval that straddles zero
/// when a split is in effect.
///
/// Open-ended levels: a first/last boundary at the unset magnitude adjacent
/// to a boundary of the opposite sign is treated as extending to infinity —
/// it participates normally in the spread, except that an open-ended first
/// interval never receives the split color.
///
/// # Example
///
/// ```rust
/// use chart_levels::{default_palette, spread_colors, Levels, SplitMode};
///
/// let levels = Levels::Boundaries(vec![0.0, 5.0, 10.0]);
/// let colors = spread_colors(&levels, &default_palette(), SplitMode::Auto, 240)?;
/// assert_eq!(colors, vec![16, 239]);
/// # Ok::<(), chart_levels::LevelsError>(())
/// ```
pub fn spread_colors<C>(
    levels: &Levels,
    palette: &[C],
    split: SplitMode,
    split_color: C,
) -> Result<Vec<C>>
where
    C: Clone + PartialEq,
{
    if palette.is_empty() {
        return Err(LevelsError::EmptyPalette);
    }
    let levs = linearized(levels)?;
    if levs.is_empty() {
        return Ok(Vec::new());
    }
    if levs.len() == 1 {
        return Ok(vec![palette[0].clone()]);
    }

    // Open-ended extension boundaries stand in for infinity; use the
    // neighboring finite boundary when judging the covered range.
    let mut low = levs[0];
    let mut high = levs[levs.len() - 1];
    if low <= -MISSING_MAGNITUDE && levs[1] > 0.0 {
        low = levs[1];
    }
    if high >= MISSING_MAGNITUDE && levs[levs.len() - 2] < 0.0 {
        high = levs[levs.len() - 2];
    }

    let separate = match split {
        SplitMode::Off => false,
        SplitMode::Auto => low * high < 0.0,
        SplitMode::Always => true,
    };

    let interval_count = levs.len() - 1;
    if interval_count == 1 {
        if split != SplitMode::Off && levs[0] * levs[1] <= 0.0 {
            return Ok(vec![split_color]);
        }
        return Ok(vec![palette[0].clone()]);
    }

    let ncols = palette.len();
    // Count the intervals on each side of zero; an interval straddling zero
    // exactly (no boundary at 0) consumes the split color instead.
    let mut negatives = levs[..interval_count].iter().filter(|v| **v < 0.0).count();
    let zero_boundary = levs[..interval_count].iter().any(|v| *v == 0.0);
    let positives = interval_count - negatives;
    if low * high < 0.0 && !zero_boundary {
        negatives -= 1;
    }
    trace!(
        interval_count,
        negatives,
        positives,
        separate,
        "spreading palette over intervals"
    );

    let full_inc = (ncols - 1) as f64 / (interval_count - 1) as f64;
    let negative_inc = if negatives > 1 {
        (ncols as f64 / 2.0 - 1.0) / (negatives - 1) as f64
    } else {
        0.0
    };
    let positive_inc = if positives > 1 {
        (ncols as f64 / 2.0 - 1.0) / (positives - 1) as f64
    } else {
        0.0
    };
    let pick = |position: f64| -> C {
        let index = (position.round() as i64).clamp(0, ncols as i64 - 1) as usize;
        palette[index].clone()
    };

    let mut colors = Vec::with_capacity(interval_count);
    if !separate {
        for i in 0..interval_count {
            colors.push(pick(i as f64 * full_inc));
        }
    } else {
        let mut split_seen = 0usize;
        for i in 0..interval_count {
            if levs[i] < 0.0 {
                if levs[i] * levs[i + 1] < 0.0 {
                    colors.push(split_color.clone());
                    split_seen = 1;
                } else if negatives == 1 {
                    // a solitary negative interval sits in the middle of its half
                    colors.push(pick(ncols as f64 / 4.0));
                } else {
                    colors.push(pick(i as f64 * negative_inc));
                }
            } else if positives == 1 {
                // likewise a solitary positive interval
                colors.push(pick(3.0 * ncols as f64 / 4.0));
            } else {
                let offset = i as f64 - negatives as f64 - split_seen as f64;
                colors.push(pick(ncols as f64 / 2.0 + offset * positive_inc));
            }
        }
    }

    // An open-ended extension arrow must never render as the split color
    if colors[0] == split_color && levs[0] <= -MISSING_MAGNITUDE {
        colors[0] = palette[0].clone();
    }
    Ok(colors)
}

/// Linearize interval pairs into scalar boundaries for coloring.
///
/// Two adjacent intervals whose gap straddles zero merge into a single zero
/// boundary; any other gap is an error.
fn linearized(levels: &Levels) -> Result<Vec<f64>> {
    match levels {
        Levels::Boundaries(b) => Ok(b.clone()),
        Levels::Intervals(pairs) => {
            if pairs.is_empty() {
                return Ok(Vec::new());
            }
            let mut boundaries = Vec::with_capacity(pairs.len() + 1);
            boundaries.push(pairs[0].0);
            for (i, (lo, hi)) in pairs.iter().enumerate() {
                if i > 0 {
                    let previous_high = pairs[i - 1].1;
                    if previous_high * lo < 0.0 {
                        // the gap crosses zero, collapse it onto a zero boundary
                        *boundaries.last_mut().expect("non-empty") = 0.0;
                    } else if previous_high != *lo {
                        return Err(LevelsError::invalid_intervals(format!(
                            "intervals are not contiguous from {previous_high} to {lo} (pair {i})"
                        )));
                    }
                }
                boundaries.push(*hi);
            }
            Ok(boundaries)
        }
    }
}
