//! Display-string generation for level values.
//!
//! A set of levels is formatted together so every string carries the same
//! precision and notation, which keeps legend columns aligned. Notation is
//! picked per set: plain integers when the values are whole, fixed-point
//! when a shared fractional precision fits, scientific when the magnitudes
//! leave the comfortable range. Sets spanning more than six orders of
//! magnitude give up on a shared precision and format each value on its own.

use tracing::trace;

use crate::error::Result;
use crate::range::{MISSING_MAGNITUDE, UNSET};
use crate::types::{LabelSet, Levels};

/// Round-trip tolerance when scanning for the shared fractional precision.
const PRECISION_TOLERANCE: f64 = 1e-6;

/// Magnitude spread (in orders of magnitude) beyond which values are
/// formatted independently instead of with one shared precision.
const MAX_SHARED_SPREAD: i64 = 6;

/// Format every level value into a display string.
///
/// Interval pairs are first collapsed to their shared boundaries (they must
/// be mutually contiguous). The result keeps input order; duplicate values
/// collapse to a single entry.
///
/// # Example
///
/// ```rust
/// use chart_levels::{format_labels, Levels};
///
/// let labels = format_labels(&Levels::Boundaries(vec![0.00002, 0.00005]))?;
/// assert_eq!(labels.get(0.00002), Some("2E-5"));
/// assert_eq!(labels.get(0.00005), Some("5E-5"));
/// # Ok::<(), chart_levels::LevelsError>(())
/// ```
pub fn format_labels(levels: &Levels) -> Result<LabelSet> {
    let values = levels.contiguous_boundaries()?;
    let texts = label_texts(&values)?;
    Ok(values.into_iter().zip(texts).collect())
}

/// The decision table for notation selection, keyed on the digit count left
/// of the decimal point and the shared significant-digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Scientific,
    Integer,
    Fixed,
}

fn pick_notation(int_digits: i32, sig_digits: i32) -> Notation {
    match (int_digits, sig_digits) {
        (d, _) if d > 5 || d < -2 => Notation::Scientific,
        (d, s) if d > 0 && d >= s => Notation::Integer,
        _ => Notation::Fixed,
    }
}

fn label_texts(values: &[f64]) -> Result<Vec<String>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let max_magnitude = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max_magnitude == 0.0 {
        return Ok(vec!["0".to_string(); values.len()]);
    }

    // Spread of the non-zero, non-unset magnitudes
    let (lo_mag, hi_mag) = nonzero_magnitudes(values);
    let ratio = hi_mag / lo_mag;
    if (ratio.log10().floor() as i64) + 1 > MAX_SHARED_SPREAD {
        trace!(ratio, "magnitude spread too wide, formatting per value");
        let mut texts = Vec::with_capacity(values.len());
        for v in values {
            if *v == 0.0 {
                texts.push("0".to_string());
            } else {
                texts.push(label_texts(std::slice::from_ref(v))?.remove(0));
            }
        }
        return Ok(texts);
    }

    // An all-non-positive set is formatted on its magnitudes and the sign
    // re-applied afterward, so precision is not skewed by the leading minus.
    let negate = values.iter().fold(f64::NEG_INFINITY, |m, v| m.max(*v)) < 0.0;
    let working: Vec<f64> = if negate {
        values.iter().map(|v| -v).collect()
    } else {
        values.to_vec()
    };

    let int_digits = (max_magnitude.log10().floor() as i32) + 1;
    let sig_digits = shared_significant_digits(&working, int_digits);
    let notation = pick_notation(int_digits, sig_digits);
    trace!(int_digits, sig_digits, ?notation, "label formatting plan");

    let mut texts = Vec::with_capacity(working.len());
    match notation {
        Notation::Scientific => {
            let exponent = int_digits - 1;
            let scale = 10f64.powi(exponent);
            for v in &working {
                let mantissa = v / scale;
                if sig_digits <= 1 {
                    texts.push(format!("{}E{exponent}", round_half_away(mantissa) as i64));
                } else {
                    let precision = (sig_digits - 1) as usize;
                    texts.push(format!("{mantissa:.precision$}E{exponent}"));
                }
            }
        }
        Notation::Integer => {
            for v in &working {
                texts.push(format!("{}", round_half_away(*v) as i64));
            }
        }
        Notation::Fixed => {
            let fraction = (sig_digits - int_digits).max(0) as usize;
            for v in &working {
                let sign_room = if *v < 0.0 { 2 } else { 1 };
                let width = if int_digits < 0 {
                    (sig_digits - int_digits + 1 + sign_room) as usize
                } else {
                    (sig_digits + sign_room) as usize
                };
                texts.push(format!("{v:>width$.fraction$}"));
            }
        }
    }

    if negate {
        for text in &mut texts {
            *text = format!("-{text}");
        }
    }
    Ok(texts)
}

/// Minimum and maximum absolute value over the non-zero, non-unset entries;
/// degenerate `(UNSET, UNSET)` when there are none (then the ratio is 1).
fn nonzero_magnitudes(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        let mag = v.abs();
        if mag == 0.0 || mag >= MISSING_MAGNITUDE {
            continue;
        }
        lo = lo.min(mag);
        hi = hi.max(mag);
    }
    if lo == f64::INFINITY {
        return (UNSET, UNSET);
    }
    (lo, hi)
}

/// Smallest digit count such that every value round-trips to within
/// [`PRECISION_TOLERANCE`] when scaled to that many significant digits.
fn shared_significant_digits(values: &[f64], int_digits: i32) -> i32 {
    let mut sig = 0i32;
    for v in values {
        let mut scaled = 10f64.powi(-int_digits) * v;
        let mut digits = 0i32;
        while (round_half_away(scaled) - scaled).abs() > PRECISION_TOLERANCE {
            scaled *= 10.0;
            digits += 1;
        }
        sig = sig.max(digits);
    }
    sig
}

/// Round half away from zero (the convention the rest of the toolkit uses).
fn round_half_away(v: f64) -> f64 {
    v.round()
}
