//! "Nice" scale generation for axis ticks and fill levels.
//!
//! Callers want boundaries that look hand-chosen (multiples of 2/2.5/4/5/10
//! at some power of ten) rather than raw arithmetic divisions of the range.
//! [`build_scale`] produces those; [`even_levels`] is the plain linear
//! alternative for when the caller really does want an even division.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::{LevelsError, Result};
use crate::range::min_max_pair;

/// Whether zero may, must, or must not appear among the generated boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ZeroPolicy {
    /// Zero must not be a boundary
    Forbidden,
    /// Let the algorithm decide
    Auto,
    /// Zero may be a boundary
    #[default]
    Allowed,
    /// Zero must be a boundary (the range is widened to include it)
    Required,
}

/// The scale generation heuristic.
///
/// `Custom` is reserved for caller-supplied level shapes and is not
/// implemented; requesting it is a hard error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Round-step heuristic (the default)
    #[default]
    Round,
    /// Reserved for a future caller-defined scale shape
    Custom,
}

/// Options for [`build_scale`].
///
/// # Example
///
/// ```rust
/// use chart_levels::{build_scale, ScaleOptions, ZeroPolicy};
///
/// let options = ScaleOptions::new()
///     .interval_count(5usize)
///     .zero(ZeroPolicy::Required)
///     .build()?;
/// let levels = build_scale(2.0, 20.0, &options)?;
/// assert_eq!(levels[0], 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into), default)]
pub struct ScaleOptions {
    /// Target number of intervals between the generated boundaries
    #[builder(default = "12")]
    pub interval_count: usize,

    /// Zero-inclusion policy
    #[builder(default)]
    pub zero: ZeroPolicy,

    /// Force the two original endpoints into the output exactly
    #[builder(default = "false")]
    pub force_ends: bool,

    /// Scale generation heuristic
    #[builder(default)]
    pub kind: ScaleKind,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            interval_count: 12,
            zero: ZeroPolicy::default(),
            force_ends: false,
            kind: ScaleKind::default(),
        }
    }
}

impl ScaleOptions {
    /// Create a new builder for ScaleOptions
    pub fn new() -> ScaleOptionsBuilder {
        ScaleOptionsBuilder::default()
    }
}

/// Generate a nice scale covering the range `n1..n2`.
///
/// Endpoint order is not significant for coverage, but when `n1 > n2` the
/// boundaries come back in descending order. Equal endpoints (including a
/// range that degenerates after unset values are discarded) return the
/// single value rather than failing.
///
/// # Example
///
/// ```rust
/// use chart_levels::{build_scale, ScaleOptions};
///
/// let levels = build_scale(0.0, 100.0, &ScaleOptions::default())?;
/// assert_eq!(levels, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0,
///                         60.0, 70.0, 80.0, 90.0, 100.0]);
/// # Ok::<(), chart_levels::LevelsError>(())
/// ```
pub fn build_scale(n1: f64, n2: f64, options: &ScaleOptions) -> Result<Vec<f64>> {
    if options.kind == ScaleKind::Custom {
        return Err(LevelsError::unsupported_mode(
            "custom scale kind is reserved and not implemented",
        ));
    }
    if n1 == n2 {
        return Ok(vec![n1]);
    }
    let (mut lo, mut hi) = min_max_pair(n1, n2)?;
    if options.zero == ZeroPolicy::Required {
        if lo > 0.0 {
            lo = 0.0;
        }
        if hi < 0.0 {
            hi = 0.0;
        }
    }
    if lo == hi {
        return Ok(vec![lo]);
    }

    let nc = options.interval_count.max(1);
    let raw_step = (hi - lo) / nc as f64;
    // rescale by a power of ten so the step lands in (10, 100]
    let exponent = (-raw_step.log10() + 2.0).floor() as i32;
    let factor = 10f64.powi(exponent);
    let avoid_zero = options.zero == ZeroPolicy::Forbidden;
    let step = snap_step(raw_step * factor, avoid_zero);
    debug!(raw_step, step, exponent, "snapped scale step");

    if options.force_ends {
        return Ok(anchored_levels(n1, n2, step / factor, nc));
    }

    let scaled_min = lo * factor;
    let scaled_max = hi * factor;
    // one extra step of slack below the minimum; the forbidden grid sits at
    // half-step offsets so zero never lands on a boundary
    let first = if avoid_zero {
        (scaled_min / step).floor() - 1.5
    } else {
        (scaled_min / step).floor() - 1.0
    };
    // 2*nc candidates plus slack so tiny interval counts still cover the top
    let candidates: Vec<f64> = (0..2 * nc + 4).map(|j| step * (first + j as f64)).collect();

    // trim to the smallest sub-range still covering [min, max] inclusive
    let mut start = 0;
    for (j, v) in candidates.iter().enumerate() {
        if *v > scaled_min {
            start = j.saturating_sub(1);
            break;
        }
    }
    let mut end = candidates.len();
    for (j, v) in candidates.iter().enumerate() {
        if *v >= scaled_max {
            end = j + 1;
            break;
        }
    }

    let mut levels: Vec<f64> = candidates[start..end].iter().map(|v| v / factor).collect();
    if n1 > n2 {
        levels.reverse();
    }
    Ok(levels)
}

/// Return `nlev + 1` evenly spaced boundaries from `n1` to `n2`.
///
/// Direction is preserved: `even_levels(100.0, 0.0, 5)` counts down.
pub fn even_levels(n1: f64, n2: f64, nlev: usize) -> Vec<f64> {
    let nlev = nlev.max(1);
    let step = (n2 - n1) / nlev as f64;
    (0..=nlev).map(|i| n1 + step * i as f64).collect()
}

/// Snap a step in `(10, 100]` up to the nearest engineering-friendly value.
fn snap_step(step: f64, avoid_zero: bool) -> f64 {
    if avoid_zero {
        match step {
            s if s <= 20.0 => 20.0,
            s if s <= 40.0 => 40.0,
            s if s <= 60.0 => 60.0,
            _ => 100.0,
        }
    } else {
        match step {
            s if s <= 20.0 => 20.0,
            s if s <= 25.0 => 25.0,
            s if s <= 40.0 => 40.0,
            s if s <= 50.0 => 50.0,
            _ => 100.0,
        }
    }
}

/// Boundaries anchored at `n1`, advancing by `step` until `n2` is reached;
/// both endpoints appear exactly.
fn anchored_levels(n1: f64, n2: f64, step: f64, nc: usize) -> Vec<f64> {
    let direction = if n2 >= n1 { 1.0 } else { -1.0 };
    let step = direction * step;
    let mut levels = vec![n1];
    for k in 1..2 * nc {
        let v = n1 + step * k as f64;
        if (v - n2) * direction >= 0.0 {
            break;
        }
        levels.push(v);
    }
    if levels.last() != Some(&n2) {
        levels.push(n2);
    }
    levels
}
