//! # chart-levels
//!
//! Automatic scale, label, and color-level generation for scientific charts.
//!
//! ## Overview
//!
//! Plotting front-ends need three things computed from a data range before
//! anything reaches a renderer: "nice" level boundaries for axis ticks and
//! fill bands, display strings for those boundaries with consistent
//! precision, and a mapping from level intervals onto a bounded color
//! palette. This crate implements those three engines plus a calendar-aware
//! variant for time axes. Everything is a pure function: no registries, no
//! shared state, safe to call from any thread.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chart_levels::{
//!     build_scale, default_palette, format_labels, spread_colors,
//!     Levels, ScaleOptions, SplitMode, DEFAULT_SPLIT_COLOR,
//! };
//!
//! let boundaries = build_scale(0.0, 100.0, &ScaleOptions::default())?;
//! let labels = format_labels(&Levels::Boundaries(boundaries.clone()))?;
//! assert_eq!(labels.get(40.0), Some("40"));
//!
//! let colors = spread_colors(
//!     &Levels::Boundaries(boundaries),
//!     &default_palette(),
//!     SplitMode::Auto,
//!     DEFAULT_SPLIT_COLOR,
//! )?;
//! assert_eq!(colors.len(), 10);
//! # Ok::<(), chart_levels::LevelsError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `range`: reduction of arbitrarily nested samples to a `(min, max)` pair
//! - `scale`: nice-boundary generation with zero-inclusion policies
//! - `labels`: precision and notation selection for display strings
//! - `colors`: palette spreading with optional negative/positive splitting
//! - `time`: calendar-aligned tick labels via a calendar collaborator
//! - `types`: shared level/label value types
//! - `error`: the crate error type

pub mod colors;
pub mod error;
pub mod labels;
pub mod range;
pub mod scale;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use colors::{DEFAULT_SPLIT_COLOR, SplitMode, default_palette, spread_colors};
pub use error::{LevelsError, Result};
pub use labels::format_labels;
pub use range::{MISSING_MAGNITUDE, Sample, UNSET, min_max, min_max_pair};
pub use scale::{
    ScaleKind, ScaleOptions, ScaleOptionsBuilder, ZeroPolicy, build_scale, even_levels,
};
pub use time::{Calendar, RelativeUnits, TimeField, TimeFields, TimeUnit, time_labels};
pub use types::{Label, LabelSet, Levels};
