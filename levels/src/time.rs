//! Calendar-aligned time tick labels.
//!
//! Time axes want ticks on calendar boundaries ("1995-03", not
//! "1995-03-14 12:00") regardless of the raw numeric span. This module
//! classifies a time range into a display granularity, runs the scale
//! builder in that granularity's own unit, then snaps every boundary to the
//! start of its calendar bucket. All actual calendar arithmetic is delegated
//! to the caller-supplied [`Calendar`] collaborator; nothing here interprets
//! leap rules or month lengths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::{LevelsError, Result};
use crate::range::min_max_pair;
use crate::scale::{ScaleOptions, build_scale};
use crate::types::LabelSet;

/// A relative-time unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[strum(to_string = "seconds", serialize = "second")]
    Seconds,
    #[strum(to_string = "minutes", serialize = "minute")]
    Minutes,
    #[strum(to_string = "hours", serialize = "hour")]
    Hours,
    #[strum(to_string = "days", serialize = "day")]
    Days,
    #[strum(to_string = "months", serialize = "month")]
    Months,
    #[strum(to_string = "years", serialize = "year")]
    Years,
}

/// A unit system for relative time values: a [`TimeUnit`] counted from an
/// origin the calendar knows how to interpret, e.g. `"days since 2000-1-1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeUnits {
    pub unit: TimeUnit,
    pub since: String,
}

impl RelativeUnits {
    pub fn new(unit: TimeUnit, since: impl Into<String>) -> Self {
        Self {
            unit,
            since: since.into(),
        }
    }
}

impl FromStr for RelativeUnits {
    type Err = LevelsError;

    fn from_str(s: &str) -> Result<Self> {
        let (unit_part, since) = match s.split_once("since") {
            Some((unit, since)) => (unit, since.trim().to_string()),
            None => (s, String::new()),
        };
        let unit = TimeUnit::from_str(unit_part.trim()).map_err(|_| {
            LevelsError::malformed_value(format!(
                "'{}' is not a recognized time unit",
                unit_part.trim()
            ))
        })?;
        Ok(Self { unit, since })
    }
}

impl fmt::Display for RelativeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.since.is_empty() {
            write!(f, "{}", self.unit)
        } else {
            write!(f, "{} since {}", self.unit, self.since)
        }
    }
}

/// A decomposed calendar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFields {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for TimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A calendar field that can be stepped by whole counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeField {
    Hour,
    Day,
    Month,
    Year,
}

/// The calendar collaborator.
///
/// Implementations own every calendar rule (month lengths, leap behavior,
/// origin parsing); the label builder only ever composes these four
/// operations. All methods are pure with respect to the fixed calendar the
/// implementation describes.
pub trait Calendar {
    /// Re-express `value` from one unit system in another.
    fn convert(&self, value: f64, from: &RelativeUnits, to: &RelativeUnits) -> Result<f64>;

    /// Decompose a relative value into calendar fields.
    fn decompose(&self, value: f64, units: &RelativeUnits) -> Result<TimeFields>;

    /// Recompose calendar fields into a relative value.
    fn recompose(&self, fields: &TimeFields, units: &RelativeUnits) -> Result<f64>;

    /// Step a timestamp by `count` whole units of `field`.
    fn add(&self, fields: &TimeFields, count: i64, field: TimeField) -> Result<TimeFields>;
}

/// Display granularity chosen for a time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Hourly,
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    fn unit(self) -> TimeUnit {
        match self {
            Self::Hourly => TimeUnit::Hours,
            Self::Daily => TimeUnit::Days,
            Self::Monthly => TimeUnit::Months,
            Self::Yearly => TimeUnit::Years,
        }
    }

    /// Snap to the start of the enclosing bucket, rounding forward when the
    /// timestamp is past the bucket midpoint.
    fn align(self, fields: TimeFields, calendar: &dyn Calendar) -> Result<TimeFields> {
        let mut fields = fields;
        match self {
            Self::Hourly => {
                if fields.minute > 30 {
                    fields = calendar.add(&fields, 1, TimeField::Hour)?;
                }
                fields.minute = 0;
                fields.second = 0;
            }
            Self::Daily => {
                if fields.hour > 12 {
                    fields = calendar.add(&fields, 1, TimeField::Day)?;
                }
                fields.hour = 0;
                fields.minute = 0;
                fields.second = 0;
            }
            Self::Monthly => {
                if fields.day > 15 {
                    fields = calendar.add(&fields, 1, TimeField::Month)?;
                }
                fields.day = 1;
                fields.hour = 0;
                fields.minute = 0;
                fields.second = 0;
            }
            Self::Yearly => {
                if fields.month > 6 {
                    fields = calendar.add(&fields, 1, TimeField::Year)?;
                }
                fields.month = 1;
                fields.day = 1;
                fields.hour = 0;
                fields.minute = 0;
                fields.second = 0;
            }
        }
        Ok(fields)
    }

    /// The truncated display string for an aligned timestamp.
    fn label(self, fields: &TimeFields) -> String {
        match self {
            Self::Hourly => format!(
                "{:04}-{:02}-{:02} {:02}",
                fields.year, fields.month, fields.day, fields.hour
            ),
            Self::Daily => format!("{:04}-{:02}-{:02}", fields.year, fields.month, fields.day),
            Self::Monthly => format!("{:04}-{:02}", fields.year, fields.month),
            Self::Yearly => format!("{:04}", fields.year),
        }
    }
}

/// Spans shorter than this many days are labeled at sub-hour resolution.
const SUB_HOUR_SPAN_DAYS: f64 = 0.042;

/// Classify a span (in days) into a display granularity, or `None` for
/// sub-hour spans that keep the caller's own unit.
fn classify(span_days: f64) -> Option<Granularity> {
    if span_days < SUB_HOUR_SPAN_DAYS {
        None
    } else if span_days < 1.0 {
        Some(Granularity::Hourly)
    } else if span_days < 90.0 {
        Some(Granularity::Daily)
    } else if span_days < 800.0 {
        Some(Granularity::Monthly)
    } else {
        Some(Granularity::Yearly)
    }
}

/// Approximate span of a unit interval, in days, for granularity selection.
fn unit_span_days(unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Seconds => 1.0 / 86_400.0,
        TimeUnit::Minutes => 1.0 / 1_440.0,
        TimeUnit::Hours => 1.0 / 24.0,
        TimeUnit::Days => 1.0,
        TimeUnit::Months => 30.0,
        TimeUnit::Years => 365.0,
    }
}

/// Build calendar-aligned tick labels for the time range `t1..t2`.
///
/// The two endpoints are relative values in `units`; the returned keys are
/// in the same unit system, so they drop straight onto the caller's axis.
/// Boundaries that snap into the same calendar bucket collapse to a single
/// entry.
pub fn time_labels(
    t1: f64,
    t2: f64,
    units: &RelativeUnits,
    calendar: &dyn Calendar,
) -> Result<LabelSet> {
    let (start, end) = min_max_pair(t1, t2)?;
    let span_days = (end - start) * unit_span_days(units.unit);
    let mut labels = LabelSet::new();

    let Some(granularity) = classify(span_days) else {
        // sub-hour: label raw scale values in the caller's own unit
        for level in build_scale(start, end, &ScaleOptions::default())? {
            let fields = calendar.decompose(level, units)?;
            labels.insert(level, fields.to_string());
        }
        return Ok(labels);
    };
    debug!(span_days, ?granularity, "time span classified");

    let bucket_units = RelativeUnits::new(granularity.unit(), "2000");
    let b1 = calendar.convert(start, units, &bucket_units)?;
    let b2 = calendar.convert(end, units, &bucket_units)?;
    let (b1, b2) = min_max_pair(b1, b2)?;
    for level in build_scale(b1, b2, &ScaleOptions::default())? {
        let fields = calendar.decompose(level, &bucket_units)?;
        let aligned = granularity.align(fields, calendar)?;
        let key = calendar.recompose(&aligned, units)?;
        labels.insert(key, granularity.label(&aligned));
    }
    Ok(labels)
}
