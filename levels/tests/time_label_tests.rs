// Calendar-aligned label generation, exercised against a deterministic
// 360-day calendar (12 months of 30 days) so every expectation can be
// worked out by hand.

use chart_levels::{
    Calendar, LevelsError, RelativeUnits, Result, TimeField, TimeFields, time_labels,
};

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 360;

/// A 360-day calendar: every year has 12 months of 30 days.
struct Calendar360;

impl Calendar360 {
    /// Parse an origin like "2000", "2000-1", or "2000-01-01" into absolute
    /// days since year zero.
    fn origin_days(since: &str) -> Result<i64> {
        let mut parts = since.split('-').map(str::trim);
        let year: i64 = parts
            .next()
            .unwrap_or("")
            .parse()
            .map_err(|_| LevelsError::calendar(format!("bad origin '{since}'")))?;
        let month: i64 = match parts.next() {
            Some(p) => p
                .parse()
                .map_err(|_| LevelsError::calendar(format!("bad origin '{since}'")))?,
            None => 1,
        };
        let day: i64 = match parts.next() {
            Some(p) => p
                .parse()
                .map_err(|_| LevelsError::calendar(format!("bad origin '{since}'")))?,
            None => 1,
        };
        Ok(year * DAYS_PER_YEAR + (month - 1) * DAYS_PER_MONTH + (day - 1))
    }

    fn unit_in_days(units: &RelativeUnits) -> f64 {
        use chart_levels::TimeUnit::*;
        match units.unit {
            Seconds => 1.0 / SECONDS_PER_DAY as f64,
            Minutes => 1.0 / 1_440.0,
            Hours => 1.0 / 24.0,
            Days => 1.0,
            Months => DAYS_PER_MONTH as f64,
            Years => DAYS_PER_YEAR as f64,
        }
    }

    /// Whole days since year zero plus seconds into the day.
    fn field_parts(fields: &TimeFields) -> (i64, i64) {
        let days = fields.year * DAYS_PER_YEAR
            + (fields.month as i64 - 1) * DAYS_PER_MONTH
            + (fields.day as i64 - 1);
        let seconds =
            fields.hour as i64 * 3_600 + fields.minute as i64 * 60 + fields.second as i64;
        (days, seconds)
    }

    fn parts_to_fields(days: i64, seconds: i64) -> TimeFields {
        let year = days.div_euclid(DAYS_PER_YEAR);
        let of_year = days.rem_euclid(DAYS_PER_YEAR);
        TimeFields {
            year,
            month: (of_year / DAYS_PER_MONTH) as u32 + 1,
            day: (of_year % DAYS_PER_MONTH) as u32 + 1,
            hour: (seconds / 3_600) as u32,
            minute: (seconds % 3_600 / 60) as u32,
            second: (seconds % 60) as u32,
        }
    }
}

impl Calendar for Calendar360 {
    fn convert(&self, value: f64, from: &RelativeUnits, to: &RelativeUnits) -> Result<f64> {
        let from_origin = Self::origin_days(&from.since)?;
        let to_origin = Self::origin_days(&to.since)?;
        let days = value * Self::unit_in_days(from) + (from_origin - to_origin) as f64;
        Ok(days / Self::unit_in_days(to))
    }

    fn decompose(&self, value: f64, units: &RelativeUnits) -> Result<TimeFields> {
        let days = value * Self::unit_in_days(units) + Self::origin_days(&units.since)? as f64;
        let mut whole = days.floor() as i64;
        let mut seconds = ((days - days.floor()) * SECONDS_PER_DAY as f64).round() as i64;
        if seconds >= SECONDS_PER_DAY {
            whole += 1;
            seconds = 0;
        }
        Ok(Self::parts_to_fields(whole, seconds))
    }

    fn recompose(&self, fields: &TimeFields, units: &RelativeUnits) -> Result<f64> {
        let origin = Self::origin_days(&units.since)?;
        let (days, seconds) = Self::field_parts(fields);
        let whole_days = (days - origin) as f64;
        use chart_levels::TimeUnit::*;
        Ok(match units.unit {
            Seconds => whole_days * SECONDS_PER_DAY as f64 + seconds as f64,
            Minutes => whole_days * 1_440.0 + seconds as f64 / 60.0,
            Hours => whole_days * 24.0 + seconds as f64 / 3_600.0,
            Days => whole_days + seconds as f64 / SECONDS_PER_DAY as f64,
            Months => (whole_days + seconds as f64 / SECONDS_PER_DAY as f64) / DAYS_PER_MONTH as f64,
            Years => (whole_days + seconds as f64 / SECONDS_PER_DAY as f64) / DAYS_PER_YEAR as f64,
        })
    }

    fn add(&self, fields: &TimeFields, count: i64, field: TimeField) -> Result<TimeFields> {
        let (mut days, mut seconds) = Self::field_parts(fields);
        match field {
            TimeField::Hour => {
                seconds += count * 3_600;
                days += seconds.div_euclid(SECONDS_PER_DAY);
                seconds = seconds.rem_euclid(SECONDS_PER_DAY);
            }
            TimeField::Day => days += count,
            TimeField::Month => {
                let months = fields.year * 12 + fields.month as i64 - 1 + count;
                let mut out = *fields;
                out.year = months.div_euclid(12);
                out.month = months.rem_euclid(12) as u32 + 1;
                return Ok(out);
            }
            TimeField::Year => {
                let mut out = *fields;
                out.year += count;
                return Ok(out);
            }
        }
        Ok(Self::parts_to_fields(days, seconds))
    }
}

fn units(s: &str) -> RelativeUnits {
    s.parse().unwrap()
}

#[test]
fn sub_hour_span_labels_raw_scale_values() {
    let labels = time_labels(0.0, 30.0, &units("minutes since 2000-1-1"), &Calendar360).unwrap();
    assert_eq!(labels.len(), 13);
    assert_eq!(labels.get(0.0), Some("2000-01-01 00:00:00"));
    assert_eq!(labels.get(2.5), Some("2000-01-01 00:02:30"));
    assert_eq!(labels.get(30.0), Some("2000-01-01 00:30:00"));
}

#[test]
fn half_day_span_labels_every_hour() {
    let labels = time_labels(0.0, 12.0, &units("hours since 2000-1-1"), &Calendar360).unwrap();
    assert_eq!(labels.len(), 13);
    assert_eq!(labels.get(0.0), Some("2000-01-01 00"));
    assert_eq!(labels.get(5.0), Some("2000-01-01 05"));
    assert_eq!(labels.get(12.0), Some("2000-01-01 12"));
}

#[test]
fn ten_day_span_labels_every_day() {
    // endpoints in hours, ten days apart: keys come back in hours
    let labels = time_labels(0.0, 240.0, &units("hours since 2000-1-1"), &Calendar360).unwrap();
    assert_eq!(labels.len(), 11);
    assert_eq!(labels.get(0.0), Some("2000-01-01"));
    assert_eq!(labels.get(24.0), Some("2000-01-02"));
    assert_eq!(labels.get(240.0), Some("2000-01-11"));
}

#[test]
fn two_year_span_labels_months_with_midpoint_snapping() {
    let labels = time_labels(20.0, 750.0, &units("days since 2000-1-1"), &Calendar360).unwrap();
    let entries: Vec<(f64, &str)> = labels.iter().map(|l| (l.value, l.text.as_str())).collect();
    assert_eq!(
        entries,
        vec![
            (0.0, "2000-01"),
            (90.0, "2000-04"),
            (150.0, "2000-06"),
            (240.0, "2000-09"),
            (300.0, "2000-11"),
            (390.0, "2001-02"),
            (450.0, "2001-04"),
            (540.0, "2001-07"),
            (600.0, "2001-09"),
            (690.0, "2001-12"),
            (750.0, "2002-02"),
        ]
    );
}

#[test]
fn coarse_month_scale_collapses_duplicate_buckets() {
    // ~3.3 months in 0.4-month steps: many levels floor into the same month
    let labels = time_labels(0.0, 100.0, &units("days since 2000-1-1"), &Calendar360).unwrap();
    let entries: Vec<(f64, &str)> = labels.iter().map(|l| (l.value, l.text.as_str())).collect();
    assert_eq!(
        entries,
        vec![
            (0.0, "2000-01"),
            (30.0, "2000-02"),
            (60.0, "2000-03"),
            (90.0, "2000-04"),
            (120.0, "2000-05"),
        ]
    );
}

#[test]
fn multi_decade_span_labels_years() {
    let labels = time_labels(0.0, 600.0, &units("months since 2000"), &Calendar360).unwrap();
    let entries: Vec<(f64, &str)> = labels.iter().map(|l| (l.value, l.text.as_str())).collect();
    assert_eq!(
        entries,
        vec![
            (0.0, "2000"),
            (60.0, "2005"),
            (120.0, "2010"),
            (180.0, "2015"),
            (240.0, "2020"),
            (300.0, "2025"),
            (360.0, "2030"),
            (420.0, "2035"),
            (480.0, "2040"),
            (540.0, "2045"),
            (600.0, "2050"),
        ]
    );
}

#[test]
fn reversed_endpoints_are_reordered() {
    let forward = time_labels(0.0, 240.0, &units("hours since 2000-1-1"), &Calendar360).unwrap();
    let backward = time_labels(240.0, 0.0, &units("hours since 2000-1-1"), &Calendar360).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn calendar_fixture_round_trips() {
    let u = units("days since 2000-1-1");
    let fields = Calendar360.decompose(75.5, &u).unwrap();
    assert_eq!(
        fields,
        TimeFields {
            year: 2000,
            month: 3,
            day: 16,
            hour: 12,
            minute: 0,
            second: 0
        }
    );
    assert_eq!(Calendar360.recompose(&fields, &u).unwrap(), 75.5);
}
