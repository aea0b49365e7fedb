//! Field parsing utilities for production records
//!
//! Each parser takes the raw cell text plus the row and column it came from,
//! so failures can name the offending element. The editor reuses these to
//! validate new cell values with exactly the rules applied at load time.

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS, MAX_UNIT_COUNT};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Parse a calendar date, discarding any time component
pub fn parse_date(raw: &str, row: usize, column: &str) -> Result<NaiveDate> {
    let value = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }

    Err(Error::invalid_field(
        row,
        column,
        raw,
        "expected a date like YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
    ))
}

/// Parse a required categorical label
pub fn parse_label(raw: &str, row: usize, column: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::invalid_field(row, column, raw, "value is required"));
    }
    Ok(value.to_string())
}

/// Parse a non-negative quantity (weights and durations)
pub fn parse_quantity(raw: &str, row: usize, column: &str) -> Result<f64> {
    let value = raw.trim();
    let number = value
        .parse::<f64>()
        .map_err(|_| Error::invalid_field(row, column, raw, "expected a number"))?;

    if !number.is_finite() {
        return Err(Error::invalid_field(row, column, raw, "value must be finite"));
    }
    if number < 0.0 {
        return Err(Error::invalid_field(
            row,
            column,
            raw,
            "value must not be negative",
        ));
    }

    // Normalise -0.0 so stringification stays stable
    Ok(number + 0.0)
}

/// Parse a non-negative unit count; integral decimals such as `120.0` are accepted
///
/// Counts above [`MAX_UNIT_COUNT`] are rejected, which keeps dataset-wide
/// totals within `u64`.
pub fn parse_count(raw: &str, row: usize, column: &str) -> Result<u64> {
    let value = raw.trim();
    let count = match value.parse::<u64>() {
        Ok(count) => count,
        Err(_) => {
            let number = parse_quantity(raw, row, column)?;
            if number.fract() != 0.0 {
                return Err(Error::invalid_field(
                    row,
                    column,
                    raw,
                    "unit counts must be whole numbers",
                ));
            }
            if number > MAX_UNIT_COUNT as f64 {
                u64::MAX
            } else {
                number as u64
            }
        }
    };

    if count > MAX_UNIT_COUNT {
        return Err(Error::invalid_field(
            row,
            column,
            raw,
            format!("unit counts must not exceed {}", MAX_UNIT_COUNT),
        ));
    }
    Ok(count)
}

/// Parse an optional downtime reason; an empty cell means no reason was recorded
pub fn parse_reason(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
