//! Aggregate query service.
//!
//! Each operation is a synchronous function over a [`ClimateStore`]; the
//! HTTP handlers in [`crate::routes`] call them from the blocking pool.

use chrono::NaiveDate;
use climate_db::models::{MeasurementRow, PrecipitationRecord};
use climate_utils::dates::{format_date, parse_date, parse_date_strict, window_start};

use crate::error::{RangeError, Result};
use crate::store::ClimateStore;

/// Measurements from the last 366 days of the dataset, inclusive.
///
/// The window is anchored on the latest date in the store, not on today.
fn recent_measurements(store: &dyn ClimateStore) -> Result<Vec<MeasurementRow>> {
    let Some(max_date) = store.max_measurement_date()? else {
        return Ok(Vec::new());
    };
    let lower_bound = window_start(&parse_date(&max_date)?)?;
    Ok(store.measurements_on_or_after(&format_date(&lower_bound))?)
}

/// `{date, prcp}` records for the recent window, oldest first.
pub fn recent_precipitation(store: &dyn ClimateStore) -> Result<Vec<PrecipitationRecord>> {
    let rows = recent_measurements(store)?;
    Ok(rows.iter().map(MeasurementRow::precipitation).collect())
}

/// Observed temperatures for the recent window, oldest first.
pub fn recent_temperatures(store: &dyn ClimateStore) -> Result<Vec<f64>> {
    let rows = recent_measurements(store)?;
    Ok(rows.into_iter().map(|row| row.tobs).collect())
}

pub fn station_names(store: &dyn ClimateStore) -> Result<Vec<String>> {
    Ok(store.all_station_names()?)
}

fn validate_date(input: &str) -> std::result::Result<NaiveDate, RangeError> {
    parse_date_strict(input).map_err(|_| RangeError::InvalidDateFormat(input.to_string()))
}

/// `[min, avg, max]` of observed temperature between two dates, inclusive.
///
/// `end_date` falls back to `today`, which the caller evaluates per request.
pub fn temperature_range(
    store: &dyn ClimateStore,
    start_date: &str,
    end_date: Option<&str>,
    today: NaiveDate,
) -> Result<[f64; 3]> {
    let start = validate_date(start_date)?;
    let end = match end_date {
        Some(end_date) => validate_date(end_date)?,
        None => today,
    };

    let (start, end) = (format_date(&start), format_date(&end));
    if start > end {
        return Err(RangeError::InvalidRange { start, end }.into());
    }

    match store.aggregate_temperature(&start, &end)? {
        Some(summary) => Ok(summary.as_triple()),
        None => Err(RangeError::NoDataForRange { start, end }.into()),
    }
}
