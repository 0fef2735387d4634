//! Query result model structs.
//!
//! Records served directly by the HTTP layer derive `Serialize`.

use serde::Serialize;

/// A (date, precipitation) pair for the precipitation listing.
///
/// `prcp` is `None` where the station reported no precipitation value and
/// serializes as JSON `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrecipitationRecord {
    pub date: String,
    pub prcp: Option<f64>,
}

/// A single measurement row as returned by the windowed queries.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Calendar date (YYYY-MM-DD).
    pub date: String,
    /// Precipitation in inches, if reported.
    pub prcp: Option<f64>,
    /// Observed temperature in degrees Fahrenheit.
    pub tobs: f64,
}

impl MeasurementRow {
    pub fn precipitation(&self) -> PrecipitationRecord {
        PrecipitationRecord {
            date: self.date.clone(),
            prcp: self.prcp,
        }
    }
}

/// MIN / AVG / MAX of observed temperatures over a date range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl TemperatureSummary {
    /// The `[min, avg, max]` triple served by the date range endpoints.
    pub fn as_triple(&self) -> [f64; 3] {
        [self.min, self.avg, self.max]
    }
}
