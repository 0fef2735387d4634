//! The queries the service needs from its data store.

use climate_db::models::{MeasurementRow, TemperatureSummary};
use climate_db::Database;

/// Read-only view of a measurement/station dataset.
///
/// Implementations are shared between concurrent requests and must be
/// safe to call from several threads at once.
pub trait ClimateStore: Send + Sync {
    /// Latest measurement date (YYYY-MM-DD), `None` when there are no measurements.
    fn max_measurement_date(&self) -> anyhow::Result<Option<String>>;

    /// Measurements dated on or after `date`, ordered by date ascending.
    fn measurements_on_or_after(&self, date: &str) -> anyhow::Result<Vec<MeasurementRow>>;

    /// MIN/AVG/MAX of observed temperature over `[start_date, end_date]`.
    fn aggregate_temperature(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> anyhow::Result<Option<TemperatureSummary>>;

    /// Station names in store order.
    fn all_station_names(&self) -> anyhow::Result<Vec<String>>;
}

impl ClimateStore for Database {
    fn max_measurement_date(&self) -> anyhow::Result<Option<String>> {
        self.query_max_date()
    }

    fn measurements_on_or_after(&self, date: &str) -> anyhow::Result<Vec<MeasurementRow>> {
        self.query_measurements_since(date)
    }

    fn aggregate_temperature(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> anyhow::Result<Option<TemperatureSummary>> {
        self.query_temperature_summary(start_date, end_date)
    }

    fn all_station_names(&self) -> anyhow::Result<Vec<String>> {
        self.query_station_names()
    }
}
