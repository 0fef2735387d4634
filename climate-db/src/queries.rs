//! Typed query methods for retrieving measurement and station data.
//!
//! Every method is a single read-only statement. Date arguments are
//! canonical `YYYY-MM-DD` strings; because the format is fixed width,
//! SQLite's string comparison orders them chronologically.

use crate::models::{MeasurementRow, TemperatureSummary};
use crate::Database;
use rusqlite::params;

impl Database {
    /// Get the latest measurement date, or `None` for an empty table.
    pub fn query_max_date(&self) -> anyhow::Result<Option<String>> {
        let conn = self.conn()?;
        let max_date: Option<String> =
            conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
        log::info!("query: query_max_date returned {:?}", max_date);
        Ok(max_date)
    }

    /// Get the (earliest, latest) measurement dates, or `None` for an empty table.
    pub fn query_date_bounds(&self) -> anyhow::Result<Option<(String, String)>> {
        let conn = self.conn()?;
        let (min_date, max_date) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM measurement",
            [],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )?;
        Ok(min_date.zip(max_date))
    }

    /// Get every measurement dated on or after `start_date`.
    ///
    /// Ordered by date ascending; rows sharing a date keep store order.
    pub fn query_measurements_since(&self, start_date: &str) -> anyhow::Result<Vec<MeasurementRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, prcp, tobs FROM measurement
             WHERE date >= ?1
             ORDER BY date, id",
        )?;
        let rows = stmt
            .query_map(params![start_date], |row| {
                Ok(MeasurementRow {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                    tobs: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_measurements_since({}) returned {} records",
            start_date,
            rows.len()
        );
        Ok(rows)
    }

    /// Get MIN, AVG and MAX of observed temperature for an inclusive date range.
    ///
    /// Returns `None` when no measurement falls inside the range, in which
    /// case SQLite yields NULL for all three aggregates.
    pub fn query_temperature_summary(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> anyhow::Result<Option<TemperatureSummary>> {
        let conn = self.conn()?;
        let (min, avg, max) = conn.query_row(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ?1 AND date <= ?2",
            params![start_date, end_date],
            |row| {
                Ok((
                    row.get::<_, Option<f64>>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                ))
            },
        )?;
        let summary = match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some(TemperatureSummary { min, avg, max }),
            _ => None,
        };
        log::info!(
            "query: query_temperature_summary({}, {}) returned {:?}",
            start_date,
            end_date,
            summary
        );
        Ok(summary)
    }

    /// Get all station names in store order.
    pub fn query_station_names(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM station ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_station_names returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    /// Helper to create a database with two stations and a week of data
    /// plus one outlier a year earlier.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        let stations_csv = "\
station,name,latitude,longitude,elevation
USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6
USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
";
        db.load_stations(stations_csv).unwrap();

        let measurements_csv = "\
station,date,prcp,tobs
USC00519397,2016-01-01,0.1,66
USC00519397,2017-01-01,0.0,62
USC00513117,2017-01-01,0.29,70
USC00519397,2017-01-03,,64
USC00513117,2017-01-05,0.08,74
USC00519397,2017-01-07,0.0,69
";
        db.load_measurements(measurements_csv).unwrap();

        db
    }

    #[test]
    fn query_max_date() {
        let db = sample_db();
        assert_eq!(db.query_max_date().unwrap().as_deref(), Some("2017-01-07"));
    }

    #[test]
    fn query_date_bounds() {
        let db = sample_db();
        let (min, max) = db.query_date_bounds().unwrap().unwrap();
        assert_eq!(min, "2016-01-01");
        assert_eq!(max, "2017-01-07");
    }

    #[test]
    fn query_date_bounds_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_date_bounds().unwrap().is_none());
    }

    #[test]
    fn query_measurements_since_is_inclusive_and_ordered() {
        let db = sample_db();
        let rows = db.query_measurements_since("2017-01-01").unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2017-01-01", "2017-01-01", "2017-01-03", "2017-01-05", "2017-01-07"]
        );
        // Same-date rows keep insertion order
        assert!((rows[0].tobs - 62.0).abs() < 0.01);
        assert!((rows[1].tobs - 70.0).abs() < 0.01);
        assert!(rows[2].prcp.is_none());
    }

    #[test]
    fn query_measurements_since_after_last_date() {
        let db = sample_db();
        assert!(db.query_measurements_since("2017-01-08").unwrap().is_empty());
    }

    #[test]
    fn query_temperature_summary_over_range() {
        let db = sample_db();
        let summary = db
            .query_temperature_summary("2017-01-01", "2017-01-07")
            .unwrap()
            .unwrap();
        assert!((summary.min - 62.0).abs() < 0.01);
        assert!((summary.max - 74.0).abs() < 0.01);
        // (62 + 70 + 64 + 74 + 69) / 5
        assert!((summary.avg - 67.8).abs() < 0.01);
    }

    #[test]
    fn query_temperature_summary_bounds_are_inclusive() {
        let db = sample_db();
        let summary = db
            .query_temperature_summary("2017-01-07", "2017-01-07")
            .unwrap()
            .unwrap();
        assert_eq!(summary.as_triple(), [69.0, 69.0, 69.0]);
    }

    #[test]
    fn query_temperature_summary_empty_range() {
        let db = sample_db();
        let summary = db
            .query_temperature_summary("2000-01-01", "2000-12-31")
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn query_station_names_in_store_order() {
        let db = sample_db();
        let names = db.query_station_names().unwrap();
        assert_eq!(
            names,
            vec![
                "WAIKIKI 717.2, HI US",
                "KANEOHE 838.1, HI US",
                "WAIHEE 837.5, HI US",
            ]
        );
    }
}
