//! CSV fixture loading for in-memory databases.
//!
//! The loaders seed a [`Database::new`] instance from the CSV exports that
//! accompany the published dataset. They are used by tests and by the
//! CLI's in-memory serving mode; dataset files opened read-only are never
//! written to.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date(YYYY-MM-DD),prcp,tobs`

use crate::Database;
use climate_utils::dates::parse_date_strict;
use rusqlite::params;

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// Rows are inserted in file order, which is the order
    /// [`query_station_names`](Self::query_station_names) returns them in.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let station = r.get(0).unwrap_or("").trim();
            let name = r.get(1).unwrap_or("").trim();
            let latitude: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());
            let longitude: Option<f64> = r.get(3).and_then(|s| s.trim().parse().ok());
            let elevation: Option<f64> = r.get(4).and_then(|s| s.trim().parse().ok());

            if station.is_empty() || name.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![station, name, latitude, longitude, elevation],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} stations, skipped {} invalid", count, skipped);
        Ok(())
    }

    /// Load daily measurements from CSV string.
    ///
    /// An empty or non-numeric `prcp` is stored as NULL. Rows with a date
    /// that is not canonical `YYYY-MM-DD`, or without a numeric `tobs`, are
    /// skipped: the range queries compare dates as strings and would
    /// silently misorder them.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-02,,63
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let station = r.get(0).unwrap_or("").trim();
            let date = r.get(1).unwrap_or("").trim();
            let prcp: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());
            let tobs: f64 = match r.get(3).and_then(|s| s.trim().parse().ok()) {
                Some(v) => v,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            if station.is_empty() || parse_date_strict(date).is_err() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs)
                 VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )?;
            count += 1;
        }
        log::info!(
            "loader: Loaded {} measurements, skipped {} invalid",
            count,
            skipped
        );
        Ok(())
    }
}
