//! SQL schema definitions for the measurement database.
//!
//! The schema is declared statically and mirrors the layout of the
//! published Hawaii climate dataset. It is applied as a single batch when an
//! in-memory database is created; existing database files are only checked
//! against [`REQUIRED_TABLES`].

/// Tables that must be present for the query methods to work.
pub const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Returns the full SQL schema as a single batch string.
///
/// - `measurement` - One row per station per day (date, precipitation, observed temperature)
/// - `station` - Station metadata; only `name` is served
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        elevation REAL
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_required_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in &REQUIRED_TABLES {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
