//! SQLite data layer for daily station measurements.
//!
//! This crate wraps a SQLite database holding the `measurement` and
//! `station` tables of a climate dataset and exposes typed, read-only
//! query methods for consumption by the HTTP service.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` wrapper so one handle can be shared between
//!   concurrent request handlers
//! - Existing dataset files are opened read-only via [`Database::open_read_only`]
//! - In-memory databases ([`Database::new`]) are seeded from CSV for tests
//!   and demos
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use climate_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519397,2017-01-01,0.0,62\n").unwrap();
//!
//! let names = db.query_station_names().unwrap();
//! let summary = db.query_temperature_summary("2017-01-01", "2017-01-07").unwrap();
//! assert_eq!(names.len(), 1);
//! assert!(summary.is_some());
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `measurement` - Daily precipitation and temperature per station
//! - `station` - Station metadata

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle to the measurement database.
///
/// Cheaply cloneable (via `Arc`); every clone shares the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connection(conn))
    }

    /// Open an existing dataset file without write access.
    ///
    /// Fails if the file does not exist or lacks one of
    /// [`schema::REQUIRED_TABLES`].
    pub fn open_read_only(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| anyhow::anyhow!("failed to open {}: {}", path.display(), e))?;

        for table in schema::REQUIRED_TABLES {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )?;
            if count == 0 {
                anyhow::bail!("{} has no '{}' table", path.display(), table);
            }
        }

        log::info!("db: opened {} read-only", path.display());
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub(crate) fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}
