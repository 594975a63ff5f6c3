//! SQLite storage for the catalog.
//!
//! A catalog file is opened once per process and shared through a
//! cloneable [`Database`] handle. Opening applies pending migrations and
//! then checks that `catalog_records.file_name_key` is still backed by a
//! UNIQUE index; reconciliation and manual entry both rely on it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;

pub mod catalog_repo;
pub mod error;
pub mod migrations;

pub use error::DatabaseError;

const CATALOG_TABLE: &str = "catalog_records";
const KEY_COLUMN: &str = "file_name_key";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle onto one catalog file. Clones share a single connection, so
/// every read and write is serialized.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the catalog at `path`, creating the file and its parent
    /// directories when missing. File-backed catalogs run in WAL mode.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("Catalog journal mode: {}", mode);

        let db = Self::prepare(conn)?;
        log::info!("Catalog opened at {}", path.display());
        Ok(db)
    }

    /// Throwaway catalog held in memory; used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::run_all(&conn)?;
        verify_unique_key(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with the connection locked.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&conn)
    }
}

/// Fails unless some UNIQUE index on the catalog table covers exactly the
/// normalized file-name key.
fn verify_unique_key(conn: &Connection) -> Result<(), DatabaseError> {
    let mut list = conn.prepare("SELECT name, \"unique\" FROM pragma_index_list(?1)")?;
    let unique_indexes = list
        .query_map(rusqlite::params![CATALOG_TABLE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut info = conn.prepare("SELECT name FROM pragma_index_info(?1)")?;
    for (index, _) in unique_indexes.iter().filter(|(_, unique)| *unique == 1) {
        let columns = info
            .query_map(rusqlite::params![index], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if columns == [KEY_COLUMN] {
            return Ok(());
        }
    }

    Err(DatabaseError::Schema {
        reason: format!("{}.{} is not unique", CATALOG_TABLE, KEY_COLUMN),
    })
}

/// `~/.digitrack/data/digitrack.db`
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".digitrack").join("data").join("digitrack.db"))
}
