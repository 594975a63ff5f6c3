//! Versioned schema changes for the catalog file.
//!
//! Applied versions are recorded in `_migrations`. Each pending step runs in
//! its own transaction together with its ledger row, so a failed step leaves
//! the file at the previous version.

use rusqlite::{params, Connection};

use super::error::DatabaseError;

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
    guard: Guard,
}

/// Precondition checked before a step's SQL runs.
enum Guard {
    Always,
    /// Only when the column is absent; catalogs patched by hand may have it.
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "create_catalog_records",
        sql: include_str!("sql/001_create_catalog_records.sql"),
        guard: Guard::Always,
    },
    Step {
        version: 2,
        name: "add_catalog_deadline",
        sql: include_str!("sql/002_add_deadline.sql"),
        guard: Guard::MissingColumn {
            table: "catalog_records",
            column: "deadline",
        },
    },
    Step {
        version: 3,
        name: "index_catalog_assignee",
        sql: include_str!("sql/003_index_assignee.sql"),
        guard: Guard::Always,
    },
];

/// Brings the catalog schema up to the latest version.
pub fn run_all(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let applied = schema_version(conn)?;
    for step in STEPS.iter().filter(|s| s.version > applied) {
        apply(conn, step).map_err(|e| DatabaseError::Migration {
            version: step.version,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Highest applied version, 0 for a new file.
pub fn schema_version(conn: &Connection) -> Result<u32, DatabaseError> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |r| r.get(0),
    )?)
}

fn apply(conn: &Connection, step: &Step) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    let needed = match step.guard {
        Guard::Always => true,
        Guard::MissingColumn { table, column } => !has_column(&tx, table, column)?,
    };
    if needed {
        log::info!("Applying catalog migration v{} ({})", step.version, step.name);
        tx.execute_batch(step.sql)?;
    } else {
        log::info!("Catalog migration v{} already in place", step.version);
    }

    tx.execute(
        "INSERT INTO _migrations (version, description) VALUES (?1, ?2)",
        params![step.version, step.name],
    )?;
    tx.commit()?;
    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, DatabaseError> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}
