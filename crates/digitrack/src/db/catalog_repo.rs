//! `CatalogStore` implementation over the `catalog_records` table.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};

use super::{Database, DatabaseError};
use crate::catalog::search::{self, CatalogFilter};
use crate::catalog::{
    normalize_key, Assignment, CatalogRecord, CatalogStore, KeySnapshot, NewCatalogRecord, Stage,
};

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A raw catalog row; timestamps and dates still in their stored text form.
#[derive(Debug, Clone)]
struct CatalogRow {
    id: String,
    file_name: String,
    book_name: String,
    author_name: String,
    year: String,
    stage: String,
    assignee: Option<String>,
    scanned_by: Option<String>,
    digitized_by: Option<String>,
    created_by: Option<String>,
    last_edited_by: Option<String>,
    deadline: Option<String>,
    created_at: String,
    updated_at: String,
}

impl CatalogRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            file_name: row.get("file_name")?,
            book_name: row.get("book_name")?,
            author_name: row.get("author_name")?,
            year: row.get("year")?,
            stage: row.get("stage")?,
            assignee: row.get("assignee")?,
            scanned_by: row.get("scanned_by")?,
            digitized_by: row.get("digitized_by")?,
            created_by: row.get("created_by")?,
            last_edited_by: row.get("last_edited_by")?,
            deadline: row.get("deadline")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<CatalogRecord, DatabaseError> {
        let deadline = self
            .deadline
            .as_deref()
            .map(|d| {
                NaiveDate::parse_from_str(d, DEADLINE_FORMAT).map_err(|e| DatabaseError::Decode {
                    column: "deadline".to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(CatalogRecord {
            id: self.id,
            file_name: self.file_name,
            book_name: self.book_name,
            author_name: self.author_name,
            year: self.year,
            stage: Stage::from(self.stage),
            assignee: self.assignee,
            scanned_by: self.scanned_by,
            digitized_by: self.digitized_by,
            created_by: self.created_by,
            last_edited_by: self.last_edited_by,
            deadline,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Decode {
            column: column.to_string(),
            reason: e.to_string(),
        })
}

fn format_deadline(deadline: Option<NaiveDate>) -> Option<String> {
    deadline.map(|d| d.format(DEADLINE_FORMAT).to_string())
}

fn insert_row(
    conn: &Connection,
    record: &NewCatalogRecord,
    now: DateTime<Utc>,
) -> Result<CatalogRecord, DatabaseError> {
    let id = uuid::Uuid::new_v4().to_string();
    let timestamp = now.to_rfc3339();
    conn.execute(
        "INSERT INTO catalog_records (id, file_name, file_name_key, book_name, author_name, year,
         stage, assignee, scanned_by, digitized_by, created_by, last_edited_by, deadline,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
        params![
            id,
            record.file_name,
            normalize_key(&record.file_name),
            record.book_name,
            record.author_name,
            record.year,
            record.stage.label(),
            record.assignee,
            record.scanned_by,
            record.digitized_by,
            record.created_by,
            record.last_edited_by,
            format_deadline(record.deadline),
            timestamp,
        ],
    )?;

    // Round-trip through RFC 3339 so the returned value equals what a
    // later read produces.
    let stored_at = parse_timestamp("created_at", &timestamp)?;
    Ok(CatalogRecord {
        id,
        file_name: record.file_name.clone(),
        book_name: record.book_name.clone(),
        author_name: record.author_name.clone(),
        year: record.year.clone(),
        stage: record.stage.clone(),
        assignee: record.assignee.clone(),
        scanned_by: record.scanned_by.clone(),
        digitized_by: record.digitized_by.clone(),
        created_by: record.created_by.clone(),
        last_edited_by: record.last_edited_by.clone(),
        deadline: record.deadline,
        created_at: stored_at,
        updated_at: stored_at,
    })
}

fn find_by_key(conn: &Connection, key: &str) -> Result<Option<CatalogRecord>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT * FROM catalog_records WHERE file_name_key = ?1")?;
    let mut rows = stmt.query_map(params![key], CatalogRow::from_row)?;
    match rows.next() {
        Some(Ok(row)) => Ok(Some(row.into_record()?)),
        Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
        None => Ok(None),
    }
}

impl CatalogStore for Database {
    fn existing_keys(&self) -> Result<KeySnapshot, DatabaseError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT file_name FROM catalog_records")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names.into_iter().collect())
        })
    }

    fn file_name_exists(&self, file_name: &str) -> Result<bool, DatabaseError> {
        self.with_conn(|conn| {
            let count: u64 = conn.query_row(
                "SELECT COUNT(*) FROM catalog_records WHERE file_name_key = ?1",
                params![normalize_key(file_name)],
                |r| r.get(0),
            )?;
            Ok(count > 0)
        })
    }

    fn insert_one(&self, record: &NewCatalogRecord) -> Result<CatalogRecord, DatabaseError> {
        self.with_conn(|conn| insert_row(conn, record, Utc::now()))
    }

    fn insert_many(
        &self,
        records: &[NewCatalogRecord],
    ) -> Result<Vec<CatalogRecord>, DatabaseError> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let now = Utc::now();
            let mut stored = Vec::with_capacity(records.len());
            for record in records {
                // Dropping `tx` on error rolls the whole batch back.
                stored.push(insert_row(&tx, record, now)?);
            }
            tx.commit()?;
            log::debug!("Inserted {} catalog records", stored.len());
            Ok(stored)
        })
    }

    fn list(&self, filter: &CatalogFilter) -> Result<Vec<CatalogRecord>, DatabaseError> {
        let rows = self.with_conn(|conn| {
            let mut conditions = Vec::new();
            let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

            if let Some(ref stage) = filter.stage {
                conditions.push(format!("stage = ?{}", param_values.len() + 1));
                param_values.push(Box::new(stage.label().to_string()));
            }
            if let Some(ref assignee) = filter.assignee {
                conditions.push(format!("assignee = ?{}", param_values.len() + 1));
                param_values.push(Box::new(assignee.clone()));
            }

            let where_clause = if conditions.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", conditions.join(" AND "))
            };

            let sql = format!(
                "SELECT * FROM catalog_records {} ORDER BY created_at DESC, rowid DESC",
                where_clause
            );
            let params_ref: Vec<&dyn rusqlite::types::ToSql> =
                param_values.iter().map(|p| p.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_ref.as_slice(), CatalogRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let records = rows
            .into_iter()
            .map(CatalogRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        // SQLite's LOWER() only folds ASCII, so text search happens here.
        Ok(search::apply(records, filter))
    }

    fn count(&self) -> Result<u64, DatabaseError> {
        self.with_conn(|conn| {
            let count: u64 =
                conn.query_row("SELECT COUNT(*) FROM catalog_records", [], |r| r.get(0))?;
            Ok(count)
        })
    }

    fn find_by_file_name(&self, file_name: &str) -> Result<Option<CatalogRecord>, DatabaseError> {
        self.with_conn(|conn| find_by_key(conn, &normalize_key(file_name)))
    }

    fn update_stage(
        &self,
        file_name: &str,
        stage: &Stage,
        actor: Option<&str>,
    ) -> Result<Option<CatalogRecord>, DatabaseError> {
        let key = normalize_key(file_name);
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE catalog_records
                 SET stage = ?2, last_edited_by = COALESCE(?3, last_edited_by), updated_at = ?4
                 WHERE file_name_key = ?1",
                params![key, stage.label(), actor, Utc::now().to_rfc3339()],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            find_by_key(conn, &key)
        })
    }

    fn update_assignment(
        &self,
        file_name: &str,
        assignment: &Assignment,
        actor: Option<&str>,
    ) -> Result<Option<CatalogRecord>, DatabaseError> {
        let key = normalize_key(file_name);
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE catalog_records
                 SET assignee = COALESCE(?2, assignee),
                     scanned_by = COALESCE(?3, scanned_by),
                     digitized_by = COALESCE(?4, digitized_by),
                     deadline = COALESCE(?5, deadline),
                     last_edited_by = COALESCE(?6, last_edited_by),
                     updated_at = ?7
                 WHERE file_name_key = ?1",
                params![
                    key,
                    assignment.assignee,
                    assignment.scanned_by,
                    assignment.digitized_by,
                    format_deadline(assignment.deadline),
                    actor,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            find_by_key(conn, &key)
        })
    }
}
