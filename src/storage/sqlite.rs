//! SQLite-backed directory store

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch};

use super::repository::{
    duplicate_detail_message, HospitalDetailRepository, HospitalQuery, HospitalRepository,
};

const HOSPITAL_COLUMNS: &str =
    "id, name, city, image, specialty, rating, created_at, updated_at";

const DETAIL_COLUMNS: &str = "id, hospital_id, description, images, number_of_doctors, \
     number_of_departments, created_at, updated_at";

/// SQLite implementation of the directory repositories
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection. List
/// operations order by the autoincrement `seq` column, which gives insertion
/// order.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite store initialized");
        Ok(store)
    }

    /// Create in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::storage("SQLite connection lock poisoned"))
    }

    /// Create database schema
    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS hospitals (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    city TEXT NOT NULL,
                    image TEXT NOT NULL,
                    specialty TEXT NOT NULL DEFAULT '[]',
                    rating REAL NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_hospitals_city
                    ON hospitals(city);

                CREATE TABLE IF NOT EXISTS hospital_details (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT NOT NULL UNIQUE,
                    hospital_id TEXT NOT NULL UNIQUE,
                    description TEXT,
                    images TEXT NOT NULL DEFAULT '[]',
                    number_of_doctors INTEGER NOT NULL DEFAULT 0,
                    number_of_departments INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                "#,
        )?;

        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

fn hospital_from_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    Ok(Hospital {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        image: row.get(3)?,
        specialty: json_column(row, 4)?,
        rating: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

fn detail_from_row(row: &Row<'_>) -> rusqlite::Result<HospitalDetail> {
    Ok(HospitalDetail {
        id: row.get(0)?,
        hospital_id: row.get(1)?,
        description: row.get(2)?,
        images: json_column(row, 3)?,
        number_of_doctors: row.get(4)?,
        number_of_departments: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn select_hospital(conn: &Connection, id: &str) -> Result<Option<Hospital>> {
    let hospital = conn
        .query_row(
            &format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = ?1"),
            params![id],
            hospital_from_row,
        )
        .optional()?;
    Ok(hospital)
}

fn select_detail(conn: &Connection, hospital_id: &str) -> Result<Option<HospitalDetail>> {
    let detail = conn
        .query_row(
            &format!("SELECT {DETAIL_COLUMNS} FROM hospital_details WHERE hospital_id = ?1"),
            params![hospital_id],
            detail_from_row,
        )
        .optional()?;
    Ok(detail)
}

// ============================================================================
// Repository implementations
// ============================================================================

impl HospitalRepository for SqliteStore {
    fn find(&self, query: &HospitalQuery) -> Result<Vec<Hospital>> {
        let conn = self.conn()?;

        let hospitals = match &query.city {
            Some(city) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE city = ?1 ORDER BY seq"
                ))?;
                let rows = stmt.query_map(params![city], hospital_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {HOSPITAL_COLUMNS} FROM hospitals ORDER BY seq"
                ))?;
                let rows = stmt.query_map([], hospital_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(hospitals)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Hospital>> {
        let conn = self.conn()?;
        select_hospital(&conn, id)
    }

    fn insert(&self, hospital: &Hospital) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
                INSERT INTO hospitals (id, name, city, image, specialty, rating, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            params![
                hospital.id,
                hospital.name,
                hospital.city,
                hospital.image,
                serde_json::to_string(&hospital.specialty)?,
                hospital.rating,
                hospital.created_at.to_rfc3339(),
                hospital.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(id = %hospital.id, "Inserted hospital");
        Ok(())
    }

    fn update_by_id(&self, id: &str, patch: &HospitalPatch) -> Result<Option<Hospital>> {
        let conn = self.conn()?;
        let Some(current) = select_hospital(&conn, id)? else {
            return Ok(None);
        };

        let updated = patch.merged(&current)?;
        conn.execute(
            r#"
                UPDATE hospitals
                SET name = ?2, city = ?3, image = ?4, specialty = ?5, rating = ?6, updated_at = ?7
                WHERE id = ?1
                "#,
            params![
                updated.id,
                updated.name,
                updated.city,
                updated.image,
                serde_json::to_string(&updated.specialty)?,
                updated.rating,
                updated.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(Some(updated))
    }

    fn delete_by_id(&self, id: &str) -> Result<Option<Hospital>> {
        let conn = self.conn()?;
        let Some(existing) = select_hospital(&conn, id)? else {
            return Ok(None);
        };

        conn.execute("DELETE FROM hospitals WHERE id = ?1", params![id])?;
        Ok(Some(existing))
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM hospitals", [], |row| row.get(0))?;
        Ok(total as usize)
    }
}

impl HospitalDetailRepository for SqliteStore {
    fn find_by_hospital_id(&self, hospital_id: &str) -> Result<Option<HospitalDetail>> {
        let conn = self.conn()?;
        select_detail(&conn, hospital_id)
    }

    fn insert_detail(&self, detail: &HospitalDetail) -> Result<()> {
        let conn = self.conn()?;
        if select_detail(&conn, &detail.hospital_id)?.is_some() {
            return Err(Error::Conflict(duplicate_detail_message(&detail.hospital_id)));
        }

        conn.execute(
            r#"
                INSERT INTO hospital_details
                    (id, hospital_id, description, images, number_of_doctors,
                     number_of_departments, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            params![
                detail.id,
                detail.hospital_id,
                detail.description,
                serde_json::to_string(&detail.images)?,
                detail.number_of_doctors,
                detail.number_of_departments,
                detail.created_at.to_rfc3339(),
                detail.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(hospital_id = %detail.hospital_id, "Inserted hospital details");
        Ok(())
    }

    fn update_by_hospital_id(
        &self,
        hospital_id: &str,
        patch: &HospitalDetailPatch,
    ) -> Result<Option<HospitalDetail>> {
        let conn = self.conn()?;
        let Some(current) = select_detail(&conn, hospital_id)? else {
            return Ok(None);
        };

        let updated = patch.merged(&current)?;
        conn.execute(
            r#"
                UPDATE hospital_details
                SET description = ?2, images = ?3, number_of_doctors = ?4,
                    number_of_departments = ?5, updated_at = ?6
                WHERE hospital_id = ?1
                "#,
            params![
                hospital_id,
                updated.description,
                serde_json::to_string(&updated.images)?,
                updated.number_of_doctors,
                updated.number_of_departments,
                updated.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(Some(updated))
    }
}
