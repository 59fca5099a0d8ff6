//! Repository Pattern for Database Abstraction
//!
//! This module provides trait-based repository abstractions so the HTTP
//! handlers never talk to a concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       API handlers                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Repository Traits                         │
//! │     HospitalRepository, HospitalDetailRepository            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                ┌─────────────┴─────────────┐
//!                ▼                           ▼
//!       ┌─────────────────┐         ┌─────────────────┐
//!       │     SQLite      │         │    In-memory    │
//!       │  Implementation │         │  Implementation │
//!       └─────────────────┘         └─────────────────┘
//! ```
//!
//! Each trait method corresponds to exactly one storage operation. Patches
//! are merged and re-validated inside the backend so a concurrent writer
//! cannot interleave between the read and the write of an update.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch};

use super::memory::MemoryStore;
use super::sqlite::SqliteStore;

// ============================================================================
// Query Types
// ============================================================================

/// Filter for listing hospitals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalQuery {
    /// Exact, case-sensitive city match
    pub city: Option<String>,
}

impl HospitalQuery {
    /// Match every hospital
    pub fn all() -> Self {
        Self::default()
    }

    /// Match hospitals in exactly this city
    pub fn in_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }

    /// Check a record against the filter
    pub fn matches(&self, hospital: &Hospital) -> bool {
        self.city.as_deref().map_or(true, |city| hospital.city == city)
    }
}

// ============================================================================
// Repository Traits
// ============================================================================

/// Repository for hospital records
///
/// Listing order is the store's natural order: insertion order.
pub trait HospitalRepository: Send + Sync {
    /// List hospitals matching the query
    fn find(&self, query: &HospitalQuery) -> Result<Vec<Hospital>>;

    /// Look up a hospital by primary key
    fn find_by_id(&self, id: &str) -> Result<Option<Hospital>>;

    /// Persist a new, already validated hospital
    fn insert(&self, hospital: &Hospital) -> Result<()>;

    /// Merge a patch into the stored record
    ///
    /// Returns `Ok(None)` if no hospital has this id and a validation error if
    /// the merged record is invalid.
    fn update_by_id(&self, id: &str, patch: &HospitalPatch) -> Result<Option<Hospital>>;

    /// Remove a hospital, returning the removed record
    ///
    /// Detail records referencing it are left in place.
    fn delete_by_id(&self, id: &str) -> Result<Option<Hospital>>;

    /// Count stored hospitals
    fn count(&self) -> Result<usize>;
}

/// Repository for hospital detail records
///
/// At most one detail record exists per hospital id.
pub trait HospitalDetailRepository: Send + Sync {
    /// Look up the detail record referencing a hospital
    fn find_by_hospital_id(&self, hospital_id: &str) -> Result<Option<HospitalDetail>>;

    /// Persist a new detail record
    ///
    /// Fails with [`crate::error::Error::Conflict`] if the hospital already has one.
    fn insert_detail(&self, detail: &HospitalDetail) -> Result<()>;

    /// Merge a patch into the detail record of a hospital
    fn update_by_hospital_id(
        &self,
        hospital_id: &str,
        patch: &HospitalDetailPatch,
    ) -> Result<Option<HospitalDetail>>;
}

/// Everything the API layer needs from a backend
pub trait DirectoryStore: HospitalRepository + HospitalDetailRepository {}

impl<T: HospitalRepository + HospitalDetailRepository> DirectoryStore for T {}

pub(crate) fn duplicate_detail_message(hospital_id: &str) -> String {
    format!("Details already exist for hospital {hospital_id}")
}

// ============================================================================
// Shared Repository Types
// ============================================================================

/// Thread-safe shared store handle
pub type SharedStore = Arc<dyn DirectoryStore>;

/// Create a shared SQLite store
pub fn create_sqlite_store(path: impl AsRef<Path>) -> Result<SharedStore> {
    let store = SqliteStore::new(path)?;
    Ok(Arc::new(store))
}

/// Create a shared in-memory store
pub fn create_memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

// ============================================================================
// Tests
// ============================================================================
