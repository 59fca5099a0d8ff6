//! In-memory directory store
//!
//! Useful for testing without database dependencies and for `serve --in-memory`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::models::{Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch};

use super::repository::{
    duplicate_detail_message, HospitalDetailRepository, HospitalQuery, HospitalRepository,
};

/// In-memory implementation of the directory repositories
///
/// Records are kept in `Vec`s so listing returns insertion order.
pub struct MemoryStore {
    hospitals: RwLock<Vec<Hospital>>,
    details: RwLock<Vec<HospitalDetail>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            hospitals: RwLock::new(Vec::new()),
            details: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| Error::storage("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| Error::storage("in-memory store lock poisoned"))
}

impl HospitalRepository for MemoryStore {
    fn find(&self, query: &HospitalQuery) -> Result<Vec<Hospital>> {
        let hospitals = read(&self.hospitals)?;
        Ok(hospitals
            .iter()
            .filter(|h| query.matches(h))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Hospital>> {
        let hospitals = read(&self.hospitals)?;
        Ok(hospitals.iter().find(|h| h.id == id).cloned())
    }

    fn insert(&self, hospital: &Hospital) -> Result<()> {
        let mut hospitals = write(&self.hospitals)?;
        if hospitals.iter().any(|h| h.id == hospital.id) {
            return Err(Error::Conflict(format!(
                "Hospital {} already exists",
                hospital.id
            )));
        }

        hospitals.push(hospital.clone());
        Ok(())
    }

    fn update_by_id(&self, id: &str, patch: &HospitalPatch) -> Result<Option<Hospital>> {
        let mut hospitals = write(&self.hospitals)?;
        let Some(slot) = hospitals.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };

        let updated = patch.merged(slot)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    fn delete_by_id(&self, id: &str) -> Result<Option<Hospital>> {
        let mut hospitals = write(&self.hospitals)?;
        let Some(idx) = hospitals.iter().position(|h| h.id == id) else {
            return Ok(None);
        };

        Ok(Some(hospitals.remove(idx)))
    }

    fn count(&self) -> Result<usize> {
        Ok(read(&self.hospitals)?.len())
    }
}

impl HospitalDetailRepository for MemoryStore {
    fn find_by_hospital_id(&self, hospital_id: &str) -> Result<Option<HospitalDetail>> {
        let details = read(&self.details)?;
        Ok(details
            .iter()
            .find(|d| d.hospital_id == hospital_id)
            .cloned())
    }

    fn insert_detail(&self, detail: &HospitalDetail) -> Result<()> {
        let mut details = write(&self.details)?;
        if details.iter().any(|d| d.hospital_id == detail.hospital_id) {
            return Err(Error::Conflict(duplicate_detail_message(&detail.hospital_id)));
        }

        details.push(detail.clone());
        Ok(())
    }

    fn update_by_hospital_id(
        &self,
        hospital_id: &str,
        patch: &HospitalDetailPatch,
    ) -> Result<Option<HospitalDetail>> {
        let mut details = write(&self.details)?;
        let Some(slot) = details.iter_mut().find(|d| d.hospital_id == hospital_id) else {
            return Ok(None);
        };

        let updated = patch.merged(slot)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }
}
