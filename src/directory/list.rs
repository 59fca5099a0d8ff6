//! Hospital list view-model

use crate::client::{ClientError, DirectoryClient};
use crate::models::Hospital;

use super::filter::{CityFilter, HospitalFilter};

/// Shown when filters hide every hospital
pub const NO_MATCHES_MESSAGE: &str = "No hospitals match your search criteria.";

/// Shown when the directory is empty
pub const EMPTY_DIRECTORY_MESSAGE: &str = "There are no hospitals in the database yet.";

/// Fetched collection plus the locally filtered view of it
#[derive(Debug, Clone, Default)]
pub struct HospitalList {
    hospitals: Vec<Hospital>,
    filter: HospitalFilter,
    visible: Vec<Hospital>,
}

impl HospitalList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already fetched collection
    pub fn with_hospitals(hospitals: Vec<Hospital>) -> Self {
        let mut list = Self::new();
        list.replace(hospitals);
        list
    }

    /// Fetch the full collection; city filtering stays client-side
    pub async fn load(&mut self, client: &DirectoryClient) -> Result<usize, ClientError> {
        let hospitals = client.list_hospitals(None).await?;
        tracing::debug!(count = hospitals.len(), "Loaded hospital list");

        self.replace(hospitals);
        Ok(self.hospitals.len())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.refresh();
    }

    /// Select a city; `""` and `"all"` clear the selection
    pub fn select_city(&mut self, selection: &str) {
        self.filter.city = CityFilter::from_selection(selection);
        self.refresh();
    }

    pub fn filter(&self) -> &HospitalFilter {
        &self.filter
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn visible(&self) -> &[Hospital] {
        &self.visible
    }

    /// Drop a hospital from local state without refetching
    pub fn remove(&mut self, id: &str) -> Option<Hospital> {
        let idx = self.hospitals.iter().position(|h| h.id == id)?;
        let removed = self.hospitals.remove(idx);
        self.refresh();
        Some(removed)
    }

    /// Delete on the server, then remove locally
    pub async fn delete(
        &mut self,
        client: &DirectoryClient,
        id: &str,
    ) -> Result<Option<Hospital>, ClientError> {
        client.delete_hospital(id).await?;
        Ok(self.remove(id))
    }

    /// Message to show when nothing is visible
    pub fn empty_state(&self) -> Option<&'static str> {
        if !self.visible.is_empty() {
            return None;
        }

        if self.filter.is_active() {
            Some(NO_MATCHES_MESSAGE)
        } else {
            Some(EMPTY_DIRECTORY_MESSAGE)
        }
    }

    fn replace(&mut self, hospitals: Vec<Hospital>) {
        self.hospitals = hospitals;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = self.filter.apply(&self.hospitals);
    }
}
