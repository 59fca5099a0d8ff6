//! Client-side hospital filtering
//!
//! Two independent filters applied conjunctively: a case-insensitive name
//! substring and a case-insensitive exact city match.

use crate::models::Hospital;

/// Sentinel selection meaning "every city"
pub const ALL_CITIES: &str = "all";

/// City selection of the list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CityFilter {
    #[default]
    All,
    Only(String),
}

impl CityFilter {
    /// Interpret a raw selection; empty and `"all"` disable the filter
    pub fn from_selection(selection: &str) -> Self {
        if selection.is_empty() || selection == ALL_CITIES {
            Self::All
        } else {
            Self::Only(selection.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    fn matches(&self, city: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => city.to_lowercase() == selected.to_lowercase(),
        }
    }
}

/// Search term plus city selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalFilter {
    pub search: String,
    pub city: CityFilter,
}

impl HospitalFilter {
    pub fn new(search: impl Into<String>, city: CityFilter) -> Self {
        Self {
            search: search.into(),
            city,
        }
    }

    /// Whether either filter narrows the collection
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.city.is_active()
    }

    pub fn matches(&self, hospital: &Hospital) -> bool {
        let name_matches = self.search.is_empty()
            || hospital
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        name_matches && self.city.matches(&hospital.city)
    }

    /// Filtered copy of `hospitals`, preserving order
    pub fn apply(&self, hospitals: &[Hospital]) -> Vec<Hospital> {
        hospitals
            .iter()
            .filter(|h| self.matches(h))
            .cloned()
            .collect()
    }
}
