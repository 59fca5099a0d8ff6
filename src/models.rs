// Core data structures for the hospital directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Lowest accepted rating (inclusive)
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating (inclusive)
pub const MAX_RATING: f64 = 5.0;

// ============================================================================
// Hospital
// ============================================================================

/// Primary directory record for one facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub city: String,
    pub image: String,
    #[serde(default)]
    pub specialty: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    /// Check every schema constraint, reporting the first offending field
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name, "Hospital name is required")?;
        require_non_empty("city", &self.city, "City is required")?;
        require_non_empty("image", &self.image, "Image URL is required")?;
        validate_rating(self.rating)
    }
}

/// Body of a create-hospital request
///
/// Every field is optional on the wire so that an absent field surfaces as a
/// validation error naming it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHospital {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl NewHospital {
    /// Build a validated record with a fresh id and timestamps
    pub fn into_hospital(self) -> Result<Hospital, ValidationError> {
        let now = Utc::now();
        let hospital = Hospital {
            id: Uuid::new_v4().to_string(),
            name: trimmed(self.name),
            city: trimmed(self.city),
            image: self.image.unwrap_or_default(),
            specialty: self.specialty.unwrap_or_default(),
            rating: self.rating.unwrap_or(MIN_RATING),
            created_at: now,
            updated_at: now,
        };

        hospital.validate()?;
        Ok(hospital)
    }
}

/// Partial update for a hospital; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl HospitalPatch {
    /// Merge into `current`, re-validate, and bump `updated_at`
    pub fn merged(&self, current: &Hospital) -> Result<Hospital, ValidationError> {
        let mut merged = current.clone();

        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(city) = &self.city {
            merged.city = city.trim().to_string();
        }
        if let Some(image) = &self.image {
            merged.image = image.clone();
        }
        if let Some(specialty) = &self.specialty {
            merged.specialty = specialty.clone();
        }
        if let Some(rating) = self.rating {
            merged.rating = rating;
        }

        merged.validate()?;
        merged.updated_at = Utc::now();
        Ok(merged)
    }
}

impl From<NewHospital> for HospitalPatch {
    fn from(new: NewHospital) -> Self {
        Self {
            name: new.name,
            city: new.city,
            image: new.image,
            specialty: new.specialty,
            rating: new.rating,
        }
    }
}

// ============================================================================
// Hospital Detail
// ============================================================================

/// Extended, optional information attached to one hospital
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDetail {
    pub id: String,
    pub hospital_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub number_of_doctors: u32,
    #[serde(default)]
    pub number_of_departments: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create-details request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHospitalDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_doctors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_departments: Option<i64>,
}

impl NewHospitalDetail {
    /// Build a validated detail record referencing `hospital_id`
    ///
    /// The referenced hospital is not checked for existence.
    pub fn into_detail(self, hospital_id: &str) -> Result<HospitalDetail, ValidationError> {
        let hospital_id = hospital_id.trim();
        if hospital_id.is_empty() {
            return Err(ValidationError::new("hospitalId", "Hospital id is required"));
        }

        let now = Utc::now();
        Ok(HospitalDetail {
            id: Uuid::new_v4().to_string(),
            hospital_id: hospital_id.to_string(),
            description: self.description.map(|d| d.trim().to_string()),
            images: self.images.unwrap_or_default(),
            number_of_doctors: count_field("numberOfDoctors", self.number_of_doctors.unwrap_or(0))?,
            number_of_departments: count_field(
                "numberOfDepartments",
                self.number_of_departments.unwrap_or(0),
            )?,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update for a detail record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDetailPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_doctors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_departments: Option<i64>,
}

impl HospitalDetailPatch {
    /// Merge into `current`, re-validate, and bump `updated_at`
    pub fn merged(&self, current: &HospitalDetail) -> Result<HospitalDetail, ValidationError> {
        let mut merged = current.clone();

        if let Some(description) = &self.description {
            merged.description = Some(description.trim().to_string());
        }
        if let Some(images) = &self.images {
            merged.images = images.clone();
        }
        if let Some(doctors) = self.number_of_doctors {
            merged.number_of_doctors = count_field("numberOfDoctors", doctors)?;
        }
        if let Some(departments) = self.number_of_departments {
            merged.number_of_departments = count_field("numberOfDepartments", departments)?;
        }

        merged.updated_at = Utc::now();
        Ok(merged)
    }
}

impl From<HospitalDetailPatch> for NewHospitalDetail {
    fn from(patch: HospitalDetailPatch) -> Self {
        Self {
            description: patch.description,
            images: patch.images,
            number_of_doctors: patch.number_of_doctors,
            number_of_departments: patch.number_of_departments,
        }
    }
}

// ============================================================================
// Field validation helpers
// ============================================================================

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn require_non_empty(field: &str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::new(
            "rating",
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
        ));
    }
    Ok(())
}

fn count_field(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .map_err(|_| ValidationError::new(field, format!("{field} must be a non-negative integer")))
}
