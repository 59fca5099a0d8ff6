//! Editable form state for hospitals and their detail records

use crate::models::{
    Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch, NewHospital, NewHospitalDetail,
};

/// Placeholder photo offered for new hospitals
pub const DEFAULT_HOSPITAL_IMAGE: &str =
    "https://images.unsplash.com/photo-1626315869436-d6781ba69d6e?q=80&w=2070&auto=format&fit=crop";

/// Rating preselected for new hospitals
pub const DEFAULT_RATING: f64 = 3.5;

// ============================================================================
// Hospital form
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HospitalForm {
    pub name: String,
    pub city: String,
    pub image: String,
    pub specialty: Vec<String>,
    pub rating: f64,
}

impl Default for HospitalForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            city: String::new(),
            image: DEFAULT_HOSPITAL_IMAGE.to_string(),
            specialty: Vec::new(),
            rating: DEFAULT_RATING,
        }
    }
}

impl From<&Hospital> for HospitalForm {
    fn from(hospital: &Hospital) -> Self {
        Self {
            name: hospital.name.clone(),
            city: hospital.city.clone(),
            image: hospital.image.clone(),
            specialty: hospital.specialty.clone(),
            rating: hospital.rating,
        }
    }
}

impl HospitalForm {
    /// Select a specialty, or deselect it if already chosen
    pub fn toggle_specialty(&mut self, value: &str) {
        match self.specialty.iter().position(|s| s == value) {
            Some(idx) => {
                self.specialty.remove(idx);
            }
            None => self.specialty.push(value.to_string()),
        }
    }

    pub fn has_specialty(&self, value: &str) -> bool {
        self.specialty.iter().any(|s| s == value)
    }

    /// Body for a create request
    pub fn to_new_hospital(&self) -> NewHospital {
        NewHospital {
            name: Some(self.name.clone()),
            city: Some(self.city.clone()),
            image: Some(self.image.clone()),
            specialty: Some(self.specialty.clone()),
            rating: Some(self.rating),
        }
    }

    /// Body for an edit request; the whole form is sent
    pub fn to_patch(&self) -> HospitalPatch {
        self.to_new_hospital().into()
    }
}

// ============================================================================
// Detail form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailForm {
    pub description: String,
    image_fields: Vec<String>,
    pub number_of_doctors: i64,
    pub number_of_departments: i64,
}

impl Default for DetailForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            image_fields: vec![String::new()],
            number_of_doctors: 0,
            number_of_departments: 0,
        }
    }
}

impl From<&HospitalDetail> for DetailForm {
    fn from(detail: &HospitalDetail) -> Self {
        let image_fields = if detail.images.is_empty() {
            vec![String::new()]
        } else {
            detail.images.clone()
        };

        Self {
            description: detail.description.clone().unwrap_or_default(),
            image_fields,
            number_of_doctors: i64::from(detail.number_of_doctors),
            number_of_departments: i64::from(detail.number_of_departments),
        }
    }
}

impl DetailForm {
    pub fn image_fields(&self) -> &[String] {
        &self.image_fields
    }

    pub fn add_image_field(&mut self) {
        self.image_fields.push(String::new());
    }

    /// Remove the field at `index`; out of range is ignored
    pub fn remove_image_field(&mut self, index: usize) {
        if index < self.image_fields.len() {
            self.image_fields.remove(index);
        }
    }

    /// Set the field at `index`; out of range is ignored
    pub fn set_image(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.image_fields.get_mut(index) {
            *field = value.into();
        }
    }

    pub fn set_doctors(&mut self, input: &str) {
        self.number_of_doctors = parse_count(input);
    }

    pub fn set_departments(&mut self, input: &str) {
        self.number_of_departments = parse_count(input);
    }

    /// Non-blank image URLs, `None` when there are none
    pub fn submitted_images(&self) -> Option<Vec<String>> {
        let images: Vec<String> = self
            .image_fields
            .iter()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect();

        (!images.is_empty()).then_some(images)
    }

    pub fn to_new_detail(&self) -> NewHospitalDetail {
        NewHospitalDetail {
            description: Some(self.description.clone()),
            images: self.submitted_images(),
            number_of_doctors: Some(self.number_of_doctors),
            number_of_departments: Some(self.number_of_departments),
        }
    }

    pub fn to_patch(&self) -> HospitalDetailPatch {
        HospitalDetailPatch {
            description: Some(self.description.clone()),
            images: self.submitted_images(),
            number_of_doctors: Some(self.number_of_doctors),
            number_of_departments: Some(self.number_of_departments),
        }
    }
}

/// Leading integer of `input`, or 0 when there is none
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}
