//! Common test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::Utc;
use hospital_directory::client::{ErrorNotice, ErrorNotifier};
use hospital_directory::models::{Hospital, NewHospital, NewHospitalDetail};

/// Create a valid create-hospital body
pub fn new_hospital(name: &str, city: &str) -> NewHospital {
    NewHospital {
        name: Some(name.to_string()),
        city: Some(city.to_string()),
        image: Some(format!("https://img.example/{}.jpg", name.to_lowercase())),
        specialty: Some(vec!["Cardiology".to_string(), "Neurology".to_string()]),
        rating: Some(4.5),
    }
}

/// Create a valid create-details body
pub fn new_detail() -> NewHospitalDetail {
    NewHospitalDetail {
        description: Some("Multi-specialty tertiary care".to_string()),
        images: Some(vec!["https://img.example/ward.jpg".to_string()]),
        number_of_doctors: Some(45),
        number_of_departments: Some(12),
    }
}

/// Create a hospital record with a fixed id
pub fn hospital(id: &str, name: &str, city: &str) -> Hospital {
    let now = Utc::now();
    Hospital {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        image: "https://img.example/h.jpg".to_string(),
        specialty: Vec::new(),
        rating: 4.0,
        created_at: now,
        updated_at: now,
    }
}

/// Notifier that records every notice it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<ErrorNotice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<ErrorNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify(&self, notice: &ErrorNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
