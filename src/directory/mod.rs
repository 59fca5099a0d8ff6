//! Directory views: list filtering, hospital pages and form state
//!
//! These are the client-side view-models behind the browse commands. They
//! hold plain values and talk to the API only through [`crate::client`].

pub mod detail;
pub mod filter;
pub mod form;
pub mod list;

pub use detail::{resolve_overview, save_details, HospitalOverview};
pub use filter::{CityFilter, HospitalFilter, ALL_CITIES};
pub use form::{parse_count, DetailForm, HospitalForm};
pub use list::HospitalList;

/// Cities offered in the city selector
pub const CITY_OPTIONS: &[&str] = &[
    "Chennai",
    "Delhi",
    "Mumbai",
    "Bangalore",
    "Hyderabad",
    "Kolkata",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

/// Specialties offered in the hospital form
pub const SPECIALTY_OPTIONS: &[&str] = &[
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Oncology",
    "Pediatrics",
    "Gynecology",
    "Dermatology",
    "Gastroenterology",
    "Nephrology",
    "Urology",
    "Ophthalmology",
    "ENT",
    "Psychiatry",
    "General Medicine",
    "Emergency Care",
];
