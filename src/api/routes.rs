//! REST API handlers for the hospital directory
//!
//! This module defines the API routes and handlers. Every handler maps onto a
//! single store operation; not-found and validation outcomes are produced
//! here explicitly, anything else bubbles up as an internal error.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch, NewHospital, NewHospitalDetail,
};
use crate::storage::HospitalQuery;

use super::server::AppState;

/// Base path of the versioned REST surface
pub const API_PREFIX: &str = "/api/v1";

const HOSPITAL: &str = "Hospital";
const HOSPITAL_DETAILS: &str = "Hospital details";

// ============================================================================
// Request / Response Types
// ============================================================================

/// `?city=` filter for the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// `?id=` selector used by the mutating endpoints
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    fn require(self) -> Result<String> {
        match self.id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Error::validation("id", "id query parameter is required")),
        }
    }
}

/// Confirmation returned by the delete endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

fn query_param<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| Error::validation("query", rejection.body_text()))
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| Error::validation("body", rejection.body_text()))
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        // Hospital endpoints
        .route("/hospitals", get(list_hospitals))
        .route("/hospitals/create", post(create_hospital))
        .route("/hospitals/update", put(update_hospital))
        .route("/hospitals/delete", delete(delete_hospital))
        .route("/hospitals/{id}", get(get_hospital))
        // Detail endpoints
        .route(
            "/hospitals/details",
            get(hospital_named_details).post(create_details),
        )
        .route("/hospitals/details/update", put(update_details))
        .route("/hospitals/details/{id}", get(get_details));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/docs", get(api_docs))
        .nest(API_PREFIX, v1)
        .with_state(state)
}

// ============================================================================
// Service Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Human readable endpoint listing
async fn api_docs() -> Html<&'static str> {
    Html(API_DOCS_HTML)
}

// ============================================================================
// Hospital Handlers
// ============================================================================

/// List hospitals, optionally restricted to one city
async fn list_hospitals(
    State(state): State<AppState>,
    query: std::result::Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Vec<Hospital>>> {
    let CityQuery { city } = query_param(query)?;
    // `?city=` with no value means no filter
    let city = city.filter(|c| !c.trim().is_empty());
    let filter = HospitalQuery { city };

    let hospitals = state.store.find(&filter)?;
    tracing::debug!(city = ?filter.city, count = hospitals.len(), "Listed hospitals");

    Ok(Json(hospitals))
}

/// Get a single hospital
async fn get_hospital(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hospital>> {
    state
        .store
        .find_by_id(&id)?
        .map(Json)
        .ok_or_else(|| Error::not_found(HOSPITAL, id))
}

/// `GET /hospitals/details` shadows `/hospitals/{id}`; answer as an id lookup
async fn hospital_named_details(State(state): State<AppState>) -> Result<Json<Hospital>> {
    get_hospital(State(state), Path("details".to_string())).await
}

/// Create a hospital
async fn create_hospital(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewHospital>, JsonRejection>,
) -> Result<(StatusCode, Json<Hospital>)> {
    let hospital = json_body(body)?.into_hospital()?;
    state.store.insert(&hospital)?;

    tracing::info!(id = %hospital.id, name = %hospital.name, "Hospital created");
    Ok((StatusCode::CREATED, Json(hospital)))
}

/// Merge a partial update into a hospital
async fn update_hospital(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
    body: std::result::Result<Json<HospitalPatch>, JsonRejection>,
) -> Result<Json<Hospital>> {
    let id = query_param(query)?.require()?;
    let patch = json_body(body)?;

    let updated = state
        .store
        .update_by_id(&id, &patch)?
        .ok_or_else(|| Error::not_found(HOSPITAL, id.clone()))?;

    tracing::info!(id = %id, "Hospital updated");
    Ok(Json(updated))
}

/// Delete a hospital; its detail record is left in place
async fn delete_hospital(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>> {
    let id = query_param(query)?.require()?;

    let removed = state
        .store
        .delete_by_id(&id)?
        .ok_or_else(|| Error::not_found(HOSPITAL, id.clone()))?;

    tracing::info!(id = %removed.id, name = %removed.name, "Hospital deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Hospital deleted successfully".to_string(),
        id: removed.id,
    }))
}

// ============================================================================
// Detail Handlers
// ============================================================================

/// Get the detail record of a hospital
async fn get_details(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
) -> Result<Json<HospitalDetail>> {
    state
        .store
        .find_by_hospital_id(&hospital_id)?
        .map(Json)
        .ok_or_else(|| Error::not_found(HOSPITAL_DETAILS, hospital_id))
}

/// Attach a detail record to a hospital id
async fn create_details(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
    body: std::result::Result<Json<NewHospitalDetail>, JsonRejection>,
) -> Result<(StatusCode, Json<HospitalDetail>)> {
    let hospital_id = query_param(query)?.require()?;
    let detail = json_body(body)?.into_detail(&hospital_id)?;
    state.store.insert_detail(&detail)?;

    tracing::info!(hospital_id = %hospital_id, "Hospital details created");
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Merge a partial update into the detail record of a hospital
async fn update_details(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
    body: std::result::Result<Json<HospitalDetailPatch>, JsonRejection>,
) -> Result<Json<HospitalDetail>> {
    let hospital_id = query_param(query)?.require()?;
    let patch = json_body(body)?;

    let updated = state
        .store
        .update_by_hospital_id(&hospital_id, &patch)?
        .ok_or_else(|| Error::not_found(HOSPITAL_DETAILS, hospital_id.clone()))?;

    tracing::info!(hospital_id = %hospital_id, "Hospital details updated");
    Ok(Json(updated))
}

const API_DOCS_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Hospital Directory API</title>
    <style>
      body { font-family: sans-serif; line-height: 1.6; margin: 0; padding: 20px; }
      .endpoint { background: #f0f9ff; padding: 10px; border-radius: 5px; margin-bottom: 10px; }
      .method { font-weight: bold; }
      pre { background: #f1f5f9; padding: 10px; border-radius: 5px; }
    </style>
  </head>
  <body>
    <h1>Hospital Directory API</h1>

    <h2>Hospitals</h2>
    <div class="endpoint"><span class="method">GET</span> /api/v1/hospitals<br>List all hospitals (optional <code>?city=</code>)</div>
    <div class="endpoint"><span class="method">GET</span> /api/v1/hospitals/{id}<br>Get one hospital</div>
    <div class="endpoint"><span class="method">POST</span> /api/v1/hospitals/create<br>Create a hospital
<pre>{
  "name": "Hospital Name",
  "city": "City Name",
  "image": "Image URL",
  "specialty": ["Specialty1", "Specialty2"],
  "rating": 4.5
}</pre></div>
    <div class="endpoint"><span class="method">PUT</span> /api/v1/hospitals/update?id={id}<br>Update a hospital (partial body)</div>
    <div class="endpoint"><span class="method">DELETE</span> /api/v1/hospitals/delete?id={id}<br>Delete a hospital</div>

    <h2>Hospital Details</h2>
    <div class="endpoint"><span class="method">GET</span> /api/v1/hospitals/details/{id}<br>Get details for a hospital</div>
    <div class="endpoint"><span class="method">POST</span> /api/v1/hospitals/details?id={id}<br>Add details to a hospital
<pre>{
  "description": "Hospital description",
  "images": ["Image URL 1", "Image URL 2"],
  "numberOfDoctors": 45,
  "numberOfDepartments": 12
}</pre></div>
    <div class="endpoint"><span class="method">PUT</span> /api/v1/hospitals/details/update?id={id}<br>Update details for a hospital</div>
  </body>
</html>
"#;

// ============================================================================
// Tests
// ============================================================================
