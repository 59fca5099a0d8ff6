//! REST API tests driven through the router with `oneshot`

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use hospital_directory::api::{DirectoryServer, ServerConfig};
use hospital_directory::storage::{create_memory_store, SharedStore};

use super::fixtures::{FailingStore, PanickingStore};

fn router_with(store: SharedStore) -> Router {
    DirectoryServer::new(ServerConfig::default(), store)
        .unwrap()
        .build_router()
}

fn router() -> Router {
    router_with(create_memory_store())
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

fn apollo() -> Value {
    json!({
        "name": "Apollo",
        "city": "Chennai",
        "image": "https://img.example/apollo.jpg",
        "specialty": ["Cardiology", "Oncology"],
        "rating": 4.5
    })
}

async fn create(router: &Router, name: &str, city: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/api/v1/hospitals/create",
        Some(json!({
            "name": name,
            "city": city,
            "image": "https://img.example/h.jpg",
            "rating": 4.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// ============================================================================
// Hospitals
// ============================================================================

#[tokio::test]
async fn test_create_then_get_returns_input_plus_generated_fields() {
    let router = router();

    let (status, created) = send(&router, "POST", "/api/v1/hospitals/create", Some(apollo())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let (status, fetched) = send(&router, "GET", &format!("/api/v1/hospitals/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Apollo");
    assert_eq!(fetched["city"], "Chennai");
    assert_eq!(fetched["image"], "https://img.example/apollo.jpg");
    assert_eq!(fetched["specialty"], json!(["Cardiology", "Oncology"]));
    assert_eq!(fetched["rating"], 4.5);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_rating_bounds() {
    let router = router();

    for rating in [0.0, 5.0] {
        let mut body = apollo();
        body["rating"] = json!(rating);
        let (status, _) = send(&router, "POST", "/api/v1/hospitals/create", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "rating {rating} should be accepted");
    }

    let mut body = apollo();
    body["rating"] = json!(5.5);
    let (status, error) = send(&router, "POST", "/api/v1/hospitals/create", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["success"], false);
    assert_eq!(error["field"], "rating");
}

#[tokio::test]
async fn test_empty_name_names_field() {
    let router = router();
    let mut body = apollo();
    body["name"] = json!("");

    let (status, error) = send(&router, "POST", "/api/v1/hospitals/create", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "name");
    assert_eq!(error["message"], "Hospital name is required");
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let router = router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/hospitals/create")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["field"], "body");
}

#[tokio::test]
async fn test_list_in_insertion_order_with_city_filter() {
    let router = router();
    create(&router, "Apollo", "Chennai").await;
    create(&router, "Fortis", "Delhi").await;
    create(&router, "MIOT", "Chennai").await;
    create(&router, "Kauvery", "chennai").await;

    let (status, all) = send(&router, "GET", "/api/v1/hospitals", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apollo", "Fortis", "MIOT", "Kauvery"]);

    let (status, chennai) = send(&router, "GET", "/api/v1/hospitals?city=Chennai", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = chennai
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apollo", "MIOT"]);
}

#[tokio::test]
async fn test_blank_city_query_is_no_filter() {
    let router = router();
    create(&router, "Apollo", "Chennai").await;
    create(&router, "Fortis", "Delhi").await;

    for uri in ["/api/v1/hospitals?city=", "/api/v1/hospitals?city=%20"] {
        let (status, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2, "{uri} should list everything");
    }
}

#[tokio::test]
async fn test_empty_list_is_success() {
    let (status, body) = send(&router(), "GET", "/api/v1/hospitals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_unknown_hospital_is_not_found() {
    let (status, error) = send(&router(), "GET", "/api/v1/hospitals/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["success"], false);
    assert_eq!(error["message"], "Hospital not found");
}

#[tokio::test]
async fn test_get_hospital_with_reserved_segment_is_not_found() {
    let (status, error) = send(&router(), "GET", "/api/v1/hospitals/details", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Hospital not found");
}

#[tokio::test]
async fn test_partial_update_only_changes_rating() {
    let router = router();
    let created = create(&router, "Apollo", "Chennai").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/api/v1/hospitals/update?id={id}"),
        Some(json!({ "rating": 2.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rating"], 2.5);

    for field in ["id", "name", "city", "image", "specialty", "createdAt"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
}

#[tokio::test]
async fn test_update_revalidates_and_reports_missing() {
    let router = router();
    let created = create(&router, "Apollo", "Chennai").await;
    let id = created["id"].as_str().unwrap();

    let (status, error) = send(
        &router,
        "PUT",
        &format!("/api/v1/hospitals/update?id={id}"),
        Some(json!({ "rating": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "rating");

    let (status, _) = send(
        &router,
        "PUT",
        "/api/v1/hospitals/update?id=missing",
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, error) = send(
        &router,
        "PUT",
        "/api/v1/hospitals/update",
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "id");
}

#[tokio::test]
async fn test_delete() {
    let router = router();
    let created = create(&router, "Apollo", "Chennai").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &router,
        "DELETE",
        &format!("/api/v1/hospitals/delete?id={id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Hospital deleted successfully");
    assert_eq!(body["id"], id);

    let (status, _) = send(&router, "GET", &format!("/api/v1/hospitals/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() {
    let (status, error) = send(
        &router(),
        "DELETE",
        "/api/v1/hospitals/delete?id=does-not-exist",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["success"], false);
}

// ============================================================================
// Details
// ============================================================================

#[tokio::test]
async fn test_details_lifecycle() {
    let router = router();
    let created = create(&router, "Apollo", "Chennai").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(&router, "GET", &format!("/api/v1/hospitals/details/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, detail) = send(
        &router,
        "POST",
        &format!("/api/v1/hospitals/details?id={id}"),
        Some(json!({
            "description": "Tertiary care",
            "images": ["https://img.example/1.jpg"],
            "numberOfDoctors": 45,
            "numberOfDepartments": 12
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(detail["hospitalId"], id);
    assert_eq!(detail["numberOfDoctors"], 45);

    let (status, fetched) =
        send(&router, "GET", &format!("/api/v1/hospitals/details/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, detail);

    let (status, updated) = send(
        &router,
        "PUT",
        &format!("/api/v1/hospitals/details/update?id={id}"),
        Some(json!({ "numberOfDoctors": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["numberOfDoctors"], 50);
    assert_eq!(updated["numberOfDepartments"], 12);
    assert_eq!(updated["description"], "Tertiary care");
}

#[tokio::test]
async fn test_second_detail_record_conflicts() {
    let router = router();
    let uri = "/api/v1/hospitals/details?id=h-1";

    let (status, _) = send(&router, "POST", uri, Some(json!({ "numberOfDoctors": 1 }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(&router, "POST", uri, Some(json!({ "numberOfDoctors": 2 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["success"], false);
}

#[tokio::test]
async fn test_malformed_counts_rejected() {
    let router = router();

    let (status, _) = send(
        &router,
        "POST",
        "/api/v1/hospitals/details?id=h-1",
        Some(json!({ "numberOfDoctors": "many" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, error) = send(
        &router,
        "POST",
        "/api/v1/hospitals/details?id=h-1",
        Some(json!({ "numberOfDepartments": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "numberOfDepartments");
}

#[tokio::test]
async fn test_update_missing_details_is_not_found() {
    let (status, _) = send(
        &router(),
        "PUT",
        "/api/v1/hospitals/details/update?id=h-1",
        Some(json!({ "numberOfDoctors": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_keeps_detail_record() {
    let router = router();
    let created = create(&router, "Apollo", "Chennai").await;
    let id = created["id"].as_str().unwrap();

    send(
        &router,
        "POST",
        &format!("/api/v1/hospitals/details?id={id}"),
        Some(json!({ "numberOfDoctors": 5 })),
    )
    .await;
    send(
        &router,
        "DELETE",
        &format!("/api/v1/hospitals/delete?id={id}"),
        None,
    )
    .await;

    let (status, detail) =
        send(&router, "GET", &format!("/api/v1/hospitals/details/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["hospitalId"], id);
}

// ============================================================================
// Service endpoints and failures
// ============================================================================

#[tokio::test]
async fn test_health_and_docs() {
    let router = router();

    let (status, health) = send(&router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert!(health["uptimeSecs"].is_u64());

    let request = Request::builder()
        .uri("/api/docs")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let router = router_with(std::sync::Arc::new(FailingStore));

    let (status, error) = send(&router, "GET", "/api/v1/hospitals", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["success"], false);
    assert_eq!(error["message"], "Something went wrong");
}

#[tokio::test]
async fn test_panic_is_caught() {
    let router = router_with(std::sync::Arc::new(PanickingStore));

    let (status, error) = send(&router, "GET", "/api/v1/hospitals/any", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["message"], "Something went wrong");
}
