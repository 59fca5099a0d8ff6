//! Client, view-models and server running together over real HTTP

use std::sync::Arc;

use tempfile::TempDir;

use hospital_directory::client::ErrorNotifier;
use hospital_directory::directory::{resolve_overview, save_details, DetailForm, HospitalList};
use hospital_directory::models::HospitalPatch;
use hospital_directory::storage::{create_memory_store, create_sqlite_store};

use crate::common::{new_hospital, RecordingNotifier};

use super::fixtures::{client_for, spawn_server};

#[tokio::test]
async fn test_browse_filter_and_delete() {
    let addr = spawn_server(create_memory_store()).await;
    let client = client_for(addr);

    for (name, city) in [
        ("Apollo", "Chennai"),
        ("Fortis", "Delhi"),
        ("Apollo Clinic", "Delhi"),
    ] {
        client.create_hospital(&new_hospital(name, city)).await.unwrap();
    }

    let mut list = HospitalList::new();
    assert_eq!(list.load(&client).await.unwrap(), 3);

    list.set_search("apollo");
    list.select_city("Delhi");
    assert_eq!(list.visible().len(), 1);
    assert_eq!(list.visible()[0].name, "Apollo Clinic");

    let id = list.visible()[0].id.clone();
    let removed = list.delete(&client, &id).await.unwrap();
    assert_eq!(removed.unwrap().name, "Apollo Clinic");
    assert!(list.visible().is_empty());
    assert_eq!(list.hospitals().len(), 2);

    // Server agrees with the optimistic local removal
    assert_eq!(client.list_hospitals(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_side_city_filter() {
    let addr = spawn_server(create_memory_store()).await;
    let client = client_for(addr);

    client.create_hospital(&new_hospital("Apollo", "Chennai")).await.unwrap();
    client.create_hospital(&new_hospital("Fortis", "Delhi")).await.unwrap();

    let chennai = client.list_hospitals(Some("Chennai")).await.unwrap();
    assert_eq!(chennai.len(), 1);
    assert_eq!(chennai[0].name, "Apollo");

    assert!(client.list_hospitals(Some("chennai")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overview_without_details_is_silent() {
    let addr = spawn_server(create_memory_store()).await;
    let notifier = RecordingNotifier::new();
    let client = client_for(addr).with_notifier(Arc::new(notifier.clone()));

    let created = client.create_hospital(&new_hospital("Apollo", "Chennai")).await.unwrap();

    let overview = resolve_overview(&client, &created.id).await.unwrap();
    assert_eq!(overview.hospital, created);
    assert!(!overview.has_details());
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_overview_of_missing_hospital_notifies() {
    let addr = spawn_server(create_memory_store()).await;
    let notifier = RecordingNotifier::new();
    let client = client_for(addr).with_notifier(Arc::new(notifier.clone()));

    let err = resolve_overview(&client, "missing").await.unwrap_err();
    assert!(err.is_not_found());

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].description, "Hospital not found");
    assert_eq!(notices[0].status, Some(404));
}

#[tokio::test]
async fn test_save_details_creates_then_updates() {
    let addr = spawn_server(create_memory_store()).await;
    let client = client_for(addr);
    let created = client.create_hospital(&new_hospital("Apollo", "Chennai")).await.unwrap();

    let mut form = DetailForm::default();
    form.description = "Tertiary care".to_string();
    form.set_image(0, "https://img.example/ward.jpg");
    form.set_doctors("45");
    form.set_departments("12 departments");

    let saved = save_details(&client, &created.id, None, &form).await.unwrap();
    assert_eq!(saved.number_of_departments, 12);

    form.set_doctors("50");
    let updated = save_details(&client, &created.id, Some(&saved), &form)
        .await
        .unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.number_of_doctors, 50);

    let overview = resolve_overview(&client, &created.id).await.unwrap();
    assert_eq!(overview.details, Some(updated));
}

#[tokio::test]
async fn test_sqlite_backed_server() {
    let dir = TempDir::new().unwrap();
    let store = create_sqlite_store(dir.path().join("hospitals.db")).unwrap();
    let addr = spawn_server(store).await;
    let client = client_for(addr);

    let created = client.create_hospital(&new_hospital("Fortis", "Delhi")).await.unwrap();
    let updated = client
        .update_hospital(
            &created.id,
            &HospitalPatch {
                rating: Some(3.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.rating, 3.0);
    assert_eq!(updated.name, "Fortis");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_validation_error_reaches_notifier() {
    let addr = spawn_server(create_memory_store()).await;
    let notifier = RecordingNotifier::new();
    let client = client_for(addr).with_notifier(Arc::new(notifier.clone()) as Arc<dyn ErrorNotifier>);

    let mut input = new_hospital("Apollo", "Chennai");
    input.rating = Some(5.5);

    let err = client.create_hospital(&input).await.unwrap_err();
    assert_eq!(err.status(), Some(400));

    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].description.starts_with("Rating must be between"));
}
