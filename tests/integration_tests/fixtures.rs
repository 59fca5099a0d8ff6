//! Test fixtures for integration tests
//!
//! Stores that misbehave on purpose, plus helpers to run a real server.

use std::net::SocketAddr;

use hospital_directory::api::{DirectoryServer, ServerConfig};
use hospital_directory::client::{ClientConfig, DirectoryClient};
use hospital_directory::error::{Error, Result};
use hospital_directory::models::{Hospital, HospitalDetail, HospitalDetailPatch, HospitalPatch};
use hospital_directory::storage::{
    HospitalDetailRepository, HospitalQuery, HospitalRepository, SharedStore,
};

/// Store whose every operation fails with a storage error
pub struct FailingStore;

impl HospitalRepository for FailingStore {
    fn find(&self, _query: &HospitalQuery) -> Result<Vec<Hospital>> {
        Err(Error::storage("disk full"))
    }

    fn find_by_id(&self, _id: &str) -> Result<Option<Hospital>> {
        Err(Error::storage("disk full"))
    }

    fn insert(&self, _hospital: &Hospital) -> Result<()> {
        Err(Error::storage("disk full"))
    }

    fn update_by_id(&self, _id: &str, _patch: &HospitalPatch) -> Result<Option<Hospital>> {
        Err(Error::storage("disk full"))
    }

    fn delete_by_id(&self, _id: &str) -> Result<Option<Hospital>> {
        Err(Error::storage("disk full"))
    }

    fn count(&self) -> Result<usize> {
        Err(Error::storage("disk full"))
    }
}

impl HospitalDetailRepository for FailingStore {
    fn find_by_hospital_id(&self, _hospital_id: &str) -> Result<Option<HospitalDetail>> {
        Err(Error::storage("disk full"))
    }

    fn insert_detail(&self, _detail: &HospitalDetail) -> Result<()> {
        Err(Error::storage("disk full"))
    }

    fn update_by_hospital_id(
        &self,
        _hospital_id: &str,
        _patch: &HospitalDetailPatch,
    ) -> Result<Option<HospitalDetail>> {
        Err(Error::storage("disk full"))
    }
}

/// Store that panics on lookups
pub struct PanickingStore;

impl HospitalRepository for PanickingStore {
    fn find(&self, _query: &HospitalQuery) -> Result<Vec<Hospital>> {
        Ok(Vec::new())
    }

    fn find_by_id(&self, _id: &str) -> Result<Option<Hospital>> {
        panic!("corrupted index")
    }

    fn insert(&self, _hospital: &Hospital) -> Result<()> {
        Ok(())
    }

    fn update_by_id(&self, _id: &str, _patch: &HospitalPatch) -> Result<Option<Hospital>> {
        Ok(None)
    }

    fn delete_by_id(&self, _id: &str) -> Result<Option<Hospital>> {
        Ok(None)
    }

    fn count(&self) -> Result<usize> {
        Ok(0)
    }
}

impl HospitalDetailRepository for PanickingStore {
    fn find_by_hospital_id(&self, _hospital_id: &str) -> Result<Option<HospitalDetail>> {
        panic!("corrupted index")
    }

    fn insert_detail(&self, _detail: &HospitalDetail) -> Result<()> {
        Ok(())
    }

    fn update_by_hospital_id(
        &self,
        _hospital_id: &str,
        _patch: &HospitalDetailPatch,
    ) -> Result<Option<HospitalDetail>> {
        Ok(None)
    }
}

/// Serve `store` on an ephemeral local port, returning its address
pub async fn spawn_server(store: SharedStore) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig::builder()
        .bind_address(addr)
        .enable_request_logging(false)
        .build()
        .unwrap();
    let router = DirectoryServer::new(config, store).unwrap().build_router();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// Client pointed at a spawned server
pub fn client_for(addr: SocketAddr) -> DirectoryClient {
    DirectoryClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap()
}
