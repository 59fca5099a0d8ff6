//! hospital-directory - Hospital directory service
//!
//! A CRUD directory of hospitals and their optional detail records, served
//! over a small REST API, with a typed client and the list/filter logic the
//! browsing front end uses.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Hospital and detail records with their validation
//! - [`storage`] - Store traits plus SQLite and in-memory backends
//! - [`api`] - REST routes, error mapping and the HTTP server
//! - [`client`] - Typed API client with a global error hook
//! - [`directory`] - Client-side list filtering, page resolution and forms
//!
//! # Example
//!
//! ```no_run
//! use hospital_directory::api::DirectoryServer;
//! use hospital_directory::config::Config;
//! use hospital_directory::storage::create_sqlite_store;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = create_sqlite_store(&config.database.sqlite_path)?;
//!     let server = DirectoryServer::new(config.server, store)?;
//!     server
//!         .start_with_shutdown(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{DirectoryServer, ServerConfig};
    pub use crate::client::{ClientConfig, ClientError, DirectoryClient, ErrorNotifier};
    pub use crate::config::Config;
    pub use crate::directory::{HospitalFilter, HospitalList};
    pub use crate::error::{DirectoryErrorTrait, Error, ErrorCategory, Result};
    pub use crate::models::{Hospital, HospitalDetail, NewHospital, NewHospitalDetail};
    pub use crate::storage::{DirectoryStore, SharedStore};
}

// Direct re-exports for convenience
pub use models::{Hospital, HospitalDetail};
