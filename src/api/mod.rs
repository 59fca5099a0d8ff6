//! HTTP API for the hospital directory
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Directory Server                │
//! │                                              │
//! │  ┌────────────────────────────────────────┐  │
//! │  │               REST API                 │  │
//! │  │  GET    /api/v1/hospitals              │  │
//! │  │  GET    /api/v1/hospitals/{id}         │  │
//! │  │  POST   /api/v1/hospitals/create       │  │
//! │  │  PUT    /api/v1/hospitals/update       │  │
//! │  │  DELETE /api/v1/hospitals/delete       │  │
//! │  │  GET    /api/v1/hospitals/details/{id} │  │
//! │  │  POST   /api/v1/hospitals/details      │  │
//! │  │  PUT    /api/v1/hospitals/details/update│ │
//! │  └────────────────────────────────────────┘  │
//! │                     │                        │
//! │  ┌────────────────────────────────────────┐  │
//! │  │        DirectoryStore (shared)         │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hospital_directory::api::{DirectoryServer, ServerConfig};
//! use hospital_directory::storage::create_memory_store;
//!
//! let server = DirectoryServer::new(ServerConfig::default(), create_memory_store())?;
//! server.start_with_shutdown(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export main types
pub use config::ServerConfig;
pub use error::ErrorResponse;
pub use routes::{create_router, DeleteResponse, API_PREFIX};
pub use server::{AppState, DirectoryServer, ServerError};
