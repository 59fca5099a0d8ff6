//! Persistence for hospitals and their detail records
//!
//! Two collections live behind the [`repository`] traits:
//!
//! - `hospitals` - one row per facility
//! - `hospital_details` - extended information keyed by `hospital_id`
//!
//! The reference from a detail record to its hospital is not enforced here;
//! detail records may outlive the hospital they point to.
//!
//! Backends:
//!
//! - [`SqliteStore`] - file-backed store used by the server
//! - [`MemoryStore`] - in-process store for tests and throwaway runs

pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::MemoryStore;
pub use repository::{
    create_memory_store, create_sqlite_store, DirectoryStore, HospitalDetailRepository,
    HospitalQuery, HospitalRepository, SharedStore,
};
pub use sqlite::SqliteStore;
