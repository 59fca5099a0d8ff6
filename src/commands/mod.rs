pub mod browse;
pub mod serve;

// Re-export command functions for convenience
pub use browse::{add, cities, client, delete, list, show, AddParams};
pub use serve::{serve, ServeParams};
