//! Infrastructure layer: in-memory collaborators behind the bulkops ports.
//!
//! Production deployments wire the real inventory service and spreadsheet
//! encoder here; the in-memory implementations serve tests and local
//! development.

pub mod export;
pub mod store;


pub use export::CsvEncoder;
pub use store::InMemoryInventoryStore;
