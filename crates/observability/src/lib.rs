//! Tracing/logging initialization for stockops processes and tests.

pub mod tracing;

pub use tracing::{init, init_with_filter};
