//! Export encoding adapters.

mod csv;

pub use csv::CsvEncoder;
