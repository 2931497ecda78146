//! Titanic dataset pipeline stages
//!
//! Extract the passenger CSV from its public mirror, load it into the
//! `default.Titanic` table and describe the report queries run against it.

mod extractor;
mod loader;
mod passenger;
pub mod queries;
pub mod schema;

pub use extractor::{DatasetExtractor, extract_dataset};
pub use loader::{TableStatus, TitanicLoader, insert_statement, load_dataset};
pub use passenger::{Passenger, PassengerParser};
pub use queries::REPORT_QUERIES;
