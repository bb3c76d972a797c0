//! Shared utilities

pub mod error;
pub mod json;
pub mod time;

pub use error::{TypesError, TypesResult};
pub use json::decode_records;
pub use time::json_to_datetime;
