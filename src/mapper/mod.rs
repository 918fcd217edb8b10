//! Translation of catalog wire types into domain models
//!
//! External field names never leave this module: the adapter hands raw
//! response types in and gets `Record`s back.

pub mod record_mapper;

pub use record_mapper::{DateTransformer, RecordMapper};
