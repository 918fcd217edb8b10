pub mod errors;

pub use errors::{FetchError, PersistenceError, ValidationError};
