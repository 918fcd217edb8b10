pub mod collections;
pub mod persistence;

pub use collections::CollectionStore;
pub use persistence::{JsonFileStore, MemoryStore, PersistedState, PersistencePort};
