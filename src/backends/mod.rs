pub mod tmdb;
pub mod traits;

// Re-export commonly used types
pub use tmdb::{ImageUrls, TmdbClient};
pub use traits::{CatalogQuery, CatalogSource, TrailerSource, VideoRef};
