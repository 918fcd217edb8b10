// Paging and storage constants shared by the config defaults and the engine

// === Paging ===
/// Records shown per display page
pub const DEFAULT_DISPLAY_PAGE_SIZE: usize = 10;
/// Records per page served by the catalog
pub const DEFAULT_SOURCE_CHUNK_SIZE: usize = 20;

// === Featured pick ===
/// The featured record is drawn from this many leading entries of a listing
pub const FEATURED_CANDIDATES: usize = 5;

// === Storage ===
pub const APP_DIR_NAME: &str = "cinetech";
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

// === Images ===
pub const POSTER_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";
