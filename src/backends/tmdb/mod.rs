mod client;
mod images;
pub mod types;


pub use client::TmdbClient;
pub use images::ImageUrls;
