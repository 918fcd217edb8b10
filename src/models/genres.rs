//! Genre identifiers offered by the genre filter.

use super::GenreId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: &'static str,
}

const fn genre(id: u32, name: &'static str) -> Genre {
    Genre {
        id: GenreId::new(id),
        name,
    }
}

/// Catalog genre ids exposed in the filter bar
pub const GENRES: &[Genre] = &[
    genre(28, "Action"),
    genre(12, "Adventure"),
    genre(16, "Animation"),
    genre(35, "Comedy"),
    genre(80, "Crime"),
    genre(18, "Drama"),
    genre(14, "Fantasy"),
    genre(27, "Horror"),
    genre(10749, "Romance"),
    genre(878, "Science Fiction"),
];

pub fn genre_name(id: GenreId) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.name)
}
