use chrono::NaiveDate;
use cinetech::{MediaKind, Record};

pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn movie(id: u64, title: &str) -> Self {
        Self {
            record: Record::new(id, MediaKind::Movie, title),
        }
    }

    pub fn series(id: u64, title: &str) -> Self {
        Self {
            record: Record::new(id, MediaKind::Series, title),
        }
    }

    pub fn popularity(mut self, popularity: f64) -> Self {
        self.record.popularity = Some(popularity);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.record.rating_average = Some(rating);
        self
    }

    pub fn released(mut self, year: i32, month: u32, day: u32) -> Self {
        self.record.release_date = NaiveDate::from_ymd_opt(year, month, day);
        self
    }

    pub fn genres(mut self, genres: &[u32]) -> Self {
        self.record = self.record.with_genres(genres.iter().copied());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// A listing of `count` movies numbered from 1, most popular first.
/// Even ids are Action (28), odd ids Drama (18).
pub fn numbered_listing(count: u64) -> Vec<Record> {
    (1..=count)
        .map(|id| {
            let genre: &[u32] = if id % 2 == 0 { &[28] } else { &[18] };
            RecordBuilder::movie(id, &format!("Movie {id}"))
                .popularity((count - id + 1) as f64)
                .rating((id % 10) as f64)
                .genres(genre)
                .build()
        })
        .collect()
}
