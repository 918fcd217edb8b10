use async_trait::async_trait;
use cinetech::{CatalogQuery, CatalogSource, FetchError, Record};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory catalog serving a fixed listing in chunks
#[derive(Debug)]
pub struct ScriptedSource {
    chunk_size: usize,
    listing: Vec<Record>,
    errors: Mutex<HashMap<u32, FetchError>>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl ScriptedSource {
    pub fn new(chunk_size: usize, listing: Vec<Record>) -> Self {
        Self {
            chunk_size,
            listing,
            errors: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every request for `source_page` fail until cleared
    pub fn inject_error(&self, source_page: u32, error: FetchError) {
        self.errors.lock().unwrap().insert(source_page, error);
    }

    pub fn clear_errors(&self) {
        self.errors.lock().unwrap().clear();
    }

    /// Source pages requested so far, in call order
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }

    pub fn requested_categories(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    async fn fetch_chunk(
        &self,
        query: &CatalogQuery,
        source_page: u32,
    ) -> Result<Vec<Record>, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.category.clone(), source_page));

        if let Some(error) = self.errors.lock().unwrap().get(&source_page) {
            return Err(error.clone());
        }

        let start = (source_page as usize - 1) * self.chunk_size;
        Ok(self
            .listing
            .iter()
            .skip(start)
            .take(self.chunk_size)
            .cloned()
            .collect())
    }
}
