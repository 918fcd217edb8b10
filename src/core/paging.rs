//! Display-page to source-page addressing.
//!
//! The catalog pages in chunks of `source_chunk_size` records while the view
//! shows `display_page_size` records per page. This module only computes
//! addresses; it never fetches.

use std::ops::RangeInclusive;

use crate::utils::errors::ValidationError;

/// A validated display page request (1-based page, non-zero size).
///
/// The records it addresses end at or before absolute position `u32::MAX`,
/// so every source page derived from it fits in a `u32` for any chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    display_page: u32,
    display_page_size: usize,
}

impl PageRequest {
    /// Reject page numbers below 1, pages past the addressable range and
    /// empty pages before they reach the remapper
    pub fn new(display_page: i64, display_page_size: usize) -> Result<Self, ValidationError> {
        let page = u32::try_from(display_page)
            .ok()
            .filter(|page| *page >= 1)
            .ok_or(ValidationError::InvalidPage(display_page))?;
        if display_page_size == 0 {
            return Err(ValidationError::InvalidSpec(
                "display page size must be at least 1".to_string(),
            ));
        }

        let size = u64::try_from(display_page_size)
            .map_err(|_| ValidationError::InvalidSpec("display page size too large".to_string()))?;
        let end = u64::from(page - 1)
            .checked_mul(size)
            .and_then(|offset| offset.checked_add(size));
        match end {
            Some(end) if end <= u64::from(u32::MAX) => Ok(Self {
                display_page: page,
                display_page_size,
            }),
            _ => Err(ValidationError::InvalidPage(display_page)),
        }
    }

    pub fn display_page(&self) -> u32 {
        self.display_page
    }

    pub fn display_page_size(&self) -> usize {
        self.display_page_size
    }

    /// Absolute position of the first wanted record in the catalog listing
    pub fn offset(&self) -> usize {
        (self.display_page as usize - 1) * self.display_page_size
    }
}

/// Page size reported by a catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceChunking {
    source_chunk_size: usize,
}

impl SourceChunking {
    pub fn new(source_chunk_size: usize) -> Result<Self, ValidationError> {
        if source_chunk_size == 0 {
            return Err(ValidationError::InvalidSpec(
                "source chunk size must be at least 1".to_string(),
            ));
        }
        Ok(Self { source_chunk_size })
    }

    pub fn source_chunk_size(&self) -> usize {
        self.source_chunk_size
    }
}

/// Where a display page lives in the source's paging.
///
/// `slice_start..slice_end` indexes into the concatenation of source pages
/// `source_page..=last_source_page`, fetched and joined in numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceWindow {
    pub source_page: u32,
    pub slice_start: usize,
    pub slice_end: usize,
    source_chunk_size: usize,
}

impl SourceWindow {
    /// True when the display page runs past the end of `source_page`
    pub fn spans_next_chunk(&self) -> bool {
        self.slice_end > self.source_chunk_size
    }

    /// Number of consecutive source pages needed to cover the window
    pub fn chunk_count(&self) -> u32 {
        // slice_end <= u32::MAX by PageRequest construction
        self.slice_end.div_ceil(self.source_chunk_size) as u32
    }

    pub fn last_source_page(&self) -> u32 {
        self.source_page + (self.chunk_count() - 1)
    }

    pub fn source_pages(&self) -> RangeInclusive<u32> {
        self.source_page..=self.last_source_page()
    }

    /// Cut the window out of concatenated source pages. A short final chunk
    /// yields a short page rather than a panic.
    pub fn slice<'a, T>(&self, concatenated: &'a [T]) -> &'a [T] {
        let start = self.slice_start.min(concatenated.len());
        let end = self.slice_end.min(concatenated.len());
        &concatenated[start..end]
    }
}

/// Translate a display page into the source page(s) and slice offsets.
///
/// Deterministic for a given `(request, chunking)` pair.
pub fn map_display_page_to_source(request: PageRequest, chunking: SourceChunking) -> SourceWindow {
    let chunk = chunking.source_chunk_size;
    // Bounded by u32::MAX, so the source page below cannot truncate
    let offset = request.offset();
    let slice_start = offset % chunk;

    SourceWindow {
        source_page: (offset / chunk) as u32 + 1,
        slice_start,
        slice_end: slice_start + request.display_page_size,
        source_chunk_size: chunk,
    }
}
