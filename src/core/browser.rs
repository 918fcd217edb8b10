//! Browse controller: pages through a catalog listing and derives the view.
//!
//! Fetches are never cancelled. Every page request gets a ticket from a
//! generation counter and only the response to the latest ticket is applied.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::filters::{FilterSpec, Membership, SortKey, SortSpec, derive_view};
use super::paging::{PageRequest, SourceChunking, SourceWindow, map_display_page_to_source};
use crate::backends::{CatalogQuery, CatalogSource};
use crate::constants::FEATURED_CANDIDATES;
use crate::models::Record;
use crate::utils::errors::{FetchError, ValidationError};

/// Fetch every source page a window covers and cut the display page out.
///
/// Source pages are requested concurrently and joined in numeric order. If
/// any of them fails the whole page fails; a short or empty later page only
/// shortens the result. Slicing happens over source positions, so entries the
/// adapter skipped leave a gap instead of shifting later pages.
pub async fn fetch_window<S: CatalogSource + ?Sized>(
    source: &S,
    query: &CatalogQuery,
    window: SourceWindow,
) -> Result<Vec<Record>, FetchError> {
    debug!(
        "Fetching {} source page(s) {:?} of {}",
        window.chunk_count(),
        window.source_pages(),
        query
    );

    let chunks = try_join_all(
        window
            .source_pages()
            .map(|source_page| source.fetch_slots(query, source_page)),
    )
    .await?;

    let concatenated: Vec<Option<Record>> = chunks.into_iter().flatten().collect();
    Ok(window.slice(&concatenated).iter().flatten().cloned().collect())
}

/// Identifies one page request so its response can be matched to it later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    display_page: u32,
    window: SourceWindow,
}

impl PageTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn display_page(&self) -> u32 {
        self.display_page
    }

    pub fn window(&self) -> SourceWindow {
        self.window
    }
}

/// Monotonic request counter; the most recently issued ticket wins
#[derive(Debug, Default)]
pub struct PageTracker {
    latest: u64,
}

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, request: PageRequest, chunking: SourceChunking) -> PageTicket {
        self.latest += 1;
        PageTicket {
            generation: self.latest,
            display_page: request.display_page(),
            window: map_display_page_to_source(request, chunking),
        }
    }

    pub fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.generation == self.latest
    }

    /// Make every outstanding ticket stale without issuing a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(FetchError),
}

/// Browsing state for one catalog listing.
///
/// Holds the last successfully loaded display page as the working set. The
/// filter and sort are reapplied on every `view` call without refetching.
#[derive(Debug)]
pub struct CatalogBrowser<S: CatalogSource + ?Sized> {
    source: Arc<S>,
    query: CatalogQuery,
    display_page_size: usize,
    chunking: SourceChunking,
    current_page: u32,
    records: Vec<Record>,
    filter: FilterSpec,
    sort: SortSpec,
    state: ViewState,
    tracker: PageTracker,
}

impl<S: CatalogSource + ?Sized> CatalogBrowser<S> {
    pub fn new(
        source: Arc<S>,
        query: CatalogQuery,
        display_page_size: usize,
    ) -> Result<Self, ValidationError> {
        // Validate the page size up front so later requests only fail on the page number
        PageRequest::new(1, display_page_size)?;
        let chunking = SourceChunking::new(source.chunk_size())?;

        Ok(Self {
            source,
            query,
            display_page_size,
            chunking,
            current_page: 1,
            records: Vec::new(),
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            state: ViewState::Idle,
            tracker: PageTracker::new(),
        })
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Last display page that loaded successfully
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn display_page_size(&self) -> usize {
        self.display_page_size
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The unfiltered working set
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Switch listing. Outstanding responses for the old listing become stale.
    pub fn set_query(&mut self, query: CatalogQuery) {
        info!("Switching listing from {} to {}", self.query, query);
        self.query = query;
        self.current_page = 1;
        self.records.clear();
        self.state = ViewState::Idle;
        self.tracker.invalidate();
    }

    /// Start a page request and mark the view as loading
    pub fn begin_page(&mut self, display_page: i64) -> Result<PageTicket, ValidationError> {
        let request = PageRequest::new(display_page, self.display_page_size)?;
        let ticket = self.tracker.issue(request, self.chunking);
        self.state = ViewState::Loading;
        Ok(ticket)
    }

    /// Apply a fetch result. Returns false when the ticket was superseded and
    /// the result was discarded.
    pub fn complete_page(
        &mut self,
        ticket: PageTicket,
        result: Result<Vec<Record>, FetchError>,
    ) -> bool {
        if !self.tracker.is_current(&ticket) {
            debug!(
                "Discarding stale response for page {} (generation {}, latest {})",
                ticket.display_page, ticket.generation, self.tracker.latest
            );
            return false;
        }

        match result {
            Ok(records) => {
                debug!("Page {} ready with {} records", ticket.display_page, records.len());
                self.current_page = ticket.display_page;
                self.records = records;
                self.state = ViewState::Ready;
            }
            Err(e) => {
                warn!("Failed to load page {} of {}: {}", ticket.display_page, self.query, e);
                self.records.clear();
                self.state = ViewState::Failed(e);
            }
        }
        true
    }

    pub async fn go_to_page(&mut self, display_page: i64) -> Result<(), ValidationError> {
        let ticket = self.begin_page(display_page)?;
        let result = fetch_window(self.source.as_ref(), &self.query, ticket.window()).await;
        self.complete_page(ticket, result);
        Ok(())
    }

    pub async fn next_page(&mut self) -> Result<(), ValidationError> {
        self.go_to_page(i64::from(self.current_page) + 1).await
    }

    /// Go back one page, staying on page 1 when already there
    pub async fn previous_page(&mut self) -> Result<(), ValidationError> {
        let target = i64::from(self.current_page.saturating_sub(1).max(1));
        self.go_to_page(target).await
    }

    pub async fn reload(&mut self) -> Result<(), ValidationError> {
        self.go_to_page(i64::from(self.current_page)).await
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    /// Clear the filter and return to the default sort
    pub fn reset_filters(&mut self) {
        self.filter = FilterSpec::default();
        self.sort = SortSpec::default();
    }

    pub fn select_sort(&mut self, key: SortKey) -> SortSpec {
        self.sort = self.sort.cycle(key);
        self.sort
    }

    pub fn view<M: Membership + ?Sized>(&self, collections: &M) -> Vec<Record> {
        derive_view(&self.records, &self.filter, &self.sort, collections)
    }
}

/// Pick the highlighted record from the head of a listing.
///
/// `roll` is a uniform draw in `[0, 1)`; values outside are clamped.
pub fn featured_pick(records: &[Record], roll: f64) -> Option<&Record> {
    let candidates = records.len().min(FEATURED_CANDIDATES);
    if candidates == 0 {
        return None;
    }
    let roll = if roll.is_nan() { 0.0 } else { roll.clamp(0.0, 1.0) };
    let index = ((roll * candidates as f64) as usize).min(candidates - 1);
    records.get(index)
}
