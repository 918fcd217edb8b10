use crate::common::builders::numbered_listing;
use crate::common::mocks::ScriptedSource;
use cinetech::core::fetch_window;
use cinetech::{
    CatalogBrowser, CatalogQuery, CollectionKind, CollectionStore, FetchError, FilterSpec,
    Membership, MemoryStore, Record, RecordId, SortKey, StatusFilter, ViewState, featured_pick,
};
use std::sync::Arc;

fn ids(records: &[Record]) -> Vec<u64> {
    records.iter().map(|r| r.id.get()).collect()
}

#[tokio::test]
async fn test_pages_walk_through_listing() {
    let source = Arc::new(ScriptedSource::new(20, numbered_listing(45)));
    let mut browser =
        CatalogBrowser::new(source.clone(), CatalogQuery::now_playing(), 10).unwrap();

    browser.go_to_page(1).await.unwrap();
    assert_eq!(ids(browser.records()), (1..=10).collect::<Vec<_>>());

    browser.next_page().await.unwrap();
    assert_eq!(ids(browser.records()), (11..=20).collect::<Vec<_>>());

    browser.next_page().await.unwrap();
    assert_eq!(ids(browser.records()), (21..=30).collect::<Vec<_>>());

    // Page 5 is the short tail of source page 3
    browser.go_to_page(5).await.unwrap();
    assert_eq!(ids(browser.records()), (41..=45).collect::<Vec<_>>());

    assert_eq!(source.requested_pages(), vec![1, 1, 2, 3]);
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let source = Arc::new(ScriptedSource::new(20, numbered_listing(60)));
    let mut browser =
        CatalogBrowser::new(source.clone(), CatalogQuery::upcoming(), 10).unwrap();

    source.inject_error(2, FetchError::Network("connection reset".to_string()));
    browser.go_to_page(3).await.unwrap();
    assert!(matches!(browser.state(), ViewState::Failed(FetchError::Network(_))));
    assert!(browser.view(&NoCollections).is_empty());

    source.clear_errors();
    browser.reload().await.unwrap();
    assert_eq!(browser.state(), &ViewState::Ready);
    // The failed request never became current, so reload fetches page 1 again
    assert_eq!(browser.current_page(), 1);

    browser.go_to_page(3).await.unwrap();
    assert_eq!(ids(browser.records()), (21..=30).collect::<Vec<_>>());
    assert!(
        source
            .requested_categories()
            .iter()
            .all(|c| c == "movie/upcoming")
    );
}

/// Membership view with nothing in any collection
struct NoCollections;

impl Membership for NoCollections {
    fn is_member(&self, _kind: CollectionKind, _id: RecordId) -> bool {
        false
    }
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest_request() {
    let source = Arc::new(ScriptedSource::new(20, numbered_listing(100)));
    let mut browser =
        CatalogBrowser::new(source.clone(), CatalogQuery::now_playing(), 10).unwrap();

    // User clicks page 2 then page 5 before either response arrives
    let page_two = browser.begin_page(2).unwrap();
    let page_five = browser.begin_page(5).unwrap();
    assert_eq!(browser.state(), &ViewState::Loading);

    let query = browser.query().clone();
    let five = fetch_window(source.as_ref(), &query, page_five.window()).await;
    let two = fetch_window(source.as_ref(), &query, page_two.window()).await;

    assert!(browser.complete_page(page_five, five));
    assert!(!browser.complete_page(page_two, two));

    assert_eq!(browser.current_page(), 5);
    assert_eq!(ids(browser.records()), (41..=50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_filters_compose_with_collections() {
    let source = Arc::new(ScriptedSource::new(20, numbered_listing(20)));
    let mut browser =
        CatalogBrowser::new(source.clone(), CatalogQuery::now_playing(), 20).unwrap();
    browser.go_to_page(1).await.unwrap();

    let mut store = CollectionStore::open(MemoryStore::new());
    for record in &browser.records()[..6] {
        store.toggle(CollectionKind::WatchLater, record);
    }

    browser.set_filter(
        FilterSpec::default()
            .with_genre(28)
            .with_status(StatusFilter::WatchLater),
    );
    // Action titles (even ids) that are also queued, most popular first
    assert_eq!(ids(&browser.view(&store)), vec![2, 4, 6]);

    browser.select_sort(SortKey::Rating);
    assert_eq!(ids(&browser.view(&store)), vec![6, 4, 2]);

    browser.set_filter(FilterSpec::default().with_text("movie 1"));
    let titles: Vec<_> = browser.view(&store).into_iter().map(|r| r.title).collect();
    assert!(titles.iter().all(|t| t.starts_with("Movie 1")));
    assert_eq!(titles.len(), 11);

    browser.reset_filters();
    assert_eq!(browser.view(&store).len(), 20);
    assert_eq!(source.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_featured_pick_from_loaded_page() {
    let source = Arc::new(ScriptedSource::new(20, numbered_listing(20)));
    let mut browser =
        CatalogBrowser::new(source, CatalogQuery::trending_movies(), 10).unwrap();
    browser.go_to_page(1).await.unwrap();

    for roll in [0.0, 0.2, 0.41, 0.6, 0.999] {
        let pick = featured_pick(browser.records(), roll).unwrap();
        assert!(pick.id.get() <= 5);
    }
}
