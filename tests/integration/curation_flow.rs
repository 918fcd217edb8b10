use crate::common::TestContext;
use crate::common::builders::RecordBuilder;
use cinetech::{CollectionKind, PersistencePort, JsonFileStore, Theme};
use std::fs;

#[test]
fn test_collections_survive_restart() {
    let ctx = TestContext::new();
    let dune = RecordBuilder::movie(693134, "Dune: Part Two")
        .popularity(210.5)
        .rating(8.2)
        .released(2024, 2, 27)
        .genres(&[878, 12])
        .build();
    let arcane = RecordBuilder::series(94605, "Arcane").rating(8.7).build();

    {
        let mut store = ctx.open_store();
        store.toggle(CollectionKind::Favorites, &dune);
        store.toggle(CollectionKind::Favorites, &arcane);
        store.toggle(CollectionKind::Watched, &dune);
        store.toggle(CollectionKind::WatchLater, &arcane);
        store.set_theme(Theme::Dark);
        assert!(!store.is_dirty());
    }

    let store = ctx.open_store();
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(
        store.records(CollectionKind::Favorites),
        &[dune.clone(), arcane.clone()]
    );
    assert_eq!(store.records(CollectionKind::Watched), &[dune.clone()]);
    assert_eq!(store.records(CollectionKind::WatchLater), &[arcane.clone()]);

    let flags = store.membership(dune.id);
    assert!(flags.favorite && flags.watched && !flags.watch_later);
}

#[test]
fn test_removal_survives_restart() {
    let ctx = TestContext::new();
    let record = RecordBuilder::movie(1, "Sinners").build();

    let mut store = ctx.open_store();
    store.toggle(CollectionKind::Watched, &record);
    store.toggle(CollectionKind::Watched, &record);
    drop(store);

    let store = ctx.open_store();
    assert!(store.is_empty(CollectionKind::Watched));
}

#[test]
fn test_corrupt_state_file_starts_empty() {
    let ctx = TestContext::new();
    fs::create_dir_all(ctx.state_file().parent().unwrap()).unwrap();
    fs::write(ctx.state_file(), "{\"favorites\": [{\"id\": 12").unwrap();

    let mut store = ctx.open_store();
    for kind in CollectionKind::ALL {
        assert!(store.is_empty(kind));
    }

    // The next write replaces the corrupt document
    let record = RecordBuilder::movie(12, "Ballerina").build();
    store.toggle(CollectionKind::Favorites, &record);
    let reloaded = JsonFileStore::new(ctx.state_file()).try_load().unwrap().unwrap();
    assert_eq!(reloaded.favorites, vec![record]);
}

#[test]
fn test_partially_valid_state_keeps_good_keys() {
    let ctx = TestContext::new();
    fs::create_dir_all(ctx.state_file().parent().unwrap()).unwrap();
    fs::write(
        ctx.state_file(),
        r#"{
            "theme": "dark",
            "favorites": {"unexpected": "shape"},
            "watched": [{"id": 4, "kind": "series", "title": "Severance"}],
            "watchLater": []
        }"#,
    )
    .unwrap();

    let store = ctx.open_store();
    assert_eq!(store.theme(), Theme::Dark);
    assert!(store.is_empty(CollectionKind::Favorites));
    assert_eq!(store.records(CollectionKind::Watched)[0].title, "Severance");
}

#[test]
fn test_unwritable_location_keeps_session_state() {
    let ctx = TestContext::new();
    fs::create_dir_all(ctx.state_file().parent().unwrap()).unwrap();
    // A directory where the file should be makes every rename fail
    fs::create_dir_all(ctx.state_file()).unwrap();

    let mut store = ctx.open_store();
    let record = RecordBuilder::movie(7, "Weapons").build();
    assert!(store.toggle(CollectionKind::WatchLater, &record));
    assert!(store.is_member(CollectionKind::WatchLater, record.id));
    assert!(store.is_dirty());

    fs::remove_dir(ctx.state_file()).unwrap();
    store.flush().unwrap();
    assert!(!store.is_dirty());
    assert_eq!(ctx.open_store().len(CollectionKind::WatchLater), 1);
}
