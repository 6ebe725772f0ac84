//! Queue manager over the JSON file store
//!
//! Simulates app restarts: each manager is dropped and a new one is built
//! over the same file.

use cadence_queue::{QueueManager, QueuePosition, RepeatMode, StateStore, Track};
use cadence_storage::JsonFileStore;
use std::fs;
use tempfile::TempDir;

fn create_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| Track::new(*id, 200)).collect()
}

#[test]
fn test_queue_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.json");

    let (state, up_next) = {
        let mut manager = QueueManager::new(JsonFileStore::open(&path).unwrap());
        manager.set_queue(create_tracks(&["a", "b", "c", "d"]), 1);
        manager.shuffle();
        manager.next();
        manager.add_to_queue(Track::new("e", 100), QueuePosition::Next);
        manager.set_repeat_mode(RepeatMode::One);

        let up_next: Vec<String> = manager.up_next(5).iter().map(|t| t.id.clone()).collect();
        (manager.state().clone(), up_next)
    };

    let restored = QueueManager::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(restored.state(), &state);
    let restored_up_next: Vec<String> = restored.up_next(5).iter().map(|t| t.id.clone()).collect();
    assert_eq!(restored_up_next, up_next);
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.json");
    fs::write(&path, "{{{{").unwrap();

    let mut manager = QueueManager::new(JsonFileStore::open(&path).unwrap());
    assert!(manager.is_empty());

    // First mutation rewrites the file
    manager.set_queue(create_tracks(&["a"]), 0);
    let restored = QueueManager::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(restored.current_track().unwrap().id, "a");
}

#[test]
fn test_other_keys_are_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.json");

    let store = JsonFileStore::open(&path).unwrap();
    store.set("ui.theme", "\"dark\"").unwrap();

    let mut manager = QueueManager::new(store);
    manager.set_queue(create_tracks(&["a", "b"]), 0);

    let store = JsonFileStore::new(&path);
    assert_eq!(store.get("ui.theme").unwrap().as_deref(), Some("\"dark\""));
    assert!(store.load("cadence.queue.state").unwrap().is_some());
}
