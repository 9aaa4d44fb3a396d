use std::path::PathBuf;
use std::time::Duration;

use super::debouncer::{DEBOUNCE_MS, Debouncer};
use super::types::{ChangeKind, DebouncedEvents};

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

#[test]
fn test_debouncer_empty() {
    let debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
}

#[test]
fn test_event_routing_by_kind() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/b.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/c.md"], remove_kind()));

    assert_eq!(debouncer.changes.len(), 3);
    assert_eq!(debouncer.changes[0].1, ChangeKind::Created);
    assert_eq!(debouncer.changes[1].1, ChangeKind::Modified);
    assert_eq!(debouncer.changes[2].1, ChangeKind::Removed);
}

#[test]
fn test_arrival_order_preserved() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/z.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/m.md"], modify_kind()));

    let order: Vec<_> = debouncer.changes.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(
        order,
        vec![
            PathBuf::from("/tmp/z.md"),
            PathBuf::from("/tmp/a.md"),
            PathBuf::from("/tmp/m.md"),
        ]
    );
}

#[test]
fn test_temp_file_ignored() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/real.md"], modify_kind()));
    assert!(debouncer.last_event.is_some());
    let first_time = debouncer.last_event.unwrap();

    std::thread::sleep(Duration::from_millis(5));

    // Temp file event — should NOT update last_event or add to changes
    debouncer.add_event(&make_event(vec!["/tmp/.swp"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/notes.md~"], modify_kind()));
    assert_eq!(debouncer.last_event.unwrap(), first_time);
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_dedup_first_event_wins() {
    let mut debouncer = Debouncer::new();

    // Same path: create then modify — first one (create) wins
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));

    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(debouncer.changes[0].1, ChangeKind::Created);
}

#[test]
fn test_dedup_same_event() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/tmp/a.md", "/tmp/a.md"], modify_kind()));
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_sleep_duration_no_events() {
    let debouncer = Debouncer::new();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_sleep_duration_after_event() {
    let mut debouncer = Debouncer::new();
    debouncer.last_event = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(DEBOUNCE_MS - 10));
    assert!(dur <= Duration::from_millis(DEBOUNCE_MS + 10));
}

#[test]
fn test_remove_then_create_restores() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert_eq!(debouncer.changes[0].1, ChangeKind::Removed);

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(debouncer.changes[0].1, ChangeKind::Created);
}

#[test]
fn test_create_then_remove_discards() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert!(
        debouncer.changes.is_empty(),
        "created+removed should discard"
    );
}

#[test]
fn test_modify_then_remove_upgrades() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.md"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.md"], remove_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(debouncer.changes[0].1, ChangeKind::Removed);
}

#[test]
fn test_metadata_only_change_ignored() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(
        vec!["/tmp/a.md"],
        notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
            notify::event::MetadataKind::Any,
        )),
    ));
    assert!(debouncer.changes.is_empty());
}

#[test]
fn test_live_paths_drop_removals() {
    let events = DebouncedEvents(vec![
        (PathBuf::from("/a.md"), ChangeKind::Created),
        (PathBuf::from("/b.md"), ChangeKind::Removed),
        (PathBuf::from("/c.md"), ChangeKind::Modified),
    ]);

    assert_eq!(
        events.into_live_paths(),
        vec![PathBuf::from("/a.md"), PathBuf::from("/c.md")]
    );
}
