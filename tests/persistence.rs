//! End-to-end persistence scenarios: create, populate, save, reload.

use std::fs;

use conff::{ConfigStore, FORMAT_VERSION, INT_ERROR, STR_ERROR};
use tempfile::TempDir;

#[test]
fn end_to_end_example() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("c.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_int("retries", 3);
    store.set_string("mode", "fast");
    store.save().unwrap();

    let mut reloaded = ConfigStore::new();
    reloaded.open(&path).unwrap();
    assert_eq!(reloaded.get_int("retries"), 3);
    assert_eq!(reloaded.get_string("mode"), "fast");
    assert_eq!(reloaded.item_count(), 2);
    assert_eq!(reloaded.version(), FORMAT_VERSION);
}

#[test]
fn values_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rt.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_string("spaces", "a value with spaces");
    store.set_string("tildes", "left~middle~right");
    store.set_string("empty", "");
    store.set_int("zero", 0);
    store.set_int("max", i32::MAX - 1);
    store.save().unwrap();

    let mut reloaded = ConfigStore::new();
    reloaded.open(&path).unwrap();
    assert_eq!(reloaded.get_string("spaces"), "a value with spaces");
    assert_eq!(reloaded.get_string("tildes"), "left~middle~right");
    assert_eq!(reloaded.get_string("empty"), "");
    assert_eq!(reloaded.get_int("zero"), 0);
    assert_eq!(reloaded.get_int("max"), i32::MAX - 1);
}

#[test]
fn save_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("idem.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_string("mode", "fast");
    store.set_int("retries", 3);

    store.save().unwrap();
    let first = fs::read(&path).unwrap();
    store.save().unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn table_order_is_preserved_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("order.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_string("first", "1");
    store.set_string("second", "2");
    store.set_string("third", "3");
    // Overwriting must not move the item to the end.
    store.set_string("first", "one");
    store.save().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], format!("@conff:{FORMAT_VERSION}"));
    assert!(lines[1].ends_with("~one"));
    assert!(lines[2].ends_with("~2"));
    assert!(lines[3].ends_with("~3"));
}

#[test]
fn malformed_item_lines_are_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.cfg");

    fs::write(
        &path,
        "@conff:1000\n\
         $config 0123456789abcdef0123456789abcdef 0~kept\n\
         this line has no tilde\n",
    )
    .unwrap();

    let mut store = ConfigStore::new();
    store.open(&path).unwrap();
    assert_eq!(store.item_count(), 1);
}

#[test]
fn blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.cfg");

    fs::write(
        &path,
        "\n\n@conff:1000\n\n$config 0123456789abcdef0123456789abcdef 1~5\n\n",
    )
    .unwrap();

    let mut store = ConfigStore::new();
    store.open(&path).unwrap();
    assert_eq!(store.version(), 1000);
    assert_eq!(store.item_count(), 1);
}

#[test]
fn bad_header_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.cfg");

    fs::write(&path, "not a header\n$config 0123456789abcdef0123456789abcdef 0~v\n").unwrap();

    let mut store = ConfigStore::new();
    assert!(store.open(&path).is_err());
    assert_eq!(store.item_count(), 0);
    assert_eq!(store.version(), -1);
}

#[test]
fn loaded_version_is_reported_but_save_writes_current() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("old.cfg");

    fs::write(&path, "@conff:7\n").unwrap();

    let mut store = ConfigStore::new();
    store.open(&path).unwrap();
    assert_eq!(store.version(), 7);

    store.save().unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!("@conff:{FORMAT_VERSION}\n")));
}

#[test]
fn out_of_range_kind_codes_drop_the_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinds.cfg");

    fs::write(
        &path,
        "@conff:1000\n\
         $config 0123456789abcdef0123456789abcdef 0~ok\n\
         $config fedcba9876543210fedcba9876543210 7~dropped\n",
    )
    .unwrap();

    let mut store = ConfigStore::new();
    store.open(&path).unwrap();
    assert_eq!(store.item_count(), 1);
}

#[test]
fn delete_persists_across_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("del.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_string("keep", "yes");
    store.set_string("drop", "no");
    store.save().unwrap();

    assert!(store.delete_config("drop"));
    store.save().unwrap();

    let mut reloaded = ConfigStore::new();
    reloaded.open(&path).unwrap();
    assert_eq!(reloaded.item_count(), 1);
    assert_eq!(reloaded.get_string("keep"), "yes");
    assert_eq!(reloaded.get_string("drop"), STR_ERROR);
    assert_eq!(reloaded.get_int("drop"), INT_ERROR);
}

#[test]
fn mutate_save_reload_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cycle.cfg");

    let mut store = ConfigStore::new();
    store.create_and_open(&path).unwrap();
    store.set_int("count", 1);
    store.save().unwrap();

    store.open(&path).unwrap();
    store.set_int("count", 2);
    store.set_string("label", "second pass");
    store.save().unwrap();

    let mut reloaded = ConfigStore::new();
    reloaded.open(&path).unwrap();
    assert_eq!(reloaded.get_int("count"), 2);
    assert_eq!(reloaded.get_string("label"), "second pass");
    assert_eq!(reloaded.item_count(), 2);
}
