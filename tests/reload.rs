//! Integration tests for the change-detection reload loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dynconfig::{DynamicConfig, WatchOptions};

mod common;

fn open(path: &std::path::Path, poll_interval_ms: i64) -> DynamicConfig {
    DynamicConfig::open(WatchOptions {
        file_path: path.to_path_buf(),
        poll_interval_ms,
    })
    .expect("open store")
}

#[tokio::test]
async fn test_external_edit_becomes_visible() {
    let (_dir, path) = common::config_file(&["i:\"retries\":5"]);
    let store = open(&path, 20);

    assert_eq!(store.get_int("retries"), Some(5));
    assert_eq!(store.get_boolean("added"), None);

    common::write_lines(&path, &["i:\"retries\":5", "b:\"added\":true"]);

    let seen = common::wait_for(
        || store.get_boolean("added") == Some(true),
        Duration::from_secs(3),
    )
    .await;
    assert!(seen, "new key never became visible");
    assert_eq!(store.get_int("retries"), Some(5));

    store.stop();
}

#[tokio::test]
async fn test_snapshot_identity_stable_without_change() {
    let (_dir, path) = common::config_file(&["s:\"greeting\":\"hello\""]);
    let store = open(&path, 20);

    let before = store.snapshot();
    tokio::time::sleep(Duration::from_millis(200)).await;
    let after = store.snapshot();

    assert!(
        Arc::ptr_eq(&before, &after),
        "snapshot was replaced without a change"
    );
    store.stop();
}

#[tokio::test]
async fn test_no_poll_mode_never_updates() {
    let (_dir, path) = common::config_file(&["i:\"n\":1"]);
    let store = open(&path, -1);
    assert!(!store.is_polling());

    let before = store.snapshot();
    common::write_lines(&path, &["i:\"n\":2"]);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(store.get_int("n"), Some(1));
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[tokio::test]
async fn test_local_write_survives_poll_cycles() {
    let (_dir, path) = common::config_file(&["i:\"n\":1"]);
    let store = open(&path, 20);

    store.set_int("local", 9);
    assert!(store.has_pending_write());

    let flushed =
        common::wait_for(|| !store.has_pending_write(), Duration::from_secs(3)).await;
    assert!(flushed, "pending write never flushed");

    // The flush keeps the disk file untouched, so later cycles see no
    // change and the local value stays.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(store.get_int("local"), Some(9));
    assert_eq!(store.get_int("n"), Some(1));

    store.stop();
}

#[tokio::test]
async fn test_stop_halts_reloads() {
    let (_dir, path) = common::config_file(&["i:\"n\":1"]);
    let store = open(&path, 20);

    store.stop();
    let stopped = common::wait_for(|| !store.is_polling(), Duration::from_secs(3)).await;
    assert!(stopped, "poll loop kept running after stop");

    common::write_lines(&path, &["i:\"n\":2"]);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.get_int("n"), Some(1));
}

#[tokio::test]
async fn test_deleted_file_pauses_updates_until_recreated() {
    let (_dir, path) = common::config_file(&["i:\"n\":1"]);
    let store = open(&path, 20);

    std::fs::remove_file(&path).expect("remove config");
    tokio::time::sleep(Duration::from_millis(200)).await;
    // The previous snapshot stays while the file is unreadable.
    assert_eq!(store.get_int("n"), Some(1));

    common::write_lines(&path, &["i:\"n\":3"]);
    let seen = common::wait_for(|| store.get_int("n") == Some(3), Duration::from_secs(3)).await;
    assert!(seen, "recreated file was never reloaded");

    store.stop();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_never_see_torn_tables() {
    let (_dir, path) = common::config_file(&["b:\"x\":true", "s:\"x\":\"hi\"", "i:\"k0\":0"]);
    let store = Arc::new(open(&path, 10));

    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let store = store.clone();
        let done = done.clone();
        tokio::task::spawn_blocking(move || {
            while !done.load(Ordering::SeqCst) {
                let snapshot = store.snapshot();
                // Keys present in every published revision must never
                // read as missing, in any combination of types.
                if snapshot.integer("k0").is_none()
                    || snapshot.boolean("x") != Some(true)
                    || snapshot.string("x") != Some("hi")
                {
                    return false;
                }
                if store.get_int("k0").is_none() {
                    return false;
                }
            }
            true
        })
    };

    // Grow the file; every revision keeps the base keys.
    let mut lines: Vec<String> = vec![
        "b:\"x\":true".to_string(),
        "s:\"x\":\"hi\"".to_string(),
        "i:\"k0\":0".to_string(),
    ];
    for i in 1..=25 {
        lines.push(format!("i:\"k{}\":{}", i, i));
        let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        common::write_lines(&path, &line_refs);
        tokio::time::sleep(Duration::from_millis(15)).await;
    }

    done.store(true, Ordering::SeqCst);
    assert!(
        reader.await.expect("reader task"),
        "reader observed a torn snapshot"
    );

    let seen = common::wait_for(|| store.get_int("k25") == Some(25), Duration::from_secs(3)).await;
    assert!(seen, "final revision never loaded");

    store.stop();
}
