//! Integration tests for wishlist convergence across independent stores.
//!
//! Two `WishlistStore` instances on the same file share storage but not
//! memory - the same situation as two browser tabs. The watcher is what
//! carries a mutation from one to the other.

use std::time::Duration;

use car_finder_client::wishlist::{WishlistStore, WISHLIST_FILE};
use car_finder_client::WishlistChange;
use car_finder_core::types::CarId;

fn temp_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("car-finder-it-{}-{tag}", std::process::id()))
        .join(WISHLIST_FILE)
}

const POLL: Duration = Duration::from_millis(25);
const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_independent_stores_converge_via_the_watcher() {
    let path = temp_path("converge");
    let writer = WishlistStore::open(&path);
    let observer = WishlistStore::open(&path);

    let mut events = observer.subscribe();
    let watcher = observer.spawn_watcher(POLL);

    // Give the watcher a tick to take its baseline.
    tokio::time::sleep(POLL * 2).await;

    writer.add(&CarId::new("car-007")).expect("add");

    let event = tokio::time::timeout(WAIT, events.recv())
        .await
        .expect("watcher should report the external write")
        .expect("channel open");
    assert_eq!(event, WishlistChange::External);

    // Mandatory re-read on notify: the observer sees the writer's set.
    assert!(observer.contains(&CarId::new("car-007")).expect("contains"));
    assert_eq!(observer.count().expect("count"), 1);

    watcher.abort();
}

#[tokio::test]
async fn test_mutations_from_either_side_are_last_write_wins() {
    let path = temp_path("lww");
    let a = WishlistStore::open(&path);
    let b = WishlistStore::open(&path);

    a.add(&CarId::new("c1")).expect("add");
    b.add(&CarId::new("c2")).expect("add");
    a.remove(&CarId::new("c1")).expect("remove");

    // Sequential writes interleave cleanly: each mutation re-reads the
    // file first, so both stores end up with the same final set.
    let from_a = a.ids().expect("ids");
    let from_b = b.ids().expect("ids");
    assert_eq!(from_a, from_b);
    assert_eq!(from_a, vec![CarId::new("c2")]);
}

#[tokio::test]
async fn test_clones_in_one_process_share_the_local_channel() {
    let path = temp_path("local");
    let store = WishlistStore::open(&path);
    let header_badge = store.clone();

    let mut events = header_badge.subscribe();
    store.toggle(&CarId::new("car-001")).expect("toggle");

    let event = tokio::time::timeout(WAIT, events.recv())
        .await
        .expect("local mutation notifies same-process observers")
        .expect("channel open");
    assert_eq!(event, WishlistChange::Local);
    assert_eq!(header_badge.count().expect("count"), 1);
}
