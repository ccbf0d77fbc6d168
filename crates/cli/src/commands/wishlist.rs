//! The `wishlist` commands: mutate, list, and watch the persisted set.
//!
//! The store lives in `$CAR_FINDER_DATA_DIR` (default `$HOME/.car-finder`),
//! shared by every process on the machine; `watch` demonstrates the
//! cross-process half of the notification protocol.

use std::path::PathBuf;

use car_finder_client::wishlist::{DEFAULT_WATCH_INTERVAL, WISHLIST_FILE, WishlistStore};
use car_finder_client::{ApiClient, WishlistChange};
use car_finder_core::types::CarId;

/// Resolve the wishlist data directory.
fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(dir) = std::env::var("CAR_FINDER_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME")
        .map_err(|_| "Neither CAR_FINDER_DATA_DIR nor HOME is set")?;
    Ok(PathBuf::from(home).join(".car-finder"))
}

fn store() -> Result<WishlistStore, Box<dyn std::error::Error>> {
    Ok(WishlistStore::open(data_dir()?.join(WISHLIST_FILE)))
}

pub fn add(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let id = CarId::new(id);
    if store.add(&id)? {
        println!("Added {id} to wishlist");
    } else {
        println!("{id} is already in the wishlist");
    }
    Ok(())
}

pub fn remove(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let id = CarId::new(id);
    if store.remove(&id)? {
        println!("Removed {id} from wishlist");
    } else {
        println!("{id} was not in the wishlist");
    }
    Ok(())
}

pub fn toggle(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let id = CarId::new(id);
    if store.toggle(&id)? {
        println!("Added {id} to wishlist");
    } else {
        println!("Removed {id} from wishlist");
    }
    Ok(())
}

pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    store()?.clear()?;
    println!("Wishlist cleared");
    Ok(())
}

pub fn count() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", store()?.count()?);
    Ok(())
}

/// List wishlisted cars, resolved against the live catalog.
///
/// Ids with no matching record (removed from the dataset after being
/// saved) are tolerated in storage and silently skipped here.
pub async fn list(server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let ids = store.ids()?;
    if ids.is_empty() {
        println!("Wishlist is empty");
        return Ok(());
    }

    println!("Loading wishlist...");
    let cars = match ApiClient::new(server).list_cars().await {
        Ok(cars) => cars,
        Err(err) => {
            tracing::debug!(error = %err, "Catalog fetch failed");
            return Err("Failed to load wishlist. Please try again later.".into());
        }
    };

    let saved: Vec<_> = cars.iter().filter(|car| ids.contains(&car.id)).collect();
    println!("{} saved cars", saved.len());
    for car in saved {
        println!("{}", super::search::summary_line(car));
    }
    Ok(())
}

/// Subscribe to both notification channels and print changes until Ctrl+C.
///
/// On every event the set is re-read from storage; nothing printed here
/// comes from a cached copy.
pub async fn watch() -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let mut changes = store.subscribe();
    let watcher = store.spawn_watcher(DEFAULT_WATCH_INTERVAL);

    println!("Watching {} (Ctrl+C to stop)", store.path().display());
    loop {
        tokio::select! {
            event = changes.recv() => {
                let Ok(event) = event else { break };
                let origin = match event {
                    WishlistChange::Local => "local",
                    WishlistChange::External => "external",
                };
                let ids = store.ids()?;
                let ids: Vec<_> = ids.iter().map(CarId::as_str).collect();
                println!("[{origin}] {} ids: {}", ids.len(), ids.join(", "));
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    watcher.abort();
    Ok(())
}
