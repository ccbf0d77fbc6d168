//! The persisted wishlist store.
//!
//! A wishlist is a set of car ids saved as a JSON array of strings in a
//! single file - the local-storage analogue. The store is the sole
//! authority on membership: consumers hold no copy longer than a single
//! render cycle and re-read the full set on every change notification.
//!
//! # Synchronization protocol
//!
//! Independent observers must converge on one source of truth without
//! shared memory, so every mutation commits the new set to the file and
//! then broadcasts on an in-process channel. A same-process write does not
//! announce itself to *other* processes, which is why [`WishlistStore::spawn_watcher`]
//! exists: it polls the file for changes made elsewhere and feeds the same
//! channel. Observers subscribe once, and on every event re-read via the
//! store rather than trusting anything cached - the mutation may have
//! originated in a process that shares the file but not memory.
//!
//! Concurrent writers are last-write-wins with no merge; the file is
//! rewritten atomically so a reader never sees a half-written set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::instrument;

use car_finder_core::types::CarId;

/// File name of the persisted set inside the data directory.
pub const WISHLIST_FILE: &str = "wishlist.json";

/// Poll interval for the external-change watcher.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(250);

const CHANNEL_CAPACITY: usize = 64;

/// Wishlist storage errors.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Storage error: {0}")]
    Io(#[from] io::Error),
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where a change notification originated.
///
/// Observers treat both the same way (re-read the set); the distinction
/// only matters for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    /// A mutation made through this store instance.
    Local,
    /// The file changed underneath us - another process wrote it.
    External,
}

/// Fingerprint of the persisted file, used to detect external writes.
type Fingerprint = Option<(SystemTime, u64)>;

/// The persisted set of "liked" car ids.
///
/// Cheap to clone; clones share the notification channel, so components
/// mounted in the same process observe each other's mutations.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    path: PathBuf,
    changes: broadcast::Sender<WishlistChange>,
    /// Last fingerprint produced by our own writes, so the watcher does
    /// not re-announce them as external.
    last_write: Arc<Mutex<Fingerprint>>,
}

impl WishlistStore {
    /// Open a store backed by the given file.
    ///
    /// The file is created lazily on the first mutation; a missing file
    /// reads as an empty set.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            path: path.into(),
            changes,
            last_write: Arc::new(Mutex::new(None)),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full persisted set, in insertion order.
    ///
    /// Always goes to the file - never a cached copy. A corrupt file reads
    /// as empty (last-write-wins storage, no merge or repair).
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than the file being
    /// absent.
    pub fn ids(&self) -> Result<Vec<CarId>, WishlistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Vec<CarId>>(&raw) {
            Ok(ids) => Ok(dedup(ids)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Corrupt wishlist file, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Check membership.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the re-read.
    pub fn contains(&self, id: &CarId) -> Result<bool, WishlistError> {
        Ok(self.ids()?.contains(id))
    }

    /// Number of ids in the set.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the re-read.
    pub fn count(&self) -> Result<usize, WishlistError> {
        Ok(self.ids()?.len())
    }

    /// Insert `id` if absent. Idempotent.
    ///
    /// Returns whether the set changed.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn add(&self, id: &CarId) -> Result<bool, WishlistError> {
        let mut ids = self.ids()?;
        if ids.contains(id) {
            return Ok(false);
        }
        ids.push(id.clone());
        self.commit(&ids)?;
        Ok(true)
    }

    /// Remove `id` if present. Idempotent.
    ///
    /// Returns whether the set changed.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &CarId) -> Result<bool, WishlistError> {
        let mut ids = self.ids()?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.commit(&ids)?;
        Ok(true)
    }

    /// Remove `id` if present, insert it otherwise.
    ///
    /// Returns whether the id is contained after the toggle. Two toggles
    /// in succession restore the original membership.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn toggle(&self, id: &CarId) -> Result<bool, WishlistError> {
        if self.contains(id)? {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    /// Empty the set.
    ///
    /// # Errors
    ///
    /// Propagates storage errors.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), WishlistError> {
        if !self.ids()?.is_empty() {
            self.commit(&[])?;
        }
        Ok(())
    }

    /// Subscribe to change notifications.
    ///
    /// Delivers both local mutations and (when a watcher is running)
    /// external file changes. On every received event the observer must
    /// re-read through the store; the event itself carries no data.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<WishlistChange> {
        self.changes.subscribe()
    }

    /// Spawn the external-change watcher.
    ///
    /// Polls the backing file and broadcasts [`WishlistChange::External`]
    /// when another process rewrote it. Abort the returned handle to stop
    /// watching (the "unsubscribe on unmount" half of the contract).
    #[must_use]
    pub fn spawn_watcher(&self, poll: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll);
            let mut seen = store.fingerprint();
            loop {
                interval.tick().await;
                let current = store.fingerprint();
                if current == seen {
                    continue;
                }
                seen = current;
                let own = *store.last_write.lock().unwrap_or_else(|e| e.into_inner());
                if current != own {
                    tracing::debug!(path = %store.path.display(), "Wishlist changed externally");
                    let _ = store.changes.send(WishlistChange::External);
                }
            }
        })
    }

    /// Commit the new set to storage, then notify same-process observers.
    ///
    /// The write is atomic (temp file + rename) so a concurrent reader
    /// sees either the old or the new set, never a torn one.
    fn commit(&self, ids: &[CarId]) -> Result<(), WishlistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(ids)?)?;
        fs::rename(&tmp, &self.path)?;

        *self.last_write.lock().unwrap_or_else(|e| e.into_inner()) = self.fingerprint();

        // Committed first, broadcast second: an observer that re-reads on
        // this event is guaranteed to see the new set.
        let _ = self.changes.send(WishlistChange::Local);
        Ok(())
    }

    fn fingerprint(&self) -> Fingerprint {
        let meta = fs::metadata(&self.path).ok()?;
        Some((meta.modified().ok()?, meta.len()))
    }
}

/// Drop duplicate ids, keeping first occurrences.
///
/// Our own writes never produce duplicates; this guards against external
/// writers.
fn dedup(ids: Vec<CarId>) -> Vec<CarId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_store() -> WishlistStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir()
            .join(format!("car-finder-test-{}-{n}", std::process::id()))
            .join(WISHLIST_FILE);
        WishlistStore::open(path)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = temp_store();
        assert_eq!(store.ids().unwrap(), Vec::<CarId>::new());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = temp_store();
        let id = CarId::new("c1");
        assert!(store.add(&id).unwrap());
        assert!(!store.add(&id).unwrap());
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.contains(&id).unwrap());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = temp_store();
        let id = CarId::new("c1");
        store.add(&id).unwrap();
        assert!(store.remove(&id).unwrap());
        assert!(!store.remove(&id).unwrap());
        assert!(!store.contains(&id).unwrap());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let store = temp_store();
        let id = CarId::new("c1");

        assert!(store.toggle(&id).unwrap());
        assert!(!store.toggle(&id).unwrap());
        assert!(!store.contains(&id).unwrap());

        store.add(&id).unwrap();
        store.toggle(&id).unwrap();
        store.toggle(&id).unwrap();
        assert!(store.contains(&id).unwrap());
    }

    #[test]
    fn test_clear_empties_the_set() {
        let store = temp_store();
        store.add(&CarId::new("c1")).unwrap();
        store.add(&CarId::new("c2")).unwrap();
        store.clear().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let store = temp_store();
        for id in ["c3", "c1", "c2"] {
            store.add(&CarId::new(id)).unwrap();
        }
        let ids: Vec<_> = store.ids().unwrap().iter().map(|i| i.as_str().to_owned()).collect();
        assert_eq!(ids, ["c3", "c1", "c2"]);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"{not json").unwrap();
        assert_eq!(store.count().unwrap(), 0);
        // And the store recovers on the next write.
        store.add(&CarId::new("c1")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_external_duplicates_are_dropped_on_read() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), br#"["c1", "c2", "c1"]"#).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_local_mutation_notifies_same_process_observers() {
        let store = temp_store();
        let observer = store.clone();
        let mut rx = observer.subscribe();

        store.add(&CarId::new("c1")).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, WishlistChange::Local);
        // Re-read on notify: the observer sees the committed set.
        assert!(observer.contains(&CarId::new("c1")).unwrap());
    }

    #[tokio::test]
    async fn test_no_notification_for_noop_mutations() {
        let store = temp_store();
        let id = CarId::new("c1");
        store.add(&id).unwrap();

        let mut rx = store.subscribe();
        assert!(!store.add(&id).unwrap());
        store.clear().unwrap();
        store.clear().unwrap();

        // Exactly one event: the clear that actually changed the set.
        assert_eq!(rx.recv().await.unwrap(), WishlistChange::Local);
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_reports_external_writes() {
        let store = temp_store();
        store.add(&CarId::new("c1")).unwrap();

        let mut rx = store.subscribe();
        let watcher = store.spawn_watcher(DEFAULT_WATCH_INTERVAL);

        // Let the watcher take its baseline fingerprint.
        tokio::time::sleep(DEFAULT_WATCH_INTERVAL).await;

        // Another process rewrites the file directly.
        fs::write(store.path(), br#"["c1", "c2"]"#).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, WishlistChange::External);
        assert_eq!(store.count().unwrap(), 2);

        watcher.abort();
    }
}
