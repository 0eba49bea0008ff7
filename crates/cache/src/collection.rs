//! Server-state cache for one collection
//!
//! `CollectionCache` holds the entries of a single server-owned collection,
//! keyed by scope. Reads are de-duplicated: while a fetch for a key is in
//! flight, concurrent reads for the same key attach to it instead of
//! issuing another request. Invalidation marks every entry stale; the next
//! read refetches. Nothing here refetches on window focus, only explicit
//! invalidation triggers new work.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use foodie_core::{ClientError, ClientResult, Collection};
use tokio::sync::watch;
use tracing::debug;

use crate::entry::{EntryState, FetchStatus};
use crate::key::CacheKey;

// ============================================================================
// CollectionCache
// ============================================================================

/// Cache of one collection's entries, shared by reference with every
/// consumer that needs it (explicit injection, no ambient globals).
pub struct CollectionCache<T> {
    collection: Collection,
    entries: Mutex<HashMap<Option<String>, watch::Sender<EntryState<T>>>>,
}

/// What a read decided to do while holding the entry lock
enum ReadRole<T> {
    /// Entry was fresh; payload served directly
    Hit(T),
    /// Another fetch is in flight; wait for it
    Attach(watch::Receiver<EntryState<T>>),
    /// This read owns the fetch
    Fetch,
}

impl<T: Clone> CollectionCache<T> {
    /// Create an empty cache for a collection
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The collection this cache holds
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Full key of an entry in this cache, mainly for logging
    pub fn key(&self, scope: Option<&str>) -> CacheKey {
        match scope {
            Some(scope) => CacheKey::scoped(self.collection, scope),
            None => CacheKey::collection(self.collection),
        }
    }

    /// Read an entry, fetching through `fetch` when it is missing or stale.
    ///
    /// At most one fetch per key is in flight at a time; a read arriving
    /// while one is pending awaits that fetch's outcome instead of issuing
    /// a duplicate request. A failed shared fetch surfaces its stored
    /// detail to every waiter as `ClientError::Api`.
    ///
    /// The owning read can itself be torn down mid-fetch (timeout,
    /// `select!`, view teardown). A guard then returns the entry to `Idle`
    /// and wakes the waiters, and the next read claims the fetch for
    /// itself; the key never wedges in `Loading`.
    pub async fn read<F, Fut>(&self, scope: Option<&str>, fetch: F) -> ClientResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let key = self.key(scope);

        loop {
            // The role is decided while the lock is held, so exactly one
            // concurrent reader can own the fetch.
            let role = {
                let mut entries = self.entries.lock().expect("cache lock poisoned");
                let tx = entries
                    .entry(scope.map(str::to_string))
                    .or_insert_with(|| watch::channel(EntryState::idle()).0);

                let state = tx.borrow().clone();
                if state.is_fresh() {
                    match state.payload {
                        Some(payload) => ReadRole::Hit(payload),
                        None => ReadRole::Fetch,
                    }
                } else if state.is_loading() {
                    ReadRole::Attach(tx.subscribe())
                } else {
                    tx.send_modify(|s| s.status = FetchStatus::Loading);
                    ReadRole::Fetch
                }
            };

            match role {
                ReadRole::Hit(payload) => {
                    debug!(%key, "cache hit");
                    return Ok(payload);
                }
                ReadRole::Attach(rx) => {
                    debug!(%key, "attaching to in-flight fetch");
                    match self.await_entry(rx).await {
                        Some(outcome) => return outcome,
                        None => {
                            // The owner was dropped mid-fetch; contend for
                            // the released key.
                            debug!(%key, "fetch owner was dropped, retrying");
                            continue;
                        }
                    }
                }
                ReadRole::Fetch => break,
            }
        }

        debug!(%key, "cache miss, fetching");
        let mut guard = FetchGuard {
            cache: self,
            scope,
            armed: true,
        };
        let outcome = fetch().await;
        guard.armed = false;
        self.complete(scope, &outcome);
        outcome
    }

    /// Current payload of an entry, if any fetch ever succeeded.
    ///
    /// Stale payloads are returned too; callers that need freshness use
    /// `read`. A missing entity in the returned collection is the caller's
    /// not-found state, not a cache error.
    pub fn cached(&self, scope: Option<&str>) -> Option<T> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(&scope.map(str::to_string))
            .and_then(|tx| tx.borrow().payload.clone())
    }

    /// Mark every entry of this collection stale.
    ///
    /// Called after a successful mutation; the next read per key issues a
    /// fresh fetch. Observers are notified so views can show refresh state.
    pub fn invalidate(&self) {
        let entries = self.entries.lock().expect("cache lock poisoned");
        for tx in entries.values() {
            tx.send_modify(|s| s.stale = true);
        }
        debug!(collection = %self.collection, entries = entries.len(), "invalidated");
    }

    /// Observe an entry's state. Creates an idle entry if none exists yet.
    ///
    /// This is a passive relationship: the cache never calls back into
    /// consumers, it only publishes state changes.
    pub fn subscribe(&self, scope: Option<&str>) -> watch::Receiver<EntryState<T>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .entry(scope.map(str::to_string))
            .or_insert_with(|| watch::channel(EntryState::idle()).0)
            .subscribe()
    }

    /// Whether an entry is currently marked stale
    pub fn is_stale(&self, scope: Option<&str>) -> bool {
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries
            .get(&scope.map(str::to_string))
            .map(|tx| tx.borrow().stale)
            .unwrap_or(false)
    }

    /// Store a fetch outcome and notify observers
    fn complete(&self, scope: Option<&str>, outcome: &ClientResult<T>) {
        let entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(tx) = entries.get(&scope.map(str::to_string)) {
            tx.send_modify(|s| match outcome {
                Ok(payload) => s.resolve(payload.clone()),
                Err(err) => s.reject(err.to_string()),
            });
        }
    }

    /// Wait until an in-flight fetch settles, then mirror its outcome.
    ///
    /// `None` means the owning read was dropped before the fetch settled
    /// and the entry went back to `Idle`; the caller retries with its own
    /// fetcher.
    async fn await_entry(
        &self,
        mut rx: watch::Receiver<EntryState<T>>,
    ) -> Option<ClientResult<T>> {
        loop {
            let state = rx.borrow_and_update().clone();
            match state.status {
                FetchStatus::Idle => return None,
                FetchStatus::Loading => {
                    if rx.changed().await.is_err() {
                        return Some(Err(ClientError::transport("cache entry dropped")));
                    }
                }
                FetchStatus::Success => {
                    return Some(
                        state
                            .payload
                            .ok_or_else(|| ClientError::parse("fetch settled without payload")),
                    );
                }
                FetchStatus::Error => {
                    let detail = state
                        .error
                        .unwrap_or_else(|| "fetch failed".to_string());
                    return Some(Err(ClientError::api(None, detail)));
                }
            }
        }
    }
}

// ============================================================================
// FetchGuard
// ============================================================================

/// Releases a claimed entry when the owning read is dropped mid-fetch.
///
/// Without it, a torn-down owner would leave the entry in `Loading` and
/// every later read would attach to a fetch that no longer exists. The
/// guard returns the entry to `Idle` and notifies waiters so the next
/// read claims the fetch for itself.
struct FetchGuard<'a, T> {
    cache: &'a CollectionCache<T>,
    scope: Option<&'a str>,
    armed: bool,
}

impl<T> Drop for FetchGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Must not panic inside drop; skip the reset on a poisoned lock.
        let Ok(entries) = self.cache.entries.lock() else {
            return;
        };
        if let Some(tx) = entries.get(&self.scope.map(str::to_string)) {
            tx.send_if_modified(|s| {
                if s.status == FetchStatus::Loading {
                    s.status = FetchStatus::Idle;
                    true
                } else {
                    false
                }
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_fetch<'a>(
        counter: &'a AtomicUsize,
        payload: Vec<u32>,
    ) -> impl FnOnce() -> std::pin::Pin<Box<dyn Future<Output = ClientResult<Vec<u32>>> + Send + 'a>>
    {
        move || {
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(payload)
            })
        }
    }

    #[tokio::test]
    async fn test_read_populates_entry() {
        let cache = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        let payload = cache
            .read(None, counting_fetch(&fetched, vec![1, 2]))
            .await
            .unwrap();
        assert_eq!(payload, vec![1, 2]);
        assert_eq!(fetched.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(None), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_second_read_is_a_hit() {
        let cache = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        cache
            .read(None, counting_fetch(&fetched, vec![1]))
            .await
            .unwrap();
        cache
            .read(None, counting_fetch(&fetched, vec![9]))
            .await
            .unwrap();

        // The second fetcher never ran
        assert_eq!(fetched.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let cache = CollectionCache::new(Collection::Menus);
        let fetched = AtomicUsize::new(0);

        let (a, b) = tokio::join!(
            cache.read(Some("r1"), counting_fetch(&fetched, vec![5])),
            cache.read(Some("r1"), counting_fetch(&fetched, vec![5])),
        );

        assert_eq!(a.unwrap(), vec![5]);
        assert_eq!(b.unwrap(), vec![5]);
        assert_eq!(fetched.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scopes_fetch_independently() {
        let cache = CollectionCache::new(Collection::Menus);
        let fetched = AtomicUsize::new(0);

        cache
            .read(Some("r1"), counting_fetch(&fetched, vec![1]))
            .await
            .unwrap();
        cache
            .read(Some("r2"), counting_fetch(&fetched, vec![2]))
            .await
            .unwrap();

        assert_eq!(fetched.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached(Some("r1")), Some(vec![1]));
        assert_eq!(cache.cached(Some("r2")), Some(vec![2]));
    }

    #[tokio::test]
    async fn test_invalidation_triggers_refetch() {
        let cache = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        cache
            .read(None, counting_fetch(&fetched, vec![1]))
            .await
            .unwrap();
        cache.invalidate();

        // The stale flag is observable immediately after the mutation
        assert!(cache.is_stale(None));

        let payload = cache
            .read(None, counting_fetch(&fetched, vec![2]))
            .await
            .unwrap();
        assert_eq!(payload, vec![2]);
        assert_eq!(fetched.load(Ordering::SeqCst), 2);
        assert!(!cache.is_stale(None));
    }

    #[tokio::test]
    async fn test_invalidation_covers_all_scopes() {
        let cache = CollectionCache::new(Collection::Menus);
        let fetched = AtomicUsize::new(0);

        cache
            .read(Some("r1"), counting_fetch(&fetched, vec![1]))
            .await
            .unwrap();
        cache
            .read(Some("r2"), counting_fetch(&fetched, vec![2]))
            .await
            .unwrap();

        cache.invalidate();
        assert!(cache.is_stale(Some("r1")));
        assert!(cache.is_stale(Some("r2")));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_retried_on_next_read() {
        let cache: CollectionCache<Vec<u32>> = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        let result = cache
            .read(None, || async {
                fetched.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::transport("connection refused"))
            })
            .await;
        assert!(result.is_err());

        // An errored entry is not fresh, so the next read fetches again
        let payload = cache
            .read(None, counting_fetch(&fetched, vec![3]))
            .await
            .unwrap();
        assert_eq!(payload, vec![3]);
        assert_eq!(fetched.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dropped_owner_read_does_not_wedge_the_key() {
        let cache: CollectionCache<Vec<u32>> = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        // The owning read is torn down while its fetch is still running
        let owner = cache.read(None, || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(vec![1])
        });
        assert!(
            tokio::time::timeout(Duration::from_millis(10), owner)
                .await
                .is_err()
        );

        // The entry was released, so the next read fetches for itself
        // instead of waiting on a fetch that no longer exists
        let payload = tokio::time::timeout(
            Duration::from_millis(200),
            cache.read(None, counting_fetch(&fetched, vec![2])),
        )
        .await
        .expect("read settled")
        .unwrap();
        assert_eq!(payload, vec![2]);
        assert_eq!(fetched.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(None), Some(vec![2]));
    }

    #[tokio::test]
    async fn test_attached_reader_takes_over_after_owner_teardown() {
        let cache: CollectionCache<Vec<u32>> = CollectionCache::new(Collection::Menus);
        let fetched = AtomicUsize::new(0);

        let owner = async {
            let read = cache.read(Some("r1"), || async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(vec![1])
            });
            // Torn down before the fetch settles
            let _ = tokio::time::timeout(Duration::from_millis(10), read).await;
        };
        let waiter = tokio::time::timeout(
            Duration::from_millis(200),
            cache.read(Some("r1"), counting_fetch(&fetched, vec![7])),
        );

        let (_, result) = tokio::join!(owner, waiter);
        // The waiter attached to the owner's fetch, then claimed the
        // released key with its own fetcher
        assert_eq!(result.expect("read settled").unwrap(), vec![7]);
        assert_eq!(fetched.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscriber_observes_resolution() {
        let cache = CollectionCache::new(Collection::Restaurants);
        let fetched = AtomicUsize::new(0);

        let rx = cache.subscribe(None);
        assert_eq!(rx.borrow().status, FetchStatus::Idle);

        cache
            .read(None, counting_fetch(&fetched, vec![4]))
            .await
            .unwrap();

        let state = rx.borrow().clone();
        assert_eq!(state.status, FetchStatus::Success);
        assert_eq!(state.payload, Some(vec![4]));
    }

    #[tokio::test]
    async fn test_waiters_see_shared_failure() {
        let cache: CollectionCache<Vec<u32>> = CollectionCache::new(Collection::Menus);

        let failing = || async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err(ClientError::api(Some(500), "boom"))
        };
        let attached = || async { Ok(vec![0]) };

        let (a, b) = tokio::join!(
            cache.read(Some("r1"), failing),
            cache.read(Some("r1"), attached),
        );

        assert!(a.is_err());
        // The attached read mirrors the shared failure, its own fetcher
        // never ran
        let err = b.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
