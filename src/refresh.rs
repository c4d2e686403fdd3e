//! Displayed collections and their invalidation.
//!
//! A [`Collection`] caches the listing and the keys offered to edit/delete
//! selectors. After any successful mutation the editor calls
//! [`RefreshTrigger::invalidate`], and the next read goes back to the store.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::model::Entity;
use crate::store::Query;
use crate::sync::{SyncClient, SyncError};

/// Receives the "data changed" signal after a successful mutation.
pub trait RefreshTrigger: Send + Sync {
    fn invalidate(&self);
}

/// Cached view over every row of one entity.
pub struct Collection<E: Entity> {
    sync: SyncClient,
    inner: Mutex<Snapshot<E>>,
    invalidations: AtomicU64,
}

struct Snapshot<E> {
    stale: bool,
    rows: Vec<E>,
    candidate_keys: Vec<String>,
}

impl<E: Entity> Collection<E> {
    /// A collection that loads on first read.
    pub fn new(sync: SyncClient) -> Self {
        Self {
            sync,
            inner: Mutex::new(Snapshot {
                stale: true,
                rows: Vec::new(),
                candidate_keys: Vec::new(),
            }),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.inner.lock().stale
    }

    /// How many times the collection has been invalidated.
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }

    /// Every row, in listing order.
    pub async fn rows(&self) -> Result<Vec<E>, SyncError> {
        self.ensure_fresh().await?;
        Ok(self.inner.lock().rows.clone())
    }

    /// Keys the caller may pick in edit/delete dialogs.
    ///
    /// Empty without a session.
    pub async fn candidate_keys(&self) -> Result<Vec<String>, SyncError> {
        self.ensure_fresh().await?;
        Ok(self.inner.lock().candidate_keys.clone())
    }

    async fn ensure_fresh(&self) -> Result<(), SyncError> {
        let generation = {
            let snapshot = self.inner.lock();
            if !snapshot.stale {
                return Ok(());
            }
            self.invalidations()
        };

        let listing = Query::all().ordered(E::listing_order());
        let rows: Vec<E> = self.sync.list(&listing).await?;

        let candidate_keys = match self.sync.session().await {
            None => Vec::new(),
            Some(session) => match E::candidate_filter(&session) {
                None => rows.iter().map(E::key).collect(),
                Some(filter) => {
                    let query = Query::matching(filter).ordered(E::listing_order());
                    self.sync
                        .list::<E>(&query)
                        .await?
                        .iter()
                        .map(E::key)
                        .collect()
                }
            },
        };

        let mut snapshot = self.inner.lock();
        snapshot.rows = rows;
        snapshot.candidate_keys = candidate_keys;
        // An invalidation that landed mid-load keeps the snapshot stale.
        snapshot.stale = self.invalidations() != generation;
        tracing::debug!(
            entity = %E::KIND,
            stale = snapshot.stale,
            rows = snapshot.rows.len(),
            candidates = snapshot.candidate_keys.len(),
            "collection reloaded"
        );
        Ok(())
    }
}

impl<E: Entity> RefreshTrigger for Collection<E> {
    fn invalidate(&self) {
        let mut snapshot = self.inner.lock();
        snapshot.stale = true;
        let count = self.invalidations.fetch_add(1, Ordering::SeqCst) + 1;
        drop(snapshot);
        tracing::debug!(entity = %E::KIND, count, "collection invalidated");
    }
}
