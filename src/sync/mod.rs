//! Remote sync client.
//!
//! Wraps a [`RowStore`] with entity-aware create/update/delete and the
//! single-row fetch used to seed edit drafts. Every mutation requires a
//! session; none of them retry.

mod error;

pub use error::SyncError;

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::identity::{IdentityProvider, Session};
use crate::model::{Entity, EntityKind, Record};
use crate::store::{Filter, Query, RowStore};

/// Table name per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub species: String,
    pub profiles: String,
}

impl Tables {
    pub fn table(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Species => &self.species,
            EntityKind::Profile => &self.profiles,
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for Tables {
    fn from(config: &StoreConfig) -> Self {
        Self {
            species: config.species_table.clone(),
            profiles: config.profiles_table.clone(),
        }
    }
}

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The store applied the change; carries the canonical row when returned.
    Applied(Option<Record>),
    /// Nothing to send. No request was made.
    Unchanged,
}

impl SyncOutcome {
    pub fn row(&self) -> Option<&Record> {
        match self {
            SyncOutcome::Applied(row) => row.as_ref(),
            SyncOutcome::Unchanged => None,
        }
    }
}

/// Entity-aware client over a row store. Cheap to clone.
#[derive(Clone)]
pub struct SyncClient {
    store: Arc<dyn RowStore>,
    identity: Arc<dyn IdentityProvider>,
    tables: Tables,
}

impl SyncClient {
    pub fn new(
        store: Arc<dyn RowStore>,
        identity: Arc<dyn IdentityProvider>,
        tables: Tables,
    ) -> Self {
        Self {
            store,
            identity,
            tables,
        }
    }

    pub async fn session(&self) -> Option<Session> {
        self.identity.session().await
    }

    async fn require_session(&self) -> Result<Session, SyncError> {
        self.session().await.ok_or(SyncError::Unauthenticated)
    }

    fn key_filter<E: Entity>(key: &str) -> Filter {
        Filter::eq(E::schema().key_field, key)
    }

    /// Loads the one row stored under `key`.
    ///
    /// Zero rows is `NotFound`; more than one is `Duplicate`, never resolved
    /// by picking one.
    pub async fn fetch<E: Entity>(&self, key: &str) -> Result<E, SyncError> {
        let table = self.tables.table(E::KIND);
        let mut rows = self
            .store
            .select(table, &Query::matching(Self::key_filter::<E>(key)))
            .await?;

        match rows.len() {
            0 => Err(SyncError::NotFound {
                entity: E::KIND,
                key: key.to_string(),
            }),
            1 => {
                let row = rows.remove(0);
                E::from_record(row).map_err(|source| SyncError::Decode {
                    entity: E::KIND,
                    source,
                })
            }
            count => {
                tracing::error!(entity = %E::KIND, key, count, "duplicate rows for unique key");
                Err(SyncError::Duplicate {
                    entity: E::KIND,
                    key: key.to_string(),
                    count,
                })
            }
        }
    }

    /// Loads every row matching `query`.
    pub async fn list<E: Entity>(&self, query: &Query) -> Result<Vec<E>, SyncError> {
        let table = self.tables.table(E::KIND);
        let rows = self.store.select(table, query).await?;
        rows.into_iter()
            .map(|row| {
                E::from_record(row).map_err(|source| SyncError::Decode {
                    entity: E::KIND,
                    source,
                })
            })
            .collect()
    }

    /// Inserts a new row built from validated `fields`, stamped with the
    /// caller's identity.
    pub async fn create<E: Entity>(&self, fields: Record) -> Result<SyncOutcome, SyncError> {
        let session = self.require_session().await?;
        let mut row = fields;
        E::stamp_new(&mut row, &session);

        let table = self.tables.table(E::KIND);
        let rows = self.store.insert(table, &row).await?;
        tracing::info!(entity = %E::KIND, table, "row created");
        Ok(SyncOutcome::Applied(rows.into_iter().next()))
    }

    /// Sends `changes` to the row currently stored under `key`.
    ///
    /// `key` is the pre-edit key even when `changes` renames the row. An
    /// empty change set succeeds without touching the store.
    pub async fn update<E: Entity>(
        &self,
        key: &str,
        changes: Record,
    ) -> Result<SyncOutcome, SyncError> {
        self.require_session().await?;
        if changes.is_empty() {
            tracing::debug!(entity = %E::KIND, key, "no changes to send");
            return Ok(SyncOutcome::Unchanged);
        }

        let table = self.tables.table(E::KIND);
        let rows = self
            .store
            .update(table, &Self::key_filter::<E>(key), &changes)
            .await?;
        if rows.is_empty() {
            return Err(SyncError::NotFound {
                entity: E::KIND,
                key: key.to_string(),
            });
        }
        tracing::info!(
            entity = %E::KIND,
            key,
            fields = ?changes.keys().collect::<Vec<_>>(),
            "row updated"
        );
        Ok(SyncOutcome::Applied(rows.into_iter().next()))
    }

    pub async fn delete<E: Entity>(&self, key: &str) -> Result<SyncOutcome, SyncError> {
        self.require_session().await?;
        let table = self.tables.table(E::KIND);
        let rows = self
            .store
            .delete(table, &Self::key_filter::<E>(key))
            .await?;
        if rows.is_empty() {
            return Err(SyncError::NotFound {
                entity: E::KIND,
                key: key.to_string(),
            });
        }
        tracing::info!(entity = %E::KIND, key, "row deleted");
        Ok(SyncOutcome::Applied(rows.into_iter().next()))
    }
}
