//! # Row store
//!
//! The backing store is table-oriented: rows are addressed by exact-match
//! equality on a single column, and every call returns either the affected
//! row set or an error carrying the store's message.
//!
//! ## Implementations
//!
//! - [`rest::RestStore`]: PostgREST-compatible HTTP client (Supabase and
//!   friends). Production backend.
//! - [`memory::InMemoryStore`]: in-process tables with unique-key checks,
//!   a call log and failure injection. Used by tests and local runs.

mod error;
pub mod memory;
pub mod rest;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;

use crate::model::Record;

/// `column = value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Row selection for [`RowStore::select`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order: Option<Order>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matching(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            order: None,
        }
    }

    pub fn ordered(mut self, order: Option<Order>) -> Self {
        self.order = order;
        self
    }
}

/// Table-oriented store the sync client talks to.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Record>, StoreError>;

    /// Inserts one row and returns it as stored.
    async fn insert(&self, table: &str, row: &Record) -> Result<Vec<Record>, StoreError>;

    /// Applies `changes` to every row matching `filter`; returns the rows
    /// after the update.
    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: &Record,
    ) -> Result<Vec<Record>, StoreError>;

    /// Deletes every row matching `filter`; returns the deleted rows.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError>;
}
