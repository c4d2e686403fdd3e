use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Filter, Query, RowStore, StoreError};
use crate::model::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Delete,
}

/// One call as the store saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
    pub op: StoreOp,
    pub table: String,
    pub filter: Option<Filter>,
    pub payload: Option<Record>,
}

/// In-process row store.
///
/// Tables spring into existence on first use. A unique column can be
/// declared per table; inserts and updates that would duplicate it are
/// rejected the way a database constraint would.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    tables: HashMap<String, Vec<Record>>,
    unique: HashMap<String, String>,
    calls: Vec<StoreCall>,
    failures: VecDeque<(StoreOp, String)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `column` unique within `table`.
    pub fn with_unique_key(self, table: &str, column: &str) -> Self {
        self.inner
            .lock()
            .unique
            .insert(table.to_string(), column.to_string());
        self
    }

    /// Adds rows directly, bypassing constraints and the call log.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Record>) {
        self.inner
            .lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.inner
            .lock()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Calls that would change data, i.e. everything but selects.
    pub fn mutation_calls(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.op != StoreOp::Select)
            .collect()
    }

    /// Makes the next call of kind `op` fail with `message`.
    pub fn fail_next(&self, op: StoreOp, message: &str) {
        self.inner
            .lock()
            .failures
            .push_back((op, message.to_string()));
    }
}

impl MemoryInner {
    fn record(&mut self, call: StoreCall) -> Result<(), StoreError> {
        let op = call.op;
        self.calls.push(call);
        if let Some(pos) = self.failures.iter().position(|(o, _)| *o == op) {
            if let Some((_, message)) = self.failures.remove(pos) {
                return Err(StoreError::Rejected {
                    status: 400,
                    message,
                });
            }
        }
        Ok(())
    }

    /// Rejects `candidate` if its unique value is already held by a row
    /// outside `replaced` or by one of `pending`.
    fn check_unique(
        &self,
        table: &str,
        candidate: &Record,
        replaced: &[usize],
        pending: &[Record],
    ) -> Result<(), StoreError> {
        let Some(column) = self.unique.get(table) else {
            return Ok(());
        };
        let Some(value) = candidate.get(column).filter(|v| !v.is_null()) else {
            return Ok(());
        };
        let clash = self
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .enumerate()
            .filter(|(i, _)| !replaced.contains(i))
            .map(|(_, row)| row)
            .chain(pending)
            .any(|row| row.get(column) == Some(value));
        if clash {
            return Err(StoreError::Rejected {
                status: 409,
                message: format!(
                    "duplicate key value violates unique constraint \"{}_pkey\"",
                    table
                ),
            });
        }
        Ok(())
    }
}

fn row_matches(row: &Record, filter: &Filter) -> bool {
    match row.get(&filter.column) {
        Some(Value::String(s)) => *s == filter.value,
        Some(Value::Number(n)) => n.to_string() == filter.value,
        Some(Value::Bool(b)) => b.to_string() == filter.value,
        _ => false,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // Nulls sort last.
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RowStore for InMemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Record>, StoreError> {
        let mut inner = self.inner.lock();
        inner.record(StoreCall {
            op: StoreOp::Select,
            table: table.to_string(),
            filter: query.filter.clone(),
            payload: None,
        })?;

        let mut rows: Vec<Record> = inner
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .filter(|row| query.filter.as_ref().map_or(true, |f| row_matches(row, f)))
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: &Record) -> Result<Vec<Record>, StoreError> {
        let mut inner = self.inner.lock();
        inner.record(StoreCall {
            op: StoreOp::Insert,
            table: table.to_string(),
            filter: None,
            payload: Some(row.clone()),
        })?;
        inner.check_unique(table, row, &[], &[])?;
        inner
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(vec![row.clone()])
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: &Record,
    ) -> Result<Vec<Record>, StoreError> {
        let mut inner = self.inner.lock();
        inner.record(StoreCall {
            op: StoreOp::Update,
            table: table.to_string(),
            filter: Some(filter.clone()),
            payload: Some(changes.clone()),
        })?;

        let targets: Vec<usize> = inner
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .enumerate()
            .filter(|(_, row)| row_matches(row, filter))
            .map(|(i, _)| i)
            .collect();

        let mut updated: Vec<Record> = Vec::with_capacity(targets.len());
        for &i in &targets {
            let mut next = inner.tables[table][i].clone();
            next.extend(changes.clone());
            inner.check_unique(table, &next, &targets, &updated)?;
            updated.push(next);
        }

        if let Some(rows) = inner.tables.get_mut(table) {
            for (&i, next) in targets.iter().zip(&updated) {
                rows[i] = next.clone();
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let mut inner = self.inner.lock();
        inner.record(StoreCall {
            op: StoreOp::Delete,
            table: table.to_string(),
            filter: Some(filter.clone()),
            payload: None,
        })?;

        let mut deleted = Vec::new();
        if let Some(rows) = inner.tables.get_mut(table) {
            let (gone, kept): (Vec<Record>, Vec<Record>) =
                rows.drain(..).partition(|row| row_matches(row, filter));
            *rows = kept;
            deleted = gone;
        }
        Ok(deleted)
    }
}
