use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::identity::Session;
use crate::schema::Schema;
use crate::store::{Filter, Order};

/// A row as the store speaks it: column name to JSON value.
pub type Record = serde_json::Map<String, Value>;

/// Which entity a table, schema or notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Species,
    Profile,
}

impl EntityKind {
    /// Lowercase noun used in user-facing messages.
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Species => "species",
            EntityKind::Profile => "profile",
        }
    }

    /// Capitalized noun used in notice titles.
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Species => "Species",
            EntityKind::Profile => "Profile",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// An editable entity with a schema and a key column.
///
/// Implementors are plain serde structs; the workflow only ever sees them
/// through this trait, so the same dialog machinery serves every entity.
pub trait Entity:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Whether the Add flow is offered for this entity.
    const CREATABLE: bool = true;

    fn schema() -> &'static Schema;

    /// Current value of the key column, as used in equality filters.
    fn key(&self) -> String;

    /// Column order for the displayed collection.
    fn listing_order() -> Option<Order> {
        None
    }

    /// Restricts which rows the caller may pick for edit/delete.
    fn candidate_filter(_session: &Session) -> Option<Filter> {
        None
    }

    /// Fills creation-only columns (author and the like) before insert.
    fn stamp_new(_record: &mut Record, _session: &Session) {}

    fn to_record(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }

    fn from_record(record: Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record))
    }
}
