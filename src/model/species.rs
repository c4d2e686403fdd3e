use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::identity::Session;
use crate::model::kingdom::Kingdom;
use crate::model::record::{Entity, EntityKind, Record};
use crate::schema::{FieldRule, Schema};
use crate::store::{Filter, Order};

/// Field rules for a species record.
///
/// `scientific_name` is both the key and an editable field, so a rename is an
/// update of the key column addressed by the old value.
pub static SPECIES_SCHEMA: Schema = Schema {
    entity: EntityKind::Species,
    key_field: "scientific_name",
    fields: &[
        FieldRule::text("scientific_name", "Scientific name")
            .required()
            .min_len(1),
        FieldRule::text("common_name", "Common name"),
        FieldRule::choice("kingdom", "Kingdom", &Kingdom::NAMES)
            .required()
            .default_value("Animalia"),
        FieldRule::integer("total_population", "Total population"),
        FieldRule::url("image", "Image URL"),
        FieldRule::text("description", "Description"),
        FieldRule::text("author", "Author").read_only(),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    #[serde(default)]
    pub total_population: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set once at creation from the caller's identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Uuid>,
}

impl Entity for Species {
    const KIND: EntityKind = EntityKind::Species;

    fn schema() -> &'static Schema {
        &SPECIES_SCHEMA
    }

    fn key(&self) -> String {
        self.scientific_name.clone()
    }

    fn listing_order() -> Option<Order> {
        Some(Order::ascending("scientific_name"))
    }

    /// Only the caller's own species are offered for edit and delete.
    fn candidate_filter(session: &Session) -> Option<Filter> {
        Some(Filter::eq("author", session.user_id.to_string()))
    }

    fn stamp_new(record: &mut Record, session: &Session) {
        record.insert(
            "author".to_string(),
            Value::String(session.user_id.to_string()),
        );
    }
}
