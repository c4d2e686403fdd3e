use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Session;
use crate::model::record::{Entity, EntityKind};
use crate::schema::{FieldRule, Schema};
use crate::store::Filter;

pub static PROFILE_SCHEMA: Schema = Schema {
    entity: EntityKind::Profile,
    key_field: "id",
    fields: &[
        FieldRule::text("id", "Id").read_only(),
        FieldRule::text("display_name", "Username")
            .required()
            .min_len(2)
            .max_len(30)
            .too_short("Username must be at least 2 characters.")
            .too_long("Username must not be longer than 30 characters."),
        FieldRule::text("biography", "Bio")
            .max_len(160)
            .too_long("Biography cannot be longer than 160 characters."),
        FieldRule::text("email", "Email").read_only(),
    ],
};

/// A user's public profile. Rows are created alongside the account, so the
/// workflow only views and edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub biography: Option<String>,
    pub email: String,
}

impl Entity for Profile {
    const KIND: EntityKind = EntityKind::Profile;
    const CREATABLE: bool = false;

    fn schema() -> &'static Schema {
        &PROFILE_SCHEMA
    }

    fn key(&self) -> String {
        self.id.to_string()
    }

    /// Only the caller's own profile is editable.
    fn candidate_filter(session: &Session) -> Option<Filter> {
        Some(Filter::eq("id", session.user_id.to_string()))
    }
}
