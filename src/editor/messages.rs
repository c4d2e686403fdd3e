//! Notice wording for editor outcomes.

use crate::feedback::Notice;
use crate::model::EntityKind;

use super::error::EditorError;

const FAILED: &str = "Something went wrong.";

pub(crate) fn created(kind: EntityKind, label: &str) -> Notice {
    Notice::success(
        format!("{} added!", kind.title()),
        Some(format!("Successfully added {}.", label)),
    )
}

pub(crate) fn edited(kind: EntityKind, label: &str) -> Notice {
    match kind {
        EntityKind::Profile => Notice::success("Profile updated successfully!", None),
        _ => Notice::success(
            format!("{} edited!", kind.title()),
            Some(format!("Successfully edited {}.", label)),
        ),
    }
}

pub(crate) fn deleted(kind: EntityKind, key: &str) -> Notice {
    Notice::success(
        format!("{} deleted!", kind.title()),
        Some(format!("Successfully deleted {}.", key)),
    )
}

pub(crate) fn nothing_selected(kind: EntityKind) -> Notice {
    Notice::error(
        format!("No {} selected.", kind.noun()),
        Some(format!("Please select a {} to delete.", kind.noun())),
    )
}

pub(crate) fn fetch_failed(kind: EntityKind) -> Notice {
    Notice::error(
        format!("Error fetching {} data.", kind.noun()),
        Some(format!("Could not fetch the selected {}.", kind.noun())),
    )
}

/// Failed mutation, integrity anomaly or missing session. The detail is the
/// error's own text.
pub(crate) fn failed(err: &EditorError) -> Notice {
    Notice::error(FAILED, Some(err.to_string()))
}
