mod common;

use biohub::editor::{EditorError, EditorState};
use biohub::feedback::NoticeKind;
use biohub::model::Species;
use biohub::store::memory::StoreOp;
use biohub::store::Filter;
use common::{record, user, Harness};
use serde_json::{json, Value};

#[tokio::test]
async fn edit_clearing_common_name_sends_null() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    editor
        .start_edit(&h.species.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("common_name", "").unwrap();
    let saved = editor.submit().await.unwrap().unwrap();

    assert_eq!(saved.common_name, None);
    let update = &h.store.mutation_calls()[0];
    assert_eq!(update.op, StoreOp::Update);
    assert_eq!(update.filter, Some(Filter::eq("scientific_name", "Panthera leo")));
    assert_eq!(
        update.payload,
        Some(record(json!({ "common_name": null })))
    );

    assert_eq!(editor.state(), &EditorState::Closed);
    let notices = h.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].title, "Species edited!");
    assert_eq!(
        notices[0].detail.as_deref(),
        Some("Successfully edited Panthera leo.")
    );
}

#[tokio::test]
async fn successful_create_invalidates_once_then_notifies_then_closes() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();
    assert_eq!(h.species.rows().await.unwrap().len(), 2);
    assert!(!h.species.is_stale());

    editor.start_add().unwrap();
    editor.set_field("scientific_name", "Vulpes vulpes").unwrap();
    editor.set_field("common_name", "Red fox").unwrap();
    editor.set_field("total_population", "1000").unwrap();
    let created = editor.submit().await.unwrap().unwrap();

    assert_eq!(created.author, Some(user()));
    assert_eq!(h.species.invalidations(), 1);
    assert!(h.species.is_stale());
    assert_eq!(editor.state(), &EditorState::Closed);

    let notices = h.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Species added!");

    let names: Vec<String> = h
        .species
        .rows()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.scientific_name)
        .collect();
    assert_eq!(names, ["Canis lupus", "Panthera leo", "Vulpes vulpes"]);
}

#[tokio::test]
async fn profile_short_name_never_reaches_store() {
    let mut h = Harness::signed_in();
    let mut editor = h.profile_editor();

    editor.open(&user().to_string()).await.unwrap();
    editor
        .start_edit(&h.profiles.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("display_name", "a").unwrap();
    let err = editor.submit().await.unwrap_err();

    match err {
        EditorError::Validation { errors, .. } => {
            assert_eq!(
                errors["display_name"],
                vec!["Username must be at least 2 characters.".to_string()]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(h.store.mutation_calls().is_empty());
    assert!(h.notices().is_empty());
    assert_eq!(editor.state().name(), "editing");
}

#[tokio::test]
async fn profile_edit_uses_profile_wording() {
    let mut h = Harness::signed_in();
    let mut editor = h.profile_editor();

    editor.open(&user().to_string()).await.unwrap();
    editor
        .start_edit(&h.profiles.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("biography", "Birdwatcher").unwrap();
    editor.submit().await.unwrap();

    let notices = h.notices();
    assert_eq!(notices[0].title, "Profile updated successfully!");
    assert_eq!(h.profiles.invalidations(), 1);
    assert_eq!(h.store.rows("profiles")[0]["biography"], json!("Birdwatcher"));
}

#[tokio::test]
async fn read_only_and_unknown_fields_are_refused() {
    let h = Harness::signed_in();
    let mut editor = h.profile_editor();
    editor.open(&user().to_string()).await.unwrap();
    editor
        .start_edit(&h.profiles.candidate_keys().await.unwrap())
        .unwrap();

    assert!(matches!(
        editor.set_field("email", "x@example.com"),
        Err(EditorError::Schema(_))
    ));
    assert!(matches!(
        editor.set_field("nickname", "x"),
        Err(EditorError::Schema(_))
    ));
}

#[tokio::test]
async fn profile_cannot_be_added() {
    let h = Harness::signed_in();
    let mut editor = h.profile_editor();
    assert!(matches!(
        editor.start_add(),
        Err(EditorError::Unsupported { .. })
    ));
    assert_eq!(editor.state(), &EditorState::Closed);
}

#[tokio::test]
async fn delete_with_no_selection_reports_and_skips_store() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    let candidates = h.species.candidate_keys().await.unwrap();
    editor.open_delete(candidates).unwrap();
    let err = editor.confirm_delete().await.unwrap_err();

    assert!(matches!(err, EditorError::NothingSelected { .. }));
    assert!(h.store.mutation_calls().is_empty());
    let notices = h.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert_eq!(notices[0].title, "No species selected.");
    assert_eq!(
        notices[0].detail.as_deref(),
        Some("Please select a species to delete.")
    );
    assert_eq!(editor.state().name(), "confirming delete");
}

#[tokio::test]
async fn delete_candidates_are_only_own_rows() {
    let h = Harness::signed_in();
    let candidates = h.species.candidate_keys().await.unwrap();
    assert_eq!(candidates, ["Panthera leo"]);

    let anonymous = Harness::anonymous();
    assert!(anonymous.species.candidate_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_selected_row() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    editor
        .open_delete(h.species.candidate_keys().await.unwrap())
        .unwrap();
    editor.select_for_delete("Canis lupus").unwrap();
    assert_eq!(editor.state().selected(), None);
    editor.select_for_delete("Panthera leo").unwrap();
    editor.confirm_delete().await.unwrap();

    assert_eq!(editor.state(), &EditorState::Closed);
    assert_eq!(h.store.rows("species").len(), 1);
    assert_eq!(h.species.invalidations(), 1);
    assert!(h.species.candidate_keys().await.unwrap().is_empty());

    let notices = h.notices();
    assert_eq!(notices[0].title, "Species deleted!");
    assert_eq!(
        notices[0].detail.as_deref(),
        Some("Successfully deleted Panthera leo.")
    );
}

#[tokio::test]
async fn failed_delete_keeps_dialog_and_selection() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();
    h.store
        .fail_next(StoreOp::Delete, "permission denied for table species");

    editor.open_delete(vec!["Panthera leo".to_string()]).unwrap();
    editor.select_for_delete("Panthera leo").unwrap();
    let err = editor.confirm_delete().await.unwrap_err();

    assert!(matches!(err, EditorError::Remote { .. }));
    assert_eq!(editor.state().selected(), Some("Panthera leo"));
    assert_eq!(h.species.invalidations(), 0);
    let notices = h.notices();
    assert_eq!(notices[0].title, "Something went wrong.");
    assert_eq!(
        notices[0].detail.as_deref(),
        Some("permission denied for table species")
    );
}

#[tokio::test]
async fn remote_failure_preserves_draft_for_retry() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    editor
        .start_edit(&h.species.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("scientific_name", "Canis lupus").unwrap();
    let err = editor.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "duplicate key value violates unique constraint \"species_pkey\"");
    let form = editor.state().form().unwrap();
    assert_eq!(form.value("scientific_name"), Some(&json!("Canis lupus")));
    assert!(form.is_dirty());
    assert_eq!(h.species.invalidations(), 0);
    assert!(h.notices()[0].is_error());

    editor.set_field("scientific_name", "Panthera leo leo").unwrap();
    editor.submit().await.unwrap();
    assert_eq!(h.species.invalidations(), 1);
}

#[tokio::test]
async fn unchanged_submit_makes_no_store_call() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    editor
        .start_edit(&h.species.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("common_name", "  Lion ").unwrap();
    let saved = editor.submit().await.unwrap();

    assert_eq!(saved.map(|s| s.scientific_name).as_deref(), Some("Panthera leo"));
    assert!(h.store.mutation_calls().is_empty());
    assert_eq!(h.species.invalidations(), 0);
    assert_eq!(h.notices()[0].title, "Species edited!");
}

#[tokio::test]
async fn anonymous_submit_is_refused_before_the_store() {
    let mut h = Harness::anonymous();
    let mut editor = h.species_editor();

    // Candidates listed before the session lapsed.
    editor.open("Panthera leo").await.unwrap();
    editor.start_edit(&["Panthera leo".to_string()]).unwrap();
    editor.set_field("common_name", "Big cat").unwrap();
    let err = editor.submit().await.unwrap_err();

    assert!(matches!(err, EditorError::Unauthenticated));
    assert!(h.store.mutation_calls().is_empty());
    assert_eq!(editor.state().name(), "editing");
    assert_eq!(
        h.notices()[0].detail.as_deref(),
        Some("You must be signed in to make changes.")
    );
}

#[tokio::test]
async fn missing_row_fetch_reports_and_closes() {
    let mut h = Harness::signed_in();
    let mut editor = h.species_editor();

    let err = editor.open("Dodo").await.unwrap_err();
    assert!(matches!(err, EditorError::Fetch { .. }));
    assert_eq!(editor.state(), &EditorState::Closed);

    let notices = h.notices();
    assert_eq!(notices[0].title, "Error fetching species data.");
    assert_eq!(
        notices[0].detail.as_deref(),
        Some("Could not fetch the selected species.")
    );
}

#[tokio::test]
async fn duplicate_rows_are_an_integrity_error() {
    let mut h = Harness::signed_in();
    h.store.seed("profiles", [common::profile()]);
    let mut editor = h.profile_editor();

    let err = editor.open(&user().to_string()).await.unwrap_err();
    assert!(matches!(err, EditorError::Integrity(_)));
    assert!(err.to_string().contains("Please contact system administrator"));
    assert_eq!(editor.state(), &EditorState::Closed);
    assert!(h.notices()[0]
        .detail
        .as_deref()
        .unwrap()
        .contains("duplicate records"));
}

#[tokio::test]
async fn selecting_another_row_refetches_and_reseeds() {
    let h = Harness::signed_in();
    h.store.seed(
        "species",
        [record(json!({
            "scientific_name": "Vulpes vulpes",
            "common_name": "Red fox",
            "kingdom": "Animalia",
            "author": user().to_string(),
        }))],
    );
    let candidates = h.species.candidate_keys().await.unwrap();
    assert_eq!(candidates, ["Panthera leo", "Vulpes vulpes"]);
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    editor.start_edit(&candidates).unwrap();
    editor.set_field("common_name", "changed").unwrap();
    let selects_before = h.store.calls().len();

    editor.select("Vulpes vulpes", &candidates).await.unwrap();

    assert_eq!(h.store.calls().len(), selects_before + 1);
    let form = editor.state().form().unwrap();
    assert_eq!(form.value("common_name"), Some(&json!("Red fox")));
    assert!(!form.is_dirty());
    assert_eq!(
        editor.state().entity().map(|s: &Species| s.scientific_name.as_str()),
        Some("Vulpes vulpes")
    );

    // Same row again: nothing to fetch.
    editor.select("Vulpes vulpes", &candidates).await.unwrap();
    assert_eq!(h.store.calls().len(), selects_before + 1);
}

#[tokio::test]
async fn rows_owned_by_others_cannot_be_edited() {
    let h = Harness::signed_in();
    let candidates = h.species.candidate_keys().await.unwrap();
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    editor.start_edit(&candidates).unwrap();
    let before = editor.state().clone();
    let calls_before = h.store.calls().len();

    let err = editor.select("Canis lupus", &candidates).await.unwrap_err();
    assert!(matches!(err, EditorError::NotEditable { .. }));
    assert_eq!(err.to_string(), "'Canis lupus' is not one of your species records");
    assert_eq!(editor.state(), &before);
    assert_eq!(h.store.calls().len(), calls_before);

    editor.close();
    editor.open("Canis lupus").await.unwrap();
    assert!(matches!(
        editor.start_edit(&candidates),
        Err(EditorError::NotEditable { .. })
    ));
    assert_eq!(editor.state().name(), "viewing");
}

#[tokio::test]
async fn padded_short_name_is_refused_and_stored_profile_stays_editable() {
    let mut h = Harness::signed_in();
    let mut editor = h.profile_editor();
    let candidates = h.profiles.candidate_keys().await.unwrap();
    assert_eq!(candidates, [user().to_string()]);

    editor.open(&user().to_string()).await.unwrap();
    editor.start_edit(&candidates).unwrap();
    editor.set_field("display_name", " a ").unwrap();
    assert!(matches!(
        editor.submit().await,
        Err(EditorError::Validation { .. })
    ));
    assert!(h.store.mutation_calls().is_empty());

    editor.set_field("display_name", " al ").unwrap();
    editor.submit().await.unwrap();
    assert_eq!(h.store.rows("profiles")[0]["display_name"], json!("al"));

    // Touching only the bio later must not trip over the stored name.
    editor.open(&user().to_string()).await.unwrap();
    editor
        .start_edit(&h.profiles.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("biography", "Birdwatcher").unwrap();
    editor.submit().await.unwrap();
    assert_eq!(h.notices().len(), 2);
}

#[tokio::test]
async fn cancel_returns_to_untouched_snapshot() {
    let h = Harness::signed_in();
    let mut editor = h.species_editor();

    editor.open("Panthera leo").await.unwrap();
    let snapshot = editor.state().clone();
    editor
        .start_edit(&h.species.candidate_keys().await.unwrap())
        .unwrap();
    editor.set_field("total_population", "-3").unwrap();
    editor.cancel();

    assert_eq!(editor.state(), &snapshot);
    editor.close();
    assert_eq!(editor.state(), &EditorState::Closed);
}

#[tokio::test]
async fn transitions_out_of_order_are_errors() {
    let h = Harness::signed_in();
    let mut editor = h.species_editor();

    assert!(matches!(
        editor.start_edit(&[]),
        Err(EditorError::InvalidTransition { .. })
    ));
    assert!(matches!(
        editor.submit().await,
        Err(EditorError::InvalidTransition { .. })
    ));
    assert!(matches!(
        editor.set_field("common_name", Value::Null),
        Err(EditorError::InvalidTransition { .. })
    ));

    editor.open("Panthera leo").await.unwrap();
    assert!(matches!(
        editor.open("Canis lupus").await,
        Err(EditorError::InvalidTransition { .. })
    ));
}
