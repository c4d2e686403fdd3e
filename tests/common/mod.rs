//! Shared test fixtures and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_store;

use std::path::PathBuf;
use std::sync::Arc;

use biohub::editor::EditorSession;
use biohub::feedback::{Notice, ToastChannel, ToastReceiver};
use biohub::identity::{Session, StaticIdentity};
use biohub::model::{Profile, Record, Species};
use biohub::refresh::Collection;
use biohub::store::InMemoryStore;
use biohub::sync::{SyncClient, Tables};
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

/// The signed-in user in every fixture.
pub fn user() -> Uuid {
    Uuid::from_u128(0x1111)
}

/// Somebody else.
pub fn other_user() -> Uuid {
    Uuid::from_u128(0x2222)
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn lion() -> Record {
    record(json!({
        "scientific_name": "Panthera leo",
        "common_name": "Lion",
        "kingdom": "Animalia",
        "total_population": 20000,
        "image": null,
        "description": "Large cat",
        "author": user().to_string(),
    }))
}

pub fn wolf() -> Record {
    record(json!({
        "scientific_name": "Canis lupus",
        "common_name": "Gray wolf",
        "kingdom": "Animalia",
        "total_population": 250000,
        "image": null,
        "description": null,
        "author": other_user().to_string(),
    }))
}

pub fn profile() -> Record {
    record(json!({
        "id": user().to_string(),
        "display_name": "alice",
        "biography": null,
        "email": "alice@example.com",
    }))
}

/// In-memory store, seeded, behind a real sync client.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub sync: SyncClient,
    pub toasts: ToastChannel,
    pub notices: ToastReceiver,
    pub species: Arc<Collection<Species>>,
    pub profiles: Arc<Collection<Profile>>,
}

impl Harness {
    pub fn signed_in() -> Self {
        Self::with_identity(StaticIdentity::signed_in(
            Session::new(user()).with_email("alice@example.com"),
        ))
    }

    pub fn anonymous() -> Self {
        Self::with_identity(StaticIdentity::anonymous())
    }

    fn with_identity(identity: StaticIdentity) -> Self {
        let store = Arc::new(
            InMemoryStore::new()
                .with_unique_key("species", "scientific_name")
                .with_unique_key("profiles", "id"),
        );
        store.seed("species", [lion(), wolf()]);
        store.seed("profiles", [profile()]);

        let sync = SyncClient::new(store.clone(), Arc::new(identity), Tables::default());
        let (toasts, notices) = ToastChannel::new();
        Self {
            species: Arc::new(Collection::new(sync.clone())),
            profiles: Arc::new(Collection::new(sync.clone())),
            store,
            sync,
            toasts,
            notices,
        }
    }

    pub fn species_editor(&self) -> EditorSession<Species> {
        EditorSession::new(
            self.sync.clone(),
            Arc::new(self.toasts.clone()),
            self.species.clone(),
        )
    }

    pub fn profile_editor(&self) -> EditorSession<Profile> {
        EditorSession::new(
            self.sync.clone(),
            Arc::new(self.toasts.clone()),
            self.profiles.clone(),
        )
    }

    pub fn notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}

/// Writes `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
