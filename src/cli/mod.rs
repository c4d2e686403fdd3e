//! Command-line host for the editor dialogs.

mod args;

pub use args::Cli;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use args::{Command, ProfileCommand, SpeciesCommand};
use biohub::config::Config;
use biohub::editor::{EditorError, EditorSession, Form};
use biohub::feedback::{Notice, ToastChannel, ToastReceiver};
use biohub::identity::StaticIdentity;
use biohub::model::{Entity, Profile, Species};
use biohub::refresh::{Collection, RefreshTrigger};
use biohub::store::RestStore;
use biohub::sync::{SyncClient, Tables};

/// Everything a command needs, wired once from config.
pub struct Host {
    identity: StaticIdentity,
    sync: SyncClient,
    toasts: ToastChannel,
    notices: ToastReceiver,
}

impl Host {
    pub fn from_config(config: &Config) -> Result<Self> {
        let identity = StaticIdentity::from_config(config);
        let store = RestStore::new(&config.store, identity.current())
            .context("Failed to build store client")?;
        let sync = SyncClient::new(
            Arc::new(store),
            Arc::new(identity.clone()),
            Tables::from(&config.store),
        );
        let (toasts, notices) = ToastChannel::new();
        Ok(Self {
            identity,
            sync,
            toasts,
            notices,
        })
    }

    /// Runs one command, then prints whatever notices it raised.
    pub async fn run(&mut self, command: Command) -> Result<()> {
        let result = match command {
            Command::Species(command) => self.species(command).await,
            Command::Profile(command) => self.profile(command).await,
        };
        for notice in self.notices.drain() {
            print_notice(&notice);
        }
        result
    }

    fn editor<E: Entity>(&self, collection: Arc<Collection<E>>) -> EditorSession<E> {
        EditorSession::new(
            self.sync.clone(),
            Arc::new(self.toasts.clone()),
            collection as Arc<dyn RefreshTrigger>,
        )
    }

    async fn species(&self, command: SpeciesCommand) -> Result<()> {
        let collection = Arc::new(Collection::<Species>::new(self.sync.clone()));
        let mut editor = self.editor(collection.clone());

        match command {
            SpeciesCommand::List => {
                for species in collection.rows().await? {
                    print_species_line(&species);
                }
                Ok(())
            }
            SpeciesCommand::Show { scientific_name } => {
                editor.open(&scientific_name).await?;
                if let Some(species) = editor.state().entity() {
                    print_entity(species);
                }
                Ok(())
            }
            SpeciesCommand::Add { set } => {
                editor.start_add()?;
                apply_fields(&mut editor, set)?;
                finish(editor.submit().await, &editor)
            }
            SpeciesCommand::Edit {
                scientific_name,
                set,
            } => {
                let candidates = collection.candidate_keys().await?;
                editor.open(&scientific_name).await?;
                editor.start_edit(&candidates)?;
                apply_fields(&mut editor, set)?;
                finish(editor.submit().await, &editor)
            }
            SpeciesCommand::Delete { scientific_name } => {
                editor.open_delete(collection.candidate_keys().await?)?;
                if let Some(name) = &scientific_name {
                    editor.select_for_delete(name)?;
                    if editor.state().selected() != Some(name.as_str()) {
                        tracing::warn!(species = %name, "not one of your species");
                    }
                }
                editor.confirm_delete().await?;
                Ok(())
            }
        }
    }

    async fn profile(&self, command: ProfileCommand) -> Result<()> {
        let Some(session) = self.identity.current() else {
            bail!("Profile commands need a [session] section in the config");
        };
        let key = session.user_id.to_string();
        let collection = Arc::new(Collection::<Profile>::new(self.sync.clone()));
        let mut editor = self.editor(collection.clone());

        editor.open(&key).await?;
        match command {
            ProfileCommand::Show => {
                if let Some(profile) = editor.state().entity() {
                    print_entity(profile);
                }
                Ok(())
            }
            ProfileCommand::Edit { set } => {
                editor.start_edit(&collection.candidate_keys().await?)?;
                apply_fields(&mut editor, set)?;
                finish(editor.submit().await, &editor)
            }
        }
    }
}

fn apply_fields<E: Entity>(
    editor: &mut EditorSession<E>,
    fields: Vec<(String, String)>,
) -> Result<()> {
    for (name, value) in fields {
        editor.set_field(&name, Value::String(value))?;
    }
    Ok(())
}

/// Prints field messages for a rejected draft before handing the error on.
fn finish<E: Entity>(
    result: Result<Option<E>, EditorError>,
    editor: &EditorSession<E>,
) -> Result<()> {
    match result {
        Ok(Some(entity)) => {
            print_entity(&entity);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err @ EditorError::Validation { .. }) => {
            if let Some(form) = editor.state().form() {
                print_form_errors(form);
            }
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_notice(notice: &Notice) {
    let marker = if notice.is_error() { "error" } else { "ok" };
    match &notice.detail {
        Some(detail) => println!("[{}] {} {}", marker, notice.title, detail),
        None => println!("[{}] {}", marker, notice.title),
    }
}

fn print_species_line(species: &Species) {
    println!(
        "{:<32} {:<24} {:<10} {}",
        species.scientific_name,
        species.common_name.as_deref().unwrap_or("-"),
        species.kingdom,
        species
            .total_population
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
}

fn print_entity<E: Entity>(entity: &E) {
    let record = entity.to_record();
    for rule in E::schema().fields {
        let shown = match record.get(rule.name).cloned().unwrap_or(Value::Null) {
            Value::Null => "-".to_string(),
            Value::String(s) => s,
            other => other.to_string(),
        };
        println!("{:<18} {}", rule.label, shown);
    }
}

fn print_form_errors(form: &Form) {
    for (name, messages) in form.errors() {
        for message in messages {
            eprintln!("  {}: {}", name, message);
        }
    }
}
