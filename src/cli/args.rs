use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "biohub")]
#[command(about = "Browse and edit the species catalogue and your profile", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Species catalogue
    #[command(subcommand)]
    Species(SpeciesCommand),

    /// Your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
pub enum SpeciesCommand {
    /// List every species
    #[command(alias = "ls")]
    List,

    /// Show one species
    Show { scientific_name: String },

    /// Add a species
    Add {
        /// Field value, e.g. `-s common_name=Lion`
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Edit one of your species
    Edit {
        scientific_name: String,

        /// Field value; an empty value clears optional fields
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Delete one of your species
    #[command(alias = "rm")]
    Delete { scientific_name: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show your profile
    Show,

    /// Edit your profile
    Edit {
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", raw)),
    }
}
