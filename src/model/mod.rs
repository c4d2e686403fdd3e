//! Entity types and the row representation they travel in.

mod kingdom;
mod profile;
mod record;
mod species;

pub use kingdom::{Kingdom, UnknownKingdom};
pub use profile::{Profile, PROFILE_SCHEMA};
pub use record::{Entity, EntityKind, Record};
pub use species::{Species, SPECIES_SCHEMA};
