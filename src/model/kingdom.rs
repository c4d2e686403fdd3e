use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six biological kingdoms a species can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Kingdom {
    #[default]
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown kingdom '{0}'")]
pub struct UnknownKingdom(pub String);

impl Kingdom {
    pub const ALL: [Kingdom; 6] = [
        Kingdom::Animalia,
        Kingdom::Plantae,
        Kingdom::Fungi,
        Kingdom::Protista,
        Kingdom::Archaea,
        Kingdom::Bacteria,
    ];

    /// Wire names, in declaration order. Used by the schema's choice rule.
    pub const NAMES: [&'static str; 6] = [
        "Animalia", "Plantae", "Fungi", "Protista", "Archaea", "Bacteria",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kingdom::Animalia => "Animalia",
            Kingdom::Plantae => "Plantae",
            Kingdom::Fungi => "Fungi",
            Kingdom::Protista => "Protista",
            Kingdom::Archaea => "Archaea",
            Kingdom::Bacteria => "Bacteria",
        }
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kingdom {
    type Err = UnknownKingdom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kingdom::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKingdom(s.to_string()))
    }
}
