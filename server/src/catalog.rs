//! Read-only card catalog mapping card names to their base stats
//!
//! The catalog is loaded once at startup, either from the bundled
//! `cards.json` or from a file given on the command line, and is never
//! mutated afterwards. Lookups that miss are not errors: deck construction
//! skips names the catalog does not know.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const BUILTIN_CARDS: &str = include_str!("cards.json");

/// Base stats of a card as described by the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub name: String,
    pub mana_cost: u32,
    pub attack: u32,
    pub health: i32,
    #[serde(default, alias = "imageRef")]
    pub image: String,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    DuplicateCard(String),
    InvalidStats { name: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read card catalog: {}", e),
            CatalogError::Parse(e) => write!(f, "malformed card catalog: {}", e),
            CatalogError::DuplicateCard(name) => {
                write!(f, "card '{}' is listed more than once", name)
            }
            CatalogError::InvalidStats { name, reason } => {
                write!(f, "card '{}' has invalid stats: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: HashMap<String, CardStats>,
}

impl Catalog {
    /// Catalog compiled into the server binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CARDS)
    }

    /// Reads a JSON array of card entries from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CardStats> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Builds a catalog from already-parsed entries, rejecting duplicate
    /// names and cards that would enter play dead.
    pub fn from_entries(entries: Vec<CardStats>) -> Result<Self, CatalogError> {
        let mut cards = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.health <= 0 {
                return Err(CatalogError::InvalidStats {
                    name: entry.name,
                    reason: "health must be positive".to_string(),
                });
            }
            if cards.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateCard(entry.name));
            }
            cards.insert(entry.name.clone(), entry);
        }

        Ok(Self { cards })
    }

    pub fn find(&self, name: &str) -> Option<&CardStats> {
        self.cards.get(name)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
