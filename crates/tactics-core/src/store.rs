//! Read-only card catalogue
//!
//! The store is built once at startup and shared behind an `Arc`. It has no
//! mutation API, so concurrent readers need no locking.

use std::path::Path;

use tracing::{info, warn};

use crate::card::Card;
use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Load the catalogue from a JSON array of cards.
    ///
    /// A missing file yields an empty store. A file that exists but cannot
    /// be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Catalogue {} not found, starting with no cards",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let cards: Vec<Card> = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded {} cards from {}", cards.len(), path.display());
        Ok(Self::new(cards))
    }

    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards whose category equals `category` exactly
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| c.is_in(category))
    }

    /// Cards whose category matches `category` ignoring case
    pub fn filter_ignore_case(&self, category: &str) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|c| c.is_in_ignore_case(category))
            .cloned()
            .collect()
    }
}
