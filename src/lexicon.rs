//! Affect lexicon loading and lookup
//!
//! The lexicon is a fixed table mapping lowercase terms to pre-rated affect
//! dimensions (pleasure, arousal, dominance). It is loaded once, before any
//! fetching or scoring, and injected into the scorer as an explicit read-only
//! value — there is no process-wide singleton, so tests can run against
//! synthetic tables built with [`LexiconStore::from_entries`].

use crate::error::LexiconError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Affect dimensions for one lexicon term
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LexiconEntry {
    /// Pleasure (valence) rating
    pub pleasure: f64,
    /// Arousal rating
    pub arousal: f64,
    /// Dominance rating
    pub dominance: f64,
}

/// One CSV row of the lexicon source
#[derive(Debug, Deserialize)]
struct LexiconRow {
    term: String,
    pleasure: f64,
    arousal: f64,
    dominance: f64,
}

/// Immutable term-to-affect lookup table
///
/// Keys are lowercased at load time; [`lookup`](LexiconStore::lookup) expects
/// the caller to pass lowercase terms, which the tokenizer already produces.
#[derive(Clone, Debug, Default)]
pub struct LexiconStore {
    entries: HashMap<String, LexiconEntry>,
}

impl LexiconStore {
    /// Load the lexicon from a CSV file with header
    /// `term,pleasure,arousal,dominance`
    ///
    /// The load is atomic: either every row parses and the full table is
    /// returned, or an error is returned and no partial table exists. A
    /// missing column or a non-numeric dimension value fails the whole load.
    /// Duplicate terms keep the last row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load the lexicon from any CSV reader (same format as [`load`](Self::load))
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in csv_reader.deserialize() {
            let row: LexiconRow = row?;
            entries.insert(
                row.term.to_lowercase(),
                LexiconEntry {
                    pleasure: row.pleasure,
                    arousal: row.arousal,
                    dominance: row.dominance,
                },
            );
        }

        Ok(Self { entries })
    }

    /// Build a store from in-memory entries; terms are lowercased
    ///
    /// Intended for tests and embedders that ship their own table.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, LexiconEntry)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(term, entry)| (term.as_ref().to_lowercase(), entry))
                .collect(),
        }
    }

    /// Look up a lowercase term, O(1)
    pub fn lookup(&self, term: &str) -> Option<&LexiconEntry> {
        self.entries.get(term)
    }

    /// Number of terms in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
