//! The word pool: names of species, moves and abilities merged into one list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum WordSource {
    Species,
    Moves,
    Abilities,
}

impl WordSource {
    /// Fetch order, which is also the order words appear in the pool.
    pub const ALL: [WordSource; 3] = [WordSource::Species, WordSource::Moves, WordSource::Abilities];

    pub fn endpoint(self) -> &'static str {
        match self {
            WordSource::Species => "pokemon",
            WordSource::Moves => "move",
            WordSource::Abilities => "ability",
        }
    }

    pub fn limit(self) -> u16 {
        match self {
            WordSource::Species => 151,
            WordSource::Moves => 100,
            WordSource::Abilities => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WordSource::Species => "species",
            WordSource::Moves => "moves",
            WordSource::Abilities => "abilities",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PoolStatus {
    /// Every source loaded.
    Complete,
    /// At least one source loaded and at least one failed.
    Partial,
    /// No source loaded.
    Failed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SourceFailure {
    pub source: WordSource,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordPool {
    words: Vec<String>,
    failures: Vec<SourceFailure>,
}

impl WordPool {
    /// Merge per-source fetch results in the given order.
    ///
    /// A failed source contributes no words; the failure is logged and kept
    /// in the pool's report.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (WordSource, Result<Vec<String>, FetchError>)>,
    {
        let mut pool = WordPool::default();
        for (source, result) in results {
            match result {
                Ok(names) => {
                    tracing::debug!(source = source.label(), count = names.len(), "word list loaded");
                    pool.words
                        .extend(names.iter().map(|name| normalize_word(name)));
                }
                Err(error) => {
                    tracing::warn!(source = source.label(), %error, "word list failed to load");
                    pool.failures.push(SourceFailure {
                        source,
                        error: error.to_string(),
                    });
                }
            }
        }
        pool
    }

    pub fn from_words(words: Vec<String>) -> Self {
        Self {
            words,
            failures: Vec::new(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    pub fn status(&self) -> PoolStatus {
        if self.failures.is_empty() {
            PoolStatus::Complete
        } else if self.failures.len() < WordSource::ALL.len() {
            PoolStatus::Partial
        } else {
            PoolStatus::Failed
        }
    }

    /// Status line for a degraded pool, `None` when everything loaded.
    pub fn problem(&self) -> Option<String> {
        let failed: Vec<&str> = self
            .failures
            .iter()
            .map(|failure| failure.source.label())
            .collect();
        match self.status() {
            PoolStatus::Complete => None,
            PoolStatus::Partial => Some(format!(
                "Could not load {}; playing with {} words",
                failed.join(", "),
                self.words.len()
            )),
            PoolStatus::Failed => Some("Could not load any words from PokeAPI".to_string()),
        }
    }
}

/// Hyphenated API names become space separated: "thunder-punch" -> "thunder punch".
pub fn normalize_word(name: &str) -> String {
    name.replace('-', " ")
}
