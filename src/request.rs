//! The request context threaded through the pipeline.
//!
//! Every batch in the context is position-aligned with `identifiers`: index
//! `i` of `responses`, `records` and `entries` always describes identifier `i`.

use crate::errors::{PokedexError, PokedexResult};
use schema::{EntityKind, Record};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Which stage-set handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMode {
    Pokemon,
    ExpandedPokemon,
    Ability,
    Move,
}

impl RequestMode {
    /// Combine the user's entity kind and expanded flag.
    ///
    /// Expanded resolution only exists for Pokemon; asking for it in any other
    /// mode is rejected rather than silently ignored.
    pub fn new(kind: EntityKind, expanded: bool) -> PokedexResult<Self> {
        match (kind, expanded) {
            (EntityKind::Pokemon, false) => Ok(RequestMode::Pokemon),
            (EntityKind::Pokemon, true) => Ok(RequestMode::ExpandedPokemon),
            (EntityKind::Ability, false) => Ok(RequestMode::Ability),
            (EntityKind::Move, false) => Ok(RequestMode::Move),
            (EntityKind::Stat, _) => Err(PokedexError::InvalidRequest(
                "stats can only be looked up through expanded Pokemon mode".to_string(),
            )),
            (other, true) => Err(PokedexError::InvalidRequest(format!(
                "--expanded is only available in pokemon mode, not {}",
                other
            ))),
        }
    }

    /// The API path segment the batch is fetched from.
    pub fn kind(self) -> EntityKind {
        match self {
            RequestMode::Pokemon | RequestMode::ExpandedPokemon => EntityKind::Pokemon,
            RequestMode::Ability => EntityKind::Ability,
            RequestMode::Move => EntityKind::Move,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == RequestMode::ExpandedPokemon
    }
}

/// Text substituted for an identifier whose lookup failed.
pub fn diagnostic_placeholder(identifier: &str) -> String {
    format!("{} is not valid. Skipping this request.\n", identifier)
}

/// One item of the final batch: a populated record or a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Record(Record),
    Invalid { identifier: String },
}

impl Entry {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Entry::Record(record) => Some(record),
            Entry::Invalid { .. } => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Entry::Invalid { .. })
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Record(record) => write!(f, "{}", record),
            Entry::Invalid { identifier } => f.write_str(&diagnostic_placeholder(identifier)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub mode: RequestMode,
    pub identifiers: Vec<String>,
    /// Filled by the fetch stage; `None` where the lookup failed
    pub responses: Vec<Option<Value>>,
    /// Filled by the instantiate stage; `None` where there is nothing to populate
    pub records: Vec<Option<Record>>,
    /// Filled by the populate stage and consumed by the output stage
    pub entries: Vec<Entry>,
    /// File to write to; `None` means the console
    pub output: Option<PathBuf>,
}

impl RequestContext {
    pub fn new(mode: RequestMode, identifiers: Vec<String>, output: Option<PathBuf>) -> Self {
        Self {
            mode,
            identifiers,
            responses: Vec::new(),
            records: Vec::new(),
            entries: Vec::new(),
            output,
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// One identifier per line, trailing whitespace trimmed, blank lines skipped.
pub fn parse_identifiers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_identifiers(path: &Path) -> PokedexResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| PokedexError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_identifiers(&content))
}
