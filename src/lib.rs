//! Pokedex
//!
//! A command-line client for PokeAPI. A batch of identifiers is looked up
//! concurrently, turned into typed records, and rendered as text to the
//! console or a file. Lookups that fail are reported per item and never
//! abort the rest of the batch.

// --- MODULE DECLARATIONS ---
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod pipeline;
pub mod pokedex;
pub mod request;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{AbilityRecord, EntityKind, MoveRecord, PokemonRecord, Record, StatRecord};

// --- From this crate's modules (`src/`) ---
pub use config::Config;
pub use errors::{PokedexError, PokedexResult};
pub use fetcher::{ApiFetcher, HttpFetcher};
pub use pipeline::{render, Pipeline, Stage};
pub use pokedex::Pokedex;
pub use request::{diagnostic_placeholder, Entry, RequestContext, RequestMode};
