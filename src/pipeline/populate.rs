//! Populate stages: copy and reshape raw API documents into records.

use super::Stage;
use crate::api::{self, AbilityPayload, MovePayload, PokemonPayload, StatPayload};
use crate::errors::PokedexResult;
use crate::fetcher::ApiFetcher;
use crate::request::{diagnostic_placeholder, Entry, RequestContext};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use schema::{EntityKind, PokemonRecord, Record};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why one document could not be turned into a record.
///
/// These never abort a batch: the affected position gets the diagnostic
/// placeholder instead.
#[derive(Error, Debug)]
pub enum PopulateError {
    #[error("document does not match the {kind} layout: {source}")]
    Payload {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a {expected} record, found {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
}

fn parse<T: serde::de::DeserializeOwned>(kind: EntityKind, raw: &Value) -> Result<T, PopulateError> {
    api::parse(raw).map_err(|source| PopulateError::Payload { kind, source })
}

/// Fill `record` from `raw` using the plain mapping for its variant.
pub fn fill_record(record: &mut Record, raw: &Value) -> Result<(), PopulateError> {
    match record {
        Record::Pokemon(r) => parse::<PokemonPayload>(EntityKind::Pokemon, raw)?.fill_plain(r),
        Record::Ability(r) => parse::<AbilityPayload>(EntityKind::Ability, raw)?.fill(r),
        Record::Move(r) => parse::<MovePayload>(EntityKind::Move, raw)?.fill(r),
        Record::Stat(r) => parse::<StatPayload>(EntityKind::Stat, raw)?.fill(r),
    }
    Ok(())
}

/// A fully populated record of `kind`, built from scratch.
pub fn build_record(kind: EntityKind, raw: &Value) -> Result<Record, PopulateError> {
    let mut record = Record::empty(kind);
    fill_record(&mut record, raw)?;
    Ok(record)
}

fn invalid(identifier: &str) -> Entry {
    Entry::Invalid {
        identifier: identifier.to_string(),
    }
}

/// Plain population for Pokemon, Ability and Move modes.
pub struct PopulateStage {
    kind: EntityKind,
}

impl PopulateStage {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind }
    }

    fn populate_one(&self, record: Record, raw: &Value) -> Result<Record, PopulateError> {
        if record.kind() != self.kind {
            return Err(PopulateError::KindMismatch {
                expected: self.kind,
                found: record.kind(),
            });
        }
        let mut record = record;
        fill_record(&mut record, raw)?;
        Ok(record)
    }
}

#[async_trait]
impl Stage for PopulateStage {
    fn name(&self) -> &'static str {
        "populate"
    }

    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        let mut entries = Vec::with_capacity(ctx.len());

        for (index, slot) in ctx.records.iter_mut().enumerate() {
            let identifier = &ctx.identifiers[index];
            let raw = ctx.responses.get(index).and_then(Option::as_ref);

            let entry = match (slot.take(), raw) {
                (Some(record), Some(raw)) => match self.populate_one(record, raw) {
                    Ok(record) => Entry::Record(record),
                    Err(e) => {
                        warn!(%identifier, error = %e, "cannot populate record");
                        invalid(identifier)
                    }
                },
                _ => invalid(identifier),
            };
            entries.push(entry);
        }

        ctx.entries = entries;
        Ok(())
    }
}

/// Pokemon population that resolves every referenced stat, ability and move
/// into its full record.
///
/// Sub-lookups for one Pokemon go through an ordered buffer of width
/// `concurrency`; with the default of 1 they run strictly one after another.
/// Either way the blocks are concatenated in the order the API lists them.
pub struct ExpandedPopulateStage {
    fetcher: Arc<dyn ApiFetcher>,
    concurrency: usize,
}

impl ExpandedPopulateStage {
    pub fn new(fetcher: Arc<dyn ApiFetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    async fn populate_one(&self, pokemon: &mut PokemonRecord, payload: &PokemonPayload) {
        payload.fill_base(pokemon);
        pokemon.stats = self.resolve_all(EntityKind::Stat, payload.stat_names()).await;
        pokemon.abilities = self
            .resolve_all(EntityKind::Ability, payload.ability_names())
            .await;
        pokemon.moves = self.resolve_all(EntityKind::Move, payload.move_names()).await;
    }

    /// Rendered blocks for every name, each followed by a blank line.
    async fn resolve_all(&self, kind: EntityKind, names: Vec<String>) -> String {
        debug!(%kind, count = names.len(), "resolving sub-entities");
        let blocks: Vec<String> = stream::iter(names)
            .map(|name| self.resolve_one(kind, name))
            .buffered(self.concurrency)
            .collect()
            .await;
        blocks.concat()
    }

    async fn resolve_one(&self, kind: EntityKind, name: String) -> String {
        let text = match self.fetcher.fetch(kind, &name).await {
            Some(raw) => match build_record(kind, &raw) {
                Ok(record) => record.to_string(),
                Err(e) => {
                    warn!(%name, error = %e, "cannot populate sub-record");
                    diagnostic_placeholder(&name)
                }
            },
            None => diagnostic_placeholder(&name),
        };
        format!("{}\n", text)
    }
}

#[async_trait]
impl Stage for ExpandedPopulateStage {
    fn name(&self) -> &'static str {
        "populate-expanded"
    }

    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        let mut entries = Vec::with_capacity(ctx.len());

        for index in 0..ctx.len() {
            let identifier = ctx.identifiers[index].clone();
            let slot = ctx.records.get_mut(index).and_then(Option::take);
            let payload = match (slot, ctx.responses.get(index).and_then(Option::as_ref)) {
                (Some(Record::Pokemon(pokemon)), Some(raw)) => {
                    parse::<PokemonPayload>(EntityKind::Pokemon, raw).map(|payload| (pokemon, payload))
                }
                (Some(other), Some(_)) => Err(PopulateError::KindMismatch {
                    expected: EntityKind::Pokemon,
                    found: other.kind(),
                }),
                _ => {
                    entries.push(invalid(&identifier));
                    continue;
                }
            };

            let entry = match payload {
                Ok((mut pokemon, payload)) => {
                    self.populate_one(&mut pokemon, &payload).await;
                    Entry::Record(Record::Pokemon(pokemon))
                }
                Err(e) => {
                    warn!(%identifier, error = %e, "cannot populate record");
                    invalid(&identifier)
                }
            };
            entries.push(entry);
        }

        ctx.entries = entries;
        Ok(())
    }
}
