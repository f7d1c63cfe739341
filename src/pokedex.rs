//! Chain composition: one static pipeline per request mode.

use crate::config::Config;
use crate::errors::PokedexResult;
use crate::fetcher::{ApiFetcher, HttpFetcher};
use crate::pipeline::Pipeline;
use crate::request::{RequestContext, RequestMode};
use std::sync::Arc;

/// Holds the four pipelines, built once, and routes each request to one of them.
pub struct Pokedex {
    pokemon: Pipeline,
    expanded_pokemon: Pipeline,
    ability: Pipeline,
    moves: Pipeline,
}

impl Pokedex {
    pub fn new(fetcher: Arc<dyn ApiFetcher>, config: &Config) -> Self {
        let build = |mode| Pipeline::for_mode(mode, fetcher.clone(), config);
        Self {
            pokemon: build(RequestMode::Pokemon),
            expanded_pokemon: build(RequestMode::ExpandedPokemon),
            ability: build(RequestMode::Ability),
            moves: build(RequestMode::Move),
        }
    }

    /// A pokedex talking to the real API described by `config`.
    pub fn from_config(config: &Config) -> PokedexResult<Self> {
        let fetcher = HttpFetcher::new(config.clone())?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn pipeline(&self, mode: RequestMode) -> &Pipeline {
        match mode {
            RequestMode::Pokemon => &self.pokemon,
            RequestMode::ExpandedPokemon => &self.expanded_pokemon,
            RequestMode::Ability => &self.ability,
            RequestMode::Move => &self.moves,
        }
    }

    pub async fn execute(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        self.pipeline(ctx.mode).run(ctx).await
    }
}
