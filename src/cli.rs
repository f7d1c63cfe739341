//! Command-line surface: argument parsing and request construction.

use crate::config::Config;
use crate::errors::{PokedexError, PokedexResult};
use crate::request::{read_identifiers, RequestContext, RequestMode};
use clap::{ArgGroup, Parser, ValueEnum};
use schema::EntityKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Pokemon,
    Ability,
    Move,
}

impl From<Mode> for EntityKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Pokemon => EntityKind::Pokemon,
            Mode::Ability => EntityKind::Ability,
            Mode::Move => EntityKind::Move,
        }
    }
}

/// Look up Pokemon, abilities and moves on PokeAPI.
///
/// # Examples
///
/// ```bash
/// # One Pokemon to the console
/// pokedex pokemon --inputdata pikachu
///
/// # Several moves, written to a file
/// pokedex move --inputdata thunderbolt 85 surf --output moves.txt
///
/// # Identifiers from a file, with abilities, moves and stats fully resolved
/// pokedex pokemon --inputfile team.txt --expanded
/// ```
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version, about = "Look up Pokemon, abilities and moves on PokeAPI", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["inputdata", "inputfile"])))]
pub struct Cli {
    /// What to look up
    #[arg(value_enum)]
    pub mode: Mode,

    /// Names or ids to look up, in order
    #[arg(long, num_args = 1..)]
    pub inputdata: Vec<String>,

    /// Text file with one name or id per line
    #[arg(long)]
    pub inputfile: Option<PathBuf>,

    /// Resolve every ability, move and stat into its full record (pokemon mode only)
    #[arg(long)]
    pub expanded: bool,

    /// Write results to this file instead of the console
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// RON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the per-request timeout
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Sub-lookups per Pokemon in flight at once in expanded mode
    #[arg(long)]
    pub expanded_concurrency: Option<usize>,

    /// Log each request to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layered config with this invocation's flags applied last.
    pub fn config(&self) -> PokedexResult<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(width) = self.expanded_concurrency {
            config.expanded_concurrency = width;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn identifiers(&self) -> PokedexResult<Vec<String>> {
        let identifiers = match &self.inputfile {
            Some(path) => read_identifiers(path)?,
            None => self.inputdata.clone(),
        };
        if identifiers.is_empty() {
            return Err(PokedexError::InvalidRequest(
                "no identifiers to look up".to_string(),
            ));
        }
        Ok(identifiers)
    }

    /// Everything the pipeline needs, validated before any network activity.
    pub fn request(&self) -> PokedexResult<RequestContext> {
        let mode = RequestMode::new(self.mode.into(), self.expanded)?;
        let identifiers = self.identifiers()?;
        Ok(RequestContext::new(mode, identifiers, self.output.clone()))
    }
}
