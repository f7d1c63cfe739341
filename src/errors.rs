use std::path::PathBuf;
use thiserror::Error;

/// Environment-level failures that abort a whole invocation.
///
/// A single identifier that cannot be looked up is *not* an error: the
/// fetcher reports it as an absent response and the batch carries on.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The input file could not be read
    #[error("Cannot read input file {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output destination could not be opened or written
    #[error("Cannot write output to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the console failed
    #[error("Cannot write output to the console: {0}")]
    Console(#[source] std::io::Error),

    /// Configuration file or override is malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The request is inconsistent (e.g. expanded mode outside Pokemon mode)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;
