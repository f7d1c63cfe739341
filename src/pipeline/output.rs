use super::Stage;
use crate::errors::{PokedexError, PokedexResult};
use crate::request::{Entry, RequestContext};
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// The full output text: every entry in batch order, each followed by a blank line.
///
/// Console and file destinations receive exactly these bytes.
pub fn render(entries: &[Entry]) -> String {
    entries.iter().map(|entry| format!("{}\n", entry)).collect()
}

/// Writes the final batch to the requested file, or to stdout.
///
/// The whole text is rendered before the destination is touched, so a
/// failure leaves either nothing written or the complete output.
pub struct OutputStage {
    console: Mutex<Box<dyn Write + Send>>,
}

impl Default for OutputStage {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStage {
    /// Console output goes to stdout.
    pub fn new() -> Self {
        Self::with_console(Box::new(io::stdout()))
    }

    /// Console output goes to `console` instead of stdout.
    pub fn with_console(console: Box<dyn Write + Send>) -> Self {
        Self {
            console: Mutex::new(console),
        }
    }

    async fn write_file(path: &Path, text: &str) -> PokedexResult<()> {
        // Creates or truncates
        tokio::fs::write(path, text)
            .await
            .map_err(|source| PokedexError::Output {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_console(&self, text: &str) -> PokedexResult<()> {
        let mut console = self
            .console
            .lock()
            .map_err(|_| PokedexError::Console(io::Error::new(io::ErrorKind::Other, "console writer poisoned")))?;
        console
            .write_all(text.as_bytes())
            .and_then(|_| console.flush())
            .map_err(PokedexError::Console)
    }
}

#[async_trait]
impl Stage for OutputStage {
    fn name(&self) -> &'static str {
        "output"
    }

    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        let text = render(&ctx.entries);
        match &ctx.output {
            Some(path) => {
                Self::write_file(path, &text).await?;
                info!(path = %path.display(), entries = ctx.entries.len(), "output written");
            }
            None => self.write_console(&text)?,
        }
        Ok(())
    }
}
