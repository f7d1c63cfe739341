use super::Stage;
use crate::errors::PokedexResult;
use crate::fetcher::ApiFetcher;
use crate::request::RequestContext;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

/// Looks up every identifier of the batch at once.
///
/// All lookups run concurrently on the current task and the stage returns
/// only once each one has settled, so every position of `responses` is set.
pub struct FetchStage {
    fetcher: Arc<dyn ApiFetcher>,
}

impl FetchStage {
    pub fn new(fetcher: Arc<dyn ApiFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Stage for FetchStage {
    fn name(&self) -> &'static str {
        "fetch"
    }

    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        let kind = ctx.mode.kind();
        let lookups = ctx
            .identifiers
            .iter()
            .map(|identifier| self.fetcher.fetch(kind, identifier));

        // join_all yields results in input order regardless of completion order
        let responses = join_all(lookups).await;

        let failed = responses.iter().filter(|r| r.is_none()).count();
        info!(%kind, fetched = responses.len() - failed, failed, "fetch complete");

        ctx.responses = responses;
        Ok(())
    }
}
