//! The request-processing pipeline.
//!
//! A pipeline is an ordered list of stages run one after another by
//! [`Pipeline::run`]. Each stage fully transforms the shared
//! [`RequestContext`] before the next one starts. Every mode uses the same
//! shape, Fetch → Instantiate → Populate → Output, and differs only in the
//! populate stage.

pub mod fetch;
pub mod instantiate;
pub mod output;
pub mod populate;

#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::errors::PokedexResult;
use crate::fetcher::ApiFetcher;
use crate::request::{RequestContext, RequestMode};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub use fetch::FetchStage;
pub use instantiate::InstantiateStage;
pub use output::{render, OutputStage};
pub use populate::{ExpandedPopulateStage, PopulateError, PopulateStage};

/// One step of the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Apply this stage's transformation to every position of the batch.
    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// The fixed Fetch → Instantiate → Populate → Output chain for `mode`.
    pub fn for_mode(mode: RequestMode, fetcher: Arc<dyn ApiFetcher>, config: &Config) -> Self {
        let populate: Box<dyn Stage> = if mode.is_expanded() {
            Box::new(ExpandedPopulateStage::new(
                fetcher.clone(),
                config.expanded_concurrency,
            ))
        } else {
            Box::new(PopulateStage::new(mode.kind()))
        };

        Self::new(vec![
            Box::new(FetchStage::new(fetcher)),
            Box::new(InstantiateStage),
            populate,
            Box::new(OutputStage::new()),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage in order. Stops at the first environment-level failure.
    pub async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        info!(mode = ?ctx.mode, batch = ctx.len(), "running pipeline");
        for stage in &self.stages {
            let started = Instant::now();
            stage.run(ctx).await?;
            debug!(
                stage = stage.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "stage complete"
            );
        }
        Ok(())
    }
}
