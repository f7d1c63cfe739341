use super::Stage;
use crate::errors::PokedexResult;
use crate::request::RequestContext;
use async_trait::async_trait;
use schema::Record;

/// Allocates an empty record for every successful lookup.
///
/// Positions whose lookup failed stay `None`, so populate never has to
/// special-case a missing response field by field.
pub struct InstantiateStage;

#[async_trait]
impl Stage for InstantiateStage {
    fn name(&self) -> &'static str {
        "instantiate"
    }

    async fn run(&self, ctx: &mut RequestContext) -> PokedexResult<()> {
        let kind = ctx.mode.kind();
        ctx.records = ctx
            .responses
            .iter()
            .map(|response| response.as_ref().map(|_| Record::empty(kind)))
            .collect();
        Ok(())
    }
}
