//! # QuoteLineGroup Client
use super::recover_entity_error;
use crate::line_group_actor::LineGroupError;
use crate::model::{GroupId, QuoteId, QuoteLineGroup, QuoteLineGroupCreate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the QuoteLineGroup actor.
#[derive(Clone)]
pub struct LineGroupClient {
    inner: ResourceClient<QuoteLineGroup>,
}

impl LineGroupClient {
    pub fn new(inner: ResourceClient<QuoteLineGroup>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_group(&self, params: QuoteLineGroupCreate) -> Result<GroupId, LineGroupError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Groups on `quote`, in creation order.
    #[instrument(skip(self))]
    pub async fn groups_on(&self, quote: QuoteId) -> Result<Vec<QuoteLineGroup>, LineGroupError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|g| g.quote == quote)
            .collect())
    }
}

#[async_trait]
impl ActorClient<QuoteLineGroup> for LineGroupClient {
    type Error = LineGroupError;

    fn inner(&self) -> &ResourceClient<QuoteLineGroup> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e)
    }
}
