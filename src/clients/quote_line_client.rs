//! # QuoteLine Client
//!
//! Wraps a `ResourceClient<QuoteLine>`. Validation failures from the actor come back as the
//! matching [`QuoteLineError`] variant, not as a generic communication error.
use super::recover_entity_error;
use crate::model::{LineId, QuoteId, QuoteLine, QuoteLineCreate};
use crate::quote_line_actor::QuoteLineError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the QuoteLine actor.
#[derive(Clone)]
pub struct QuoteLineClient {
    inner: ResourceClient<QuoteLine>,
}

impl QuoteLineClient {
    pub fn new(inner: ResourceClient<QuoteLine>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(quote = %params.quote))]
    pub async fn create_line(&self, params: QuoteLineCreate) -> Result<LineId, QuoteLineError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Lines on `quote`, in creation order.
    #[instrument(skip(self))]
    pub async fn lines_on(&self, quote: QuoteId) -> Result<Vec<QuoteLine>, QuoteLineError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|l| l.quote == quote)
            .collect())
    }
}

#[async_trait]
impl ActorClient<QuoteLine> for QuoteLineClient {
    type Error = QuoteLineError;

    fn inner(&self) -> &ResourceClient<QuoteLine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e)
    }
}
