//! [`ActorEntity`] implementation for [`QuoteLineGroup`].

use super::error::LineGroupError;
use crate::clients::QuoteClient;
use crate::model::{GroupId, QuoteLineGroup, QuoteLineGroupCreate, QuoteLineGroupUpdate};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for QuoteLineGroup {
    type Id = GroupId;
    type Create = QuoteLineGroupCreate;
    type Update = QuoteLineGroupUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = QuoteClient;
    type Error = LineGroupError;

    fn from_create_params(id: GroupId, params: QuoteLineGroupCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(LineGroupError::ValidationError(
                "name is required".to_string(),
            ));
        }
        Ok(Self {
            id,
            quote: params.quote,
            name: params.name,
            description: params.description,
        })
    }

    /// The group's quote must exist.
    async fn on_create(&mut self, quotes: &QuoteClient) -> Result<(), Self::Error> {
        match quotes.get(self.quote).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(LineGroupError::InvalidQuote(self.quote.to_string())),
            Err(e) => Err(LineGroupError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(
        &mut self,
        update: QuoteLineGroupUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
