//! [`ActorEntity`] implementation for [`Quote`].
//!
//! Context is the [`OpportunityClient`]: a quote linked to an opportunity is only stored if that
//! opportunity exists.

use super::actions::QuoteAction;
use super::error::QuoteError;
use crate::clients::OpportunityClient;
use crate::model::{Quote, QuoteCreate, QuoteId, QuoteUpdate};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Quote {
    type Id = QuoteId;
    type Create = QuoteCreate;
    type Update = QuoteUpdate;
    type Action = QuoteAction;
    type ActionResult = Quote;
    type Context = OpportunityClient;
    type Error = QuoteError;

    fn from_create_params(id: QuoteId, params: QuoteCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(QuoteError::ValidationError("name is required".to_string()));
        }
        Ok(Self::new(id, params.name, params.opportunity, params.primary))
    }

    async fn on_create(&mut self, opportunities: &OpportunityClient) -> Result<(), Self::Error> {
        let Some(opportunity) = self.opportunity else {
            return Ok(());
        };
        debug!(quote_id = %self.id, %opportunity, "Checking opportunity");
        match opportunities.get(opportunity).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(QuoteError::InvalidOpportunity(opportunity.to_string())),
            Err(e) => Err(QuoteError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: QuoteUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: QuoteAction,
        _ctx: &Self::Context,
    ) -> Result<Quote, Self::Error> {
        match action {
            QuoteAction::SetPrimary(primary) => {
                debug!(quote_id = %self.id, primary, "Setting primary flag");
                self.primary = primary;
            }
        }
        Ok(self.clone())
    }
}
