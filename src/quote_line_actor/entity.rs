//! [`ActorEntity`] implementation for [`QuoteLine`].
//!
//! `on_create` plays the org's server-side validation: the line is refused unless its quote exists,
//! its group (if any) exists on that same quote, and its fields pass the [`OrgRules`].

use super::error::QuoteLineError;
use super::rules::OrgRules;
use crate::clients::{LineGroupClient, QuoteClient};
use crate::model::{LineId, QuoteLine, QuoteLineCreate, QuoteLineUpdate};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use std::sync::Arc;

/// Dependencies of the QuoteLine actor.
#[derive(Clone)]
pub struct QuoteLineContext {
    pub quotes: QuoteClient,
    pub groups: LineGroupClient,
    pub rules: Arc<OrgRules>,
}

#[async_trait]
impl ActorEntity for QuoteLine {
    type Id = LineId;
    type Create = QuoteLineCreate;
    type Update = QuoteLineUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = QuoteLineContext;
    type Error = QuoteLineError;

    fn from_create_params(id: LineId, params: QuoteLineCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            quote: params.quote,
            group: params.group,
            quantity: params.quantity,
            fields: params.fields,
        })
    }

    async fn on_create(&mut self, ctx: &QuoteLineContext) -> Result<(), Self::Error> {
        match ctx.quotes.get(self.quote).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(QuoteLineError::InvalidQuote(self.quote.to_string())),
            Err(e) => return Err(QuoteLineError::ActorCommunicationError(e.to_string())),
        }

        if let Some(group_id) = self.group {
            match ctx.groups.get(group_id).await {
                Ok(Some(group)) if group.quote == self.quote => {}
                Ok(Some(group)) => {
                    return Err(QuoteLineError::GroupOnOtherQuote {
                        group: group_id.to_string(),
                        group_quote: group.quote.to_string(),
                        quote: self.quote.to_string(),
                    })
                }
                Ok(None) => return Err(QuoteLineError::InvalidGroup(group_id.to_string())),
                Err(e) => return Err(QuoteLineError::ActorCommunicationError(e.to_string())),
            }
        }

        ctx.rules.check(&self.fields)
    }

    async fn on_update(
        &mut self,
        update: QuoteLineUpdate,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let mut fields = self.fields.clone();
        for (name, value) in update.fields {
            match value {
                Some(value) => {
                    fields.insert(name, value);
                }
                None => {
                    fields.remove(&name);
                }
            }
        }
        ctx.rules.check(&fields)?;
        self.fields = fields;
        if let Some(quantity) = update.quantity {
            self.quantity = Some(quantity);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
