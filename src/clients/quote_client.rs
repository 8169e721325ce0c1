//! # Quote Client
//!
//! Wraps a `ResourceClient<Quote>` and adds the lookups source resolution needs.
use super::recover_entity_error;
use crate::model::{OpportunityId, Quote, QuoteCreate, QuoteId};
use crate::quote_actor::{QuoteAction, QuoteError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::cmp::Reverse;
use tracing::{debug, instrument};

/// Client for interacting with the Quote actor.
#[derive(Clone)]
pub struct QuoteClient {
    inner: ResourceClient<Quote>,
}

impl QuoteClient {
    pub fn new(inner: ResourceClient<Quote>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_quote(&self, params: QuoteCreate) -> Result<QuoteId, QuoteError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_primary(&self, id: QuoteId, primary: bool) -> Result<Quote, QuoteError> {
        self.inner
            .perform_action(id, QuoteAction::SetPrimary(primary))
            .await
            .map_err(Self::map_error)
    }

    /// Quotes of an opportunity: primary first, then most recently created first.
    #[instrument(skip(self))]
    pub async fn quotes_for_opportunity(
        &self,
        opportunity: OpportunityId,
    ) -> Result<Vec<Quote>, QuoteError> {
        let mut quotes: Vec<Quote> = self
            .list()
            .await?
            .into_iter()
            .filter(|q| q.opportunity == Some(opportunity))
            .collect();
        quotes.sort_by_key(|q| (Reverse(q.primary), Reverse(q.id)));
        Ok(quotes)
    }

    /// The most recently created quote named `name`.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Quote>, QuoteError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|q| q.name == name)
            .max_by_key(|q| q.id))
    }
}

#[async_trait]
impl ActorClient<Quote> for QuoteClient {
    type Error = QuoteError;

    fn inner(&self) -> &ResourceClient<Quote> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_create, MockClient};

    fn quote(id: u32, name: &str, opp: Option<u32>, primary: bool) -> Quote {
        Quote::new(QuoteId(id), name, opp.map(OpportunityId), primary)
    }

    #[tokio::test]
    async fn primary_quote_comes_first_then_newest() {
        let mut mock = MockClient::<Quote>::new();
        mock.expect_list().return_ok(vec![
            quote(1, "Old", Some(7), false),
            quote(2, "Primary", Some(7), true),
            quote(3, "Newest", Some(7), false),
            quote(4, "Elsewhere", Some(8), true),
        ]);
        let client = QuoteClient::new(mock.client());

        let quotes = client.quotes_for_opportunity(OpportunityId(7)).await.unwrap();

        let names: Vec<_> = quotes.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Primary", "Newest", "Old"]);
    }

    #[tokio::test]
    async fn set_primary_sends_action() {
        let mut mock = MockClient::<Quote>::new();
        mock.expect_action(QuoteId(3))
            .return_ok(quote(3, "Q-Line1", Some(2), true));
        mock.expect_action(QuoteId(9))
            .return_err(FrameworkError::NotFound("quote_9".into()));
        let client = QuoteClient::new(mock.client());

        let updated = client.set_primary(QuoteId(3), true).await.unwrap();
        assert!(updated.primary);
        assert!(matches!(
            client.set_primary(QuoteId(9), false).await,
            Err(QuoteError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn find_by_name_picks_most_recent() {
        let mut mock = MockClient::<Quote>::new();
        mock.expect_list().return_ok(vec![
            quote(1, "Q-100", None, false),
            quote(2, "Q-200", None, false),
            quote(3, "Q-100", None, false),
        ]);
        mock.expect_list().return_ok(vec![]);
        let client = QuoteClient::new(mock.client());

        let found = client.find_by_name("Q-100").await.unwrap();
        assert_eq!(found.map(|q| q.id), Some(QuoteId(3)));
        assert_eq!(client.find_by_name("Q-100").await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn entity_error_is_recovered() {
        let (client, mut receiver) = create_mock_client::<Quote>(10);
        let quote_client = QuoteClient::new(client);

        let task = tokio::spawn(async move {
            quote_client
                .create_quote(QuoteCreate {
                    name: "Q".into(),
                    opportunity: Some(OpportunityId(5)),
                    primary: false,
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.opportunity, Some(OpportunityId(5)));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                QuoteError::InvalidOpportunity("opp_5".into()),
            ))))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(QuoteError::InvalidOpportunity("opp_5".into())));
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Quote>(1);
        drop(receiver);
        let result = QuoteClient::new(client)
            .create_quote(QuoteCreate {
                name: "Q".into(),
                opportunity: None,
                primary: false,
            })
            .await;
        assert!(matches!(result, Err(QuoteError::ActorCommunicationError(_))));
    }
}
