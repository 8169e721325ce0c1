//! # Opportunity Client
//!
//! Wraps a `ResourceClient<Opportunity>`. Parent links are validated here rather than in the
//! entity, because the Opportunity actor cannot call itself.
use super::recover_entity_error;
use crate::model::{Opportunity, OpportunityCreate, OpportunityId};
use crate::opportunity_actor::OpportunityError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Opportunity actor.
#[derive(Clone)]
pub struct OpportunityClient {
    inner: ResourceClient<Opportunity>,
}

impl OpportunityClient {
    pub fn new(inner: ResourceClient<Opportunity>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_opportunity(
        &self,
        params: OpportunityCreate,
    ) -> Result<OpportunityId, OpportunityError> {
        if let Some(parent) = params.parent {
            if self.get(parent).await?.is_none() {
                return Err(OpportunityError::ParentNotFound(parent.to_string()));
            }
        }
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Direct children of `parent`, in creation order.
    #[instrument(skip(self))]
    pub async fn children_of(
        &self,
        parent: OpportunityId,
    ) -> Result<Vec<Opportunity>, OpportunityError> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|o| o.parent == Some(parent))
            .collect())
    }
}

#[async_trait]
impl ActorClient<Opportunity> for OpportunityClient {
    type Error = OpportunityError;

    fn inner(&self) -> &ResourceClient<Opportunity> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    fn opp(id: u32, name: &str, parent: Option<u32>) -> Opportunity {
        Opportunity::new(OpportunityId(id), name, parent.map(OpportunityId))
    }

    #[tokio::test]
    async fn children_are_filtered_by_parent() {
        let mut mock = MockClient::<Opportunity>::new();
        mock.expect_list().return_ok(vec![
            opp(1, "Parent", None),
            opp(2, "Child A", Some(1)),
            opp(3, "Other", None),
            opp(4, "Child B", Some(1)),
        ]);
        let client = OpportunityClient::new(mock.client());

        let children = client.children_of(OpportunityId(1)).await.unwrap();

        let names: Vec<_> = children.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Child A", "Child B"]);
        mock.verify();
    }

    #[tokio::test]
    async fn unknown_parent_is_rejected_before_create() {
        let mut mock = MockClient::<Opportunity>::new();
        mock.expect_get(OpportunityId(9)).return_ok(None);
        let client = OpportunityClient::new(mock.client());

        let result = client
            .create_opportunity(OpportunityCreate {
                name: "Orphan".into(),
                parent: Some(OpportunityId(9)),
            })
            .await;

        assert_eq!(result, Err(OpportunityError::ParentNotFound("opp_9".into())));
        assert!(mock.take_created().is_empty());
        mock.verify();
    }
}
