use crate::clients::{OpportunityClient, QuoteClient, QuoteLineClient};
use crate::model::{Opportunity, OpportunityId, Quote, QuoteId, QuoteLine};
use crate::remote::{ResolutionError, ResolvedSource, SourceRef, SourceResolver};
use crate::replication::{CopySpec, FieldMap, SourceLineRecord};
use actor_framework::ActorClient;
use async_trait::async_trait;
use std::fmt::Display;
use tracing::{debug, instrument};

/// Read access to the sandbox org, and the engine's [`SourceResolver`].
#[derive(Clone)]
pub struct OrgReader {
    opportunities: OpportunityClient,
    quotes: QuoteClient,
    lines: QuoteLineClient,
}

fn unavailable(e: impl Display) -> ResolutionError {
    ResolutionError::Unavailable(e.to_string())
}

impl OrgReader {
    pub fn new(opportunities: OpportunityClient, quotes: QuoteClient, lines: QuoteLineClient) -> Self {
        Self {
            opportunities,
            quotes,
            lines,
        }
    }

    pub async fn opportunity(&self, id: OpportunityId) -> Result<Option<Opportunity>, ResolutionError> {
        self.opportunities.get(id).await.map_err(unavailable)
    }

    /// Children of `parent`, in creation order.
    pub async fn child_opportunities(
        &self,
        parent: OpportunityId,
    ) -> Result<Vec<Opportunity>, ResolutionError> {
        self.opportunities.children_of(parent).await.map_err(unavailable)
    }

    /// The primary quote of `opportunity`, else its most recently created one.
    pub async fn quote_for_opportunity(
        &self,
        opportunity: OpportunityId,
    ) -> Result<Option<Quote>, ResolutionError> {
        let quotes = self
            .quotes
            .quotes_for_opportunity(opportunity)
            .await
            .map_err(unavailable)?;
        Ok(quotes.into_iter().next())
    }

    pub async fn quote(&self, id: QuoteId) -> Result<Option<Quote>, ResolutionError> {
        self.quotes.get(id).await.map_err(unavailable)
    }

    /// The most recently created quote named `name`.
    pub async fn find_quote_by_name(&self, name: &str) -> Result<Option<Quote>, ResolutionError> {
        self.quotes.find_by_name(name).await.map_err(unavailable)
    }

    /// Lines of `quote`, in creation order.
    pub async fn quote_lines(&self, quote: QuoteId) -> Result<Vec<QuoteLine>, ResolutionError> {
        self.lines.lines_on(quote).await.map_err(unavailable)
    }

    /// The quote a job would copy from. Ids that do not parse resolve to `None`.
    pub async fn source_quote(&self, source: &SourceRef) -> Result<Option<Quote>, ResolutionError> {
        match source {
            SourceRef::Opportunity(id) => {
                let Ok(id) = id.parse::<OpportunityId>() else {
                    return Ok(None);
                };
                self.quote_for_opportunity(id).await
            }
            SourceRef::Quote(id) => match id.parse::<QuoteId>() {
                Ok(id) => self.quote(id).await,
                Err(_) => Ok(None),
            },
            SourceRef::QuoteName(name) => self.find_quote_by_name(name).await,
        }
    }
}

/// A stored line restricted to the fields `spec` queries.
fn to_source_record(line: QuoteLine, query: &[String]) -> SourceLineRecord {
    let selected: FieldMap = line
        .fields
        .into_iter()
        .filter(|(name, _)| query.contains(name))
        .collect();
    SourceLineRecord::new(line.id.to_string(), line.quantity, selected)
}

#[async_trait]
impl SourceResolver for OrgReader {
    #[instrument(skip(self, spec))]
    async fn resolve_sources(
        &self,
        source: &SourceRef,
        spec: &CopySpec,
    ) -> Result<Option<ResolvedSource>, ResolutionError> {
        let Some(quote) = self.source_quote(source).await? else {
            debug!("No quote");
            return Ok(None);
        };

        let opportunity_name = match quote.opportunity {
            Some(id) => self.opportunity(id).await?.map(|o| o.name),
            None => None,
        };

        let query = spec.query_fields();
        let lines = self
            .quote_lines(quote.id)
            .await?
            .into_iter()
            .map(|line| to_source_record(line, &query))
            .collect::<Vec<_>>();
        debug!(quote_id = %quote.id, lines = lines.len(), "Resolved");

        Ok(Some(ResolvedSource {
            quote_id: quote.id.to_string(),
            quote_name: quote.name,
            opportunity_name,
            lines,
        }))
    }
}
