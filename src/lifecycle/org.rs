use crate::clients::{LineGroupClient, OpportunityClient, QuoteClient, QuoteLineClient};
use crate::model::{LineId, QuoteId};
use crate::quote_line_actor::{OrgRules, QuoteLineContext, QuoteLineError};
use crate::replication::LinkageFields;
use actor_framework::ActorClient;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::reader::OrgReader;
use super::writer::OrgWriter;

/// An in-memory stand-in for a CPQ org, built from four actors.
///
/// `SandboxOrg` is responsible for:
/// - **Lifecycle Management**: starting and stopping the Opportunity, Quote, QuoteLineGroup and
///   QuoteLine actors
/// - **Dependency Wiring**: quotes check opportunities, groups check quotes, lines check both
/// - **Access**: handing out an [`OrgReader`] (source resolution) and an [`OrgWriter`] (record
///   creation) for the replication engine
///
/// # Example
///
/// ```ignore
/// let org = SandboxOrg::new(OrgRules::default());
/// let reader = org.reader();
/// let writer = org.writer(LinkageFields::default());
/// // ... run a batch ...
/// drop((reader, writer));
/// org.shutdown().await?;
/// ```
pub struct SandboxOrg {
    pub opportunity_client: OpportunityClient,
    pub quote_client: QuoteClient,
    pub group_client: LineGroupClient,
    pub line_client: QuoteLineClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

/// Result of [`SandboxOrg::clear_quote_lines`].
#[derive(Debug, Default)]
pub struct ClearReport {
    pub deleted: usize,
    pub failed: Vec<(LineId, QuoteLineError)>,
}

impl SandboxOrg {
    /// Starts all four actors. Must be called inside a Tokio runtime.
    pub fn new(rules: OrgRules) -> Self {
        // 1. Create actors (no dependencies)
        let (opportunity_actor, opportunity_client) = crate::opportunity_actor::new();
        let (quote_actor, quote_client) = crate::quote_actor::new();
        let (group_actor, group_client) = crate::line_group_actor::new();
        let (line_actor, line_client) = crate::quote_line_actor::new();

        // 2. Start actors with injected context
        let opportunity_handle = tokio::spawn(opportunity_actor.run(()));
        let quote_handle = tokio::spawn(quote_actor.run(opportunity_client.clone()));
        let group_handle = tokio::spawn(group_actor.run(quote_client.clone()));
        let line_handle = tokio::spawn(line_actor.run(QuoteLineContext {
            quotes: quote_client.clone(),
            groups: group_client.clone(),
            rules: Arc::new(rules),
        }));

        info!("Sandbox org started");

        Self {
            opportunity_client,
            quote_client,
            group_client,
            line_client,
            handles: vec![opportunity_handle, quote_handle, group_handle, line_handle],
        }
    }

    /// Read side: source resolution and lookups.
    pub fn reader(&self) -> OrgReader {
        OrgReader::new(
            self.opportunity_client.clone(),
            self.quote_client.clone(),
            self.line_client.clone(),
        )
    }

    /// Write side: record creation from field maps named per `linkage`.
    pub fn writer(&self, linkage: LinkageFields) -> OrgWriter {
        OrgWriter::new(self.line_client.clone(), self.group_client.clone(), linkage)
    }

    /// Deletes every line on `quote`, one request per line. Failures are collected, not fatal.
    pub async fn clear_quote_lines(&self, quote: QuoteId) -> Result<ClearReport, QuoteLineError> {
        let lines = self.line_client.lines_on(quote).await?;
        info!(%quote, lines = lines.len(), "Clearing quote lines");

        let mut report = ClearReport::default();
        for line in lines {
            match self.line_client.delete(line.id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(line_id = %line.id, error = %e, "Delete failed");
                    report.failed.push((line.id, e));
                }
            }
        }
        info!(%quote, deleted = report.deleted, failed = report.failed.len(), "Cleared");
        Ok(report)
    }

    /// Stops every actor.
    ///
    /// Readers and writers handed out by this org hold client clones; they must be dropped first or
    /// the actors they talk to never see their channels close.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down sandbox org...");

        // Dropping the clients closes the channels; each actor drains and exits, releasing the
        // clients held in its context, which lets its dependencies exit in turn.
        drop(self.line_client);
        drop(self.group_client);
        drop(self.quote_client);
        drop(self.opportunity_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Sandbox org shutdown complete.");
        Ok(())
    }
}
