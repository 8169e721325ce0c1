//! Turns an [`AppConfig`] into concrete [`ReplicationJob`]s against the sandbox org.
//!
//! Explicit `[[jobs]]` come first, in file order, followed by one job per child opportunity when
//! `[children]` is set. Child jobs are grouped under the child's name, described by the quote they
//! copy from. A job whose source quote is the target itself is dropped, explicit or not.

use super::reader::OrgReader;
use crate::config::{AppConfig, TargetRef};
use crate::model::{IdParseError, OpportunityId, QuoteId};
use crate::remote::{ResolutionError, SourceRef};
use crate::replication::{GroupRequest, ReplicationJob, ReplicationTarget};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    MalformedId(#[from] IdParseError),

    #[error("Target quote not found: {0}")]
    TargetNotFound(String),

    #[error("Parent opportunity not found: {0}")]
    ParentNotFound(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub target_quote_id: QuoteId,
    pub jobs: Vec<ReplicationJob>,
}

pub async fn plan_jobs(config: &AppConfig, reader: &OrgReader) -> Result<Plan, PlanError> {
    let target = match config.target_ref().map_err(|_| {
        PlanError::TargetNotFound("exactly one of quote_id or quote_name is required".into())
    })? {
        TargetRef::Id(id) => {
            let id: QuoteId = id.parse()?;
            reader
                .quote(id)
                .await?
                .ok_or_else(|| PlanError::TargetNotFound(id.to_string()))?
        }
        TargetRef::Name(name) => reader
            .find_quote_by_name(&name)
            .await?
            .ok_or(PlanError::TargetNotFound(name))?,
    };
    info!(target_quote = %target.id, name = %target.name, "Target resolved");

    let destination = ReplicationTarget::quote(target.id.to_string());
    let mut jobs = Vec::new();

    for job in &config.jobs {
        // Lookup errors are left for the batch to report.
        if matches!(reader.source_quote(&job.source).await, Ok(Some(q)) if q.id == target.id) {
            warn!(source = %job.source, "Skipping job whose source is the target");
            continue;
        }
        let label = job.label.clone().unwrap_or_else(|| job.source.to_string());
        let mut planned = ReplicationJob::new(label, job.source.clone(), destination.clone())
            .with_raw_multiplier(&job.multiplier);
        if let Err(e) = &planned.multiplier {
            warn!(job = %planned.label, error = %e, "Job has an invalid multiplier");
        }
        if config.group_enabled {
            planned.group = job.group.clone();
        }
        jobs.push(planned);
    }

    if let Some(children) = &config.children {
        let parent: OpportunityId = children.parent.parse()?;
        if reader.opportunity(parent).await?.is_none() {
            return Err(PlanError::ParentNotFound(parent.to_string()));
        }

        for child in reader.child_opportunities(parent).await? {
            let quote = reader.quote_for_opportunity(child.id).await?;
            if quote.as_ref().is_some_and(|q| q.id == target.id) {
                warn!(opportunity = %child.id, "Skipping child whose quote is the target");
                continue;
            }

            let mut planned = ReplicationJob::new(
                child.name.clone(),
                SourceRef::Opportunity(child.id.to_string()),
                destination.clone(),
            )
            .with_raw_multiplier(&children.multiplier);
            if config.group_enabled {
                let mut group = GroupRequest::named(child.name.clone());
                if let Some(quote) = &quote {
                    group = group
                        .with_description(format!("Lines copied from quote {} ({})", quote.name, quote.id));
                }
                planned.group = Some(group);
            }
            jobs.push(planned);
        }
    }

    info!(jobs = jobs.len(), "Jobs planned");
    Ok(Plan {
        target_quote_id: target.id,
        jobs,
    })
}
