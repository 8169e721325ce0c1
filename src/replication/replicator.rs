//! # Line Replicator
//!
//! Turns source lines into new lines on the target quote, one creation call per line. A line that
//! fails (locally or remotely) is recorded and skipped; its siblings are still attempted.

use super::copy_spec::CopySpec;
use super::error::ValidationError;
use super::outcome::{
    CreatedLine, JobStatus, LineError, LineFailure, LineWarning, ReplicationOutcome,
};
use super::projector::project;
use super::quantity::{scale, Multiplier};
use super::record::{NewLineRecord, ReplicationTarget, SourceLineRecord};
use crate::remote::{RecordApi, RecordKind};
use tracing::{debug, info, warn};

pub struct LineReplicator<'a> {
    records: &'a dyn RecordApi,
    spec: &'a CopySpec,
}

impl<'a> LineReplicator<'a> {
    pub fn new(records: &'a dyn RecordApi, spec: &'a CopySpec) -> Self {
        Self { records, spec }
    }

    /// Copies `sources` onto `target`, scaling every quantity by `multiplier`.
    ///
    /// Calls are made one at a time in source order; no call is retried. An empty `sources` yields
    /// [`JobStatus::NoLinesFound`] without touching the org.
    pub async fn replicate(
        &self,
        sources: &[SourceLineRecord],
        target: &ReplicationTarget,
        multiplier: Multiplier,
    ) -> ReplicationOutcome {
        if sources.is_empty() {
            info!(quote_id = %target.quote_id, "No lines to copy");
            return ReplicationOutcome::terminal(JobStatus::NoLinesFound);
        }

        let mut outcome = ReplicationOutcome::terminal(JobStatus::Completed);
        outcome.group_id = target.group_id.clone();

        for source in sources {
            let line = match self.prepare(source, target, multiplier, &mut outcome.warnings) {
                Ok(line) => line,
                Err(e) => {
                    warn!(source_id = %source.id, error = %e, "Line rejected before submission");
                    outcome.failures.push(LineFailure {
                        source_id: source.id.clone(),
                        reason: LineError::Validation(e),
                    });
                    continue;
                }
            };

            debug!(source_id = %line.source_id, payload = ?line.payload, "Creating line");
            match self
                .records
                .create_record(RecordKind::QuoteLine, &line.payload)
                .await
            {
                Ok(record_id) => {
                    info!(source_id = %line.source_id, %record_id, "Line created");
                    outcome.created.push(CreatedLine {
                        source_id: line.source_id,
                        record_id,
                    });
                }
                Err(e) => {
                    warn!(source_id = %line.source_id, error = %e, "Line creation failed");
                    outcome.failures.push(LineFailure {
                        source_id: line.source_id,
                        reason: LineError::Remote(e),
                    });
                }
            }
        }

        outcome
    }

    fn prepare(
        &self,
        source: &SourceLineRecord,
        target: &ReplicationTarget,
        multiplier: Multiplier,
        warnings: &mut Vec<LineWarning>,
    ) -> Result<NewLineRecord, ValidationError> {
        let quantity = scale(&source.id, source.quantity.as_ref(), multiplier)?;
        if let Some(fallback) = quantity.fallback {
            warnings.push(LineWarning::Quantity {
                source_id: source.id.clone(),
                fallback,
            });
        }

        let projection = project(source, self.spec);
        warnings.extend(projection.truncations.into_iter().map(|truncation| {
            LineWarning::Truncated {
                source_id: source.id.clone(),
                truncation,
            }
        }));

        Ok(NewLineRecord::assemble(
            &source.id,
            projection.fields,
            quantity.value,
            target,
            self.spec,
        ))
    }
}
