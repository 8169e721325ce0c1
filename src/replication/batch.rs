//! # Batch Coordinator
//!
//! Runs replication jobs one after another against a shared [`ReplicationContext`]. Per job:
//! check the multiplier, resolve the source, stop early if there is nothing to copy, allocate the group if one was
//! requested, then replicate the lines. Nothing a job does can abort the jobs after it; only
//! cancellation does, and it is checked between jobs.

use super::copy_spec::CopySpec;
use super::error::ValidationError;
use super::group::{allocate_group, GroupRequest};
use super::outcome::{BatchReport, JobReport, JobStatus, Provenance, ReplicationOutcome};
use super::quantity::{Multiplier, RawMultiplier};
use super::record::ReplicationTarget;
use super::replicator::LineReplicator;
use crate::remote::{RecordApi, SourceRef, SourceResolver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// One unit of work: copy the lines behind `source` onto `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationJob {
    pub label: String,
    pub source: SourceRef,
    /// Quote (and optionally an existing group) receiving the lines.
    pub target: ReplicationTarget,
    /// Holds the validation error of a multiplier that failed to parse; the job then ends as
    /// [`JobStatus::InvalidMultiplier`] without touching the org.
    pub multiplier: Result<Multiplier, ValidationError>,
    /// A group to create for this job's lines. Overrides `target.group_id`.
    pub group: Option<GroupRequest>,
}

impl ReplicationJob {
    pub fn new(label: impl Into<String>, source: SourceRef, target: ReplicationTarget) -> Self {
        Self {
            label: label.into(),
            source,
            target,
            multiplier: Ok(Multiplier::default()),
            group: None,
        }
    }

    pub fn with_multiplier(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = Ok(multiplier);
        self
    }

    /// Sets the multiplier from user input, keeping a parse failure for the batch to report.
    pub fn with_raw_multiplier(mut self, raw: &RawMultiplier) -> Self {
        self.multiplier = raw.resolve();
        self
    }

    pub fn with_group(mut self, group: GroupRequest) -> Self {
        self.group = Some(group);
        self
    }
}

/// The collaborators and copy specification shared by every job in a batch.
#[derive(Clone)]
pub struct ReplicationContext {
    pub records: Arc<dyn RecordApi>,
    pub sources: Arc<dyn SourceResolver>,
    pub spec: Arc<CopySpec>,
}

/// Cooperative cancellation shared between the coordinator and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress notifications, emitted in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    JobStarted {
        index: usize,
        total: usize,
        label: String,
    },
    JobFinished {
        index: usize,
        total: usize,
        label: String,
        status: JobStatus,
        created: usize,
        total_created: usize,
    },
    BatchFinished {
        total_created: usize,
        cancelled: bool,
    },
}

pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_event(&self, event: &ProgressEvent) {
        self(event)
    }
}

pub struct BatchCoordinator {
    ctx: ReplicationContext,
    observer: Option<Box<dyn ProgressObserver>>,
}

impl BatchCoordinator {
    pub fn new(ctx: ReplicationContext) -> Self {
        Self {
            ctx,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Runs `jobs` in order. `cancel_check` is consulted before each job; once it returns true the
    /// remaining jobs are reported as [`JobStatus::Cancelled`].
    pub async fn run(&self, jobs: &[ReplicationJob], cancel_check: impl Fn() -> bool) -> BatchReport {
        let total = jobs.len();
        let mut report = BatchReport::default();
        let mut cancelled = false;

        info!(jobs = total, "Starting batch");

        for (index, job) in jobs.iter().enumerate() {
            if !cancelled && cancel_check() {
                warn!(remaining = total - index, "Batch cancelled");
                cancelled = true;
            }

            let outcome = if cancelled {
                ReplicationOutcome::terminal(JobStatus::Cancelled)
            } else {
                self.emit(ProgressEvent::JobStarted {
                    index,
                    total,
                    label: job.label.clone(),
                });
                let span = info_span!("job", label = %job.label, source = %job.source);
                self.run_job(job).instrument(span).await
            };

            report.total_created += outcome.created_count();
            if !cancelled {
                self.emit(ProgressEvent::JobFinished {
                    index,
                    total,
                    label: job.label.clone(),
                    status: outcome.status.clone(),
                    created: outcome.created_count(),
                    total_created: report.total_created,
                });
            }
            report.jobs.push(JobReport {
                label: job.label.clone(),
                outcome,
            });
        }

        info!(
            total_created = report.total_created,
            failed = report.total_failed(),
            cancelled,
            "Batch finished"
        );
        self.emit(ProgressEvent::BatchFinished {
            total_created: report.total_created,
            cancelled,
        });
        report
    }

    async fn run_job(&self, job: &ReplicationJob) -> ReplicationOutcome {
        let ctx = &self.ctx;

        let multiplier = match &job.multiplier {
            Ok(multiplier) => *multiplier,
            Err(e) => {
                warn!(error = %e, "Skipping job with invalid multiplier");
                return ReplicationOutcome::terminal(JobStatus::InvalidMultiplier {
                    detail: e.to_string(),
                });
            }
        };

        let resolved = match ctx.sources.resolve_sources(&job.source, &ctx.spec).await {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                warn!("No source quote found");
                return ReplicationOutcome::terminal(JobStatus::NoSourceFound);
            }
            Err(e) => {
                warn!(error = %e, "Source resolution failed");
                return ReplicationOutcome::terminal(JobStatus::ResolutionFailed {
                    detail: e.to_string(),
                });
            }
        };

        let provenance = Provenance {
            quote_id: resolved.quote_id.clone(),
            quote_name: resolved.quote_name.clone(),
            opportunity_name: resolved.opportunity_name.clone(),
        };
        info!(
            quote_id = %provenance.quote_id,
            quote_name = %provenance.quote_name,
            lines = resolved.lines.len(),
            "Resolved source"
        );

        if resolved.lines.is_empty() {
            let mut outcome = ReplicationOutcome::terminal(JobStatus::NoLinesFound);
            outcome.provenance = Some(provenance);
            return outcome;
        }

        let mut target = job.target.clone();
        if let Some(request) = &job.group {
            match allocate_group(ctx.records.as_ref(), &ctx.spec, &target.quote_id, request).await {
                Ok(group_id) => target.group_id = Some(group_id),
                Err(e) => {
                    let mut outcome =
                        ReplicationOutcome::terminal(JobStatus::GroupAllocationFailed {
                            detail: e.to_string(),
                        });
                    outcome.provenance = Some(provenance);
                    return outcome;
                }
            }
        }

        let mut outcome = LineReplicator::new(ctx.records.as_ref(), &ctx.spec)
            .replicate(&resolved.lines, &target, multiplier)
            .await;
        outcome.provenance = Some(provenance);

        info!(
            created = outcome.created_count(),
            failed = outcome.failures.len(),
            "Copied lines"
        );
        outcome
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RecordKind, RemoteWriteError, ResolutionError, ResolvedSource};
    use crate::replication::testing::{ScriptedRecordApi, TableResolver};
    use crate::replication::SourceLineRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn lines(ids: &[&str]) -> Vec<SourceLineRecord> {
        ids.iter()
            .map(|id| SourceLineRecord::new(*id, Some(json!(1)), Default::default()))
            .collect()
    }

    fn resolved(quote: &str, ids: &[&str]) -> ResolvedSource {
        ResolvedSource {
            quote_id: quote.to_string(),
            quote_name: format!("{quote} name"),
            opportunity_name: None,
            lines: lines(ids),
        }
    }

    fn context(api: Arc<ScriptedRecordApi>, resolver: TableResolver) -> ReplicationContext {
        ReplicationContext {
            records: api,
            sources: Arc::new(resolver),
            spec: Arc::new(CopySpec::default()),
        }
    }

    fn job(label: &str, quote: &str) -> ReplicationJob {
        ReplicationJob::new(label, SourceRef::Quote(quote.into()), ReplicationTarget::quote("T"))
    }

    #[tokio::test]
    async fn cancellation_before_second_job() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("N1").succeed("N2"));
        let resolver = TableResolver::new()
            .with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1", "a2"])))
            .with(SourceRef::Quote("B".into()), Ok(resolved("B", &["b1"])))
            .with(SourceRef::Quote("C".into()), Ok(resolved("C", &["c1"])));
        let coordinator = BatchCoordinator::new(context(api.clone(), resolver));

        let checks = AtomicUsize::new(0);
        let jobs = [job("one", "A"), job("two", "B"), job("three", "C")];
        let report = coordinator
            .run(&jobs, || checks.fetch_add(1, Ordering::SeqCst) >= 1)
            .await;

        let statuses: Vec<_> = report.jobs.iter().map(|j| j.outcome.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![JobStatus::Completed, JobStatus::Cancelled, JobStatus::Cancelled]
        );
        assert_eq!(report.total_created, 2);
        assert_eq!(api.calls().len(), 2);
        assert!(report.was_cancelled());
    }

    #[tokio::test]
    async fn resolution_outcomes_do_not_halt_batch() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("N1"));
        let resolver = TableResolver::new()
            .with(SourceRef::Quote("ERR".into()), Err(ResolutionError::Unavailable("503".into())))
            .with(SourceRef::Quote("EMPTY".into()), Ok(resolved("EMPTY", &[])))
            .with(SourceRef::Quote("OK".into()), Ok(resolved("OK", &["x"])));
        let coordinator = BatchCoordinator::new(context(api.clone(), resolver));

        let jobs = [
            job("missing", "NOPE"),
            job("broken", "ERR"),
            job("empty", "EMPTY"),
            job("good", "OK"),
        ];
        let report = coordinator.run(&jobs, || false).await;

        assert_eq!(report.jobs[0].outcome.status, JobStatus::NoSourceFound);
        assert!(matches!(
            report.jobs[1].outcome.status,
            JobStatus::ResolutionFailed { ref detail } if detail.contains("503")
        ));
        assert_eq!(report.jobs[2].outcome.status, JobStatus::NoLinesFound);
        assert_eq!(
            report.jobs[2].outcome.provenance.as_ref().map(|p| p.quote_id.as_str()),
            Some("EMPTY")
        );
        assert_eq!(report.jobs[3].outcome.status, JobStatus::Completed);
        assert_eq!(report.total_created, 1);
    }

    #[tokio::test]
    async fn invalid_multiplier_fails_only_its_job() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("N1").succeed("N2"));
        let resolver = Arc::new(
            TableResolver::new()
                .with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1"])))
                .with(SourceRef::Quote("B".into()), Ok(resolved("B", &["b1"]))),
        );
        let coordinator = BatchCoordinator::new(ReplicationContext {
            records: api.clone(),
            sources: resolver.clone(),
            spec: Arc::new(CopySpec::default()),
        });

        let jobs = [
            job("bad", "A").with_raw_multiplier(&RawMultiplier::Text("abc".into())),
            job("good", "B").with_raw_multiplier(&RawMultiplier::Text("2".into())),
        ];
        let report = coordinator.run(&jobs, || false).await;

        assert_eq!(
            report.jobs[0].outcome.status,
            JobStatus::InvalidMultiplier {
                detail: "Invalid multiplier: abc".into()
            }
        );
        assert_eq!(report.jobs[0].label, "bad");
        assert_eq!(report.jobs[1].outcome.status, JobStatus::Completed);
        assert_eq!(api.calls()[0].1["SBQQ__Quantity__c"], json!(2));
        assert_eq!(api.calls().len(), 1);
        // The bad job never reaches source resolution
        assert_eq!(resolver.lookups(), vec![SourceRef::Quote("B".into())]);
    }

    #[tokio::test]
    async fn group_is_allocated_once_and_linked() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("G1").succeed("N1").succeed("N2"));
        let resolver =
            TableResolver::new().with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1", "a2"])));
        let coordinator = BatchCoordinator::new(context(api.clone(), resolver));

        let jobs = [job("grouped", "A").with_group(GroupRequest::named("Child A"))];
        let report = coordinator.run(&jobs, || false).await;

        let outcome = &report.jobs[0].outcome;
        assert_eq!(outcome.group_id.as_deref(), Some("G1"));
        let calls = api.calls();
        assert_eq!(calls[0].0, RecordKind::QuoteLineGroup);
        for (kind, payload) in &calls[1..] {
            assert_eq!(*kind, RecordKind::QuoteLine);
            assert_eq!(payload["SBQQ__Group__c"], json!("G1"));
        }
    }

    #[tokio::test]
    async fn empty_source_creates_no_group() {
        let api = Arc::new(ScriptedRecordApi::new());
        let resolver = TableResolver::new().with(SourceRef::Quote("A".into()), Ok(resolved("A", &[])));
        let coordinator = BatchCoordinator::new(context(api.clone(), resolver));

        let jobs = [job("grouped", "A").with_group(GroupRequest::named("Child A"))];
        let report = coordinator.run(&jobs, || false).await;

        assert_eq!(report.jobs[0].outcome.status, JobStatus::NoLinesFound);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn group_failure_skips_lines_but_not_siblings() {
        let api = Arc::new(
            ScriptedRecordApi::new()
                .fail(RemoteWriteError::malformed("REQUIRED_FIELD_MISSING"))
                .succeed("N1"),
        );
        let resolver = TableResolver::new()
            .with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1"])))
            .with(SourceRef::Quote("B".into()), Ok(resolved("B", &["b1"])));
        let coordinator = BatchCoordinator::new(context(api.clone(), resolver));

        let jobs = [
            job("grouped", "A").with_group(GroupRequest::named("G")),
            job("plain", "B"),
        ];
        let report = coordinator.run(&jobs, || false).await;

        assert!(matches!(
            report.jobs[0].outcome.status,
            JobStatus::GroupAllocationFailed { .. }
        ));
        assert!(report.jobs[0].outcome.created.is_empty());
        assert_eq!(report.jobs[1].outcome.created_ids(), vec!["N1"]);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn observer_sees_running_totals() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("N1").succeed("N2"));
        let resolver = TableResolver::new()
            .with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1"])))
            .with(SourceRef::Quote("B".into()), Ok(resolved("B", &["b1"])));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let coordinator = BatchCoordinator::new(context(api, resolver))
            .with_observer(move |e: &ProgressEvent| sink.lock().unwrap().push(e.clone()));

        coordinator.run(&[job("a", "A"), job("b", "B")], || false).await;

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[3],
            ProgressEvent::JobFinished { index: 1, total_created: 2, .. }
        ));
        assert_eq!(
            events[4],
            ProgressEvent::BatchFinished {
                total_created: 2,
                cancelled: false
            }
        );
    }

    #[tokio::test]
    async fn cancel_flag_stops_remaining_jobs() {
        let api = Arc::new(ScriptedRecordApi::new().succeed("N1"));
        let resolver = TableResolver::new()
            .with(SourceRef::Quote("A".into()), Ok(resolved("A", &["a1"])))
            .with(SourceRef::Quote("B".into()), Ok(resolved("B", &["b1"])));
        let flag = CancelFlag::new();
        let trigger = flag.clone();
        let coordinator = BatchCoordinator::new(context(api, resolver)).with_observer(
            move |e: &ProgressEvent| {
                if matches!(e, ProgressEvent::JobFinished { index: 0, .. }) {
                    trigger.cancel();
                }
            },
        );

        let report = coordinator
            .run(&[job("a", "A"), job("b", "B")], || flag.is_cancelled())
            .await;

        assert_eq!(report.jobs[1].outcome.status, JobStatus::Cancelled);
        assert_eq!(report.total_created, 1);
    }
}
