//! # quote-merger
//!
//! Copies quote lines from one or more source quotes into a target quote, scaling quantities and
//! optionally filing each source's lines under its own quote line group.
//!
//! The binary runs against an in-memory sandbox org seeded from a JSON fixture:
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config demos/merge.toml --fixture demos/org.json
//! RUST_LOG=debug cargo run -- --config demos/merge.toml --fixture demos/org.json --dry-run
//! ```
//!
//! Ctrl-C cancels the batch between jobs; jobs not yet started are reported as cancelled.

use actor_framework::tracing::setup_tracing;
use anyhow::Context;
use clap::Parser;
use quote_merger::config::AppConfig;
use quote_merger::lifecycle::{plan_jobs, DryRunRecorder, Fixture, SandboxOrg};
use quote_merger::remote::RecordApi;
use quote_merger::replication::{
    BatchCoordinator, CancelFlag, JobStatus, LineWarning, ProgressEvent, ReplicationContext,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

#[derive(Parser)]
#[command(name = "quote-merger")]
#[command(about = "Replicate CPQ quote lines into a target quote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Run configuration (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Sandbox org contents (JSON)
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Log the records that would be created without creating them
    #[arg(long)]
    dry_run: bool,

    /// Delete every existing line on the target quote first
    #[arg(long)]
    clear_target: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    let spec = Arc::new(config.copy_spec()?);

    let org = SandboxOrg::new(config.org.clone());
    if let Some(path) = &cli.fixture {
        Fixture::load(path)?
            .seed(&org)
            .await
            .with_context(|| format!("seeding {}", path.display()))?;
    }

    let reader = Arc::new(org.reader());
    let plan = plan_jobs(&config, &reader).await?;

    if cli.clear_target {
        if cli.dry_run {
            info!(quote = %plan.target_quote_id, "Dry run: target lines kept");
        } else {
            let cleared = org.clear_quote_lines(plan.target_quote_id).await?;
            if !cleared.failed.is_empty() {
                warn!(failed = cleared.failed.len(), "Some target lines could not be deleted");
            }
        }
    }

    let records: Arc<dyn RecordApi> = if cli.dry_run {
        Arc::new(DryRunRecorder::new())
    } else {
        Arc::new(org.writer(spec.linkage().clone()))
    };

    let cancel = CancelFlag::new();
    let on_ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling remaining jobs");
                cancel.cancel();
            }
        })
    };

    let coordinator = BatchCoordinator::new(ReplicationContext {
        records,
        sources: reader,
        spec,
    })
    .with_observer(|event: &ProgressEvent| {
        if let ProgressEvent::JobStarted { index, total, label } = event {
            info!("[{}/{}] {}", index + 1, total, label);
        }
    });

    let report = coordinator
        .run(&plan.jobs, || cancel.is_cancelled())
        .instrument(info_span!("batch", target = %plan.target_quote_id))
        .await;
    on_ctrl_c.abort();

    for job in &report.jobs {
        let outcome = &job.outcome;
        match &outcome.status {
            JobStatus::Completed => info!(
                job = %job.label,
                created = outcome.created_count(),
                failed = outcome.failures.len(),
                "Job done"
            ),
            status => warn!(job = %job.label, %status, "Job not completed"),
        }
        for failure in &outcome.failures {
            warn!(job = %job.label, source_id = %failure.source_id, reason = %failure.reason, "Line not copied");
        }
        let truncated = outcome
            .warnings
            .iter()
            .filter(|w| matches!(w, LineWarning::Truncated { .. }))
            .count();
        if truncated > 0 {
            info!(job = %job.label, truncated, "Large text fields truncated");
        }
    }
    info!(
        jobs = report.jobs.len(),
        created = report.total_created,
        failed = report.total_failed(),
        cancelled = report.was_cancelled(),
        dry_run = cli.dry_run,
        "Batch complete"
    );

    // The coordinator holds client clones; the actors only stop once it is gone.
    drop(coordinator);
    org.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
