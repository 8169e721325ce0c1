//! Per-job and per-batch results.

use super::error::ValidationError;
use super::projector::Truncation;
use super::quantity::QuantityFallback;
use crate::remote::RemoteWriteError;
use std::fmt;
use thiserror::Error;

/// How a job ended.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// Every line was attempted; some may still have failed (see `failures`).
    Completed,
    /// The source quote exists but has no lines.
    NoLinesFound,
    /// The source reference led to no quote.
    NoSourceFound,
    /// The job's multiplier is not a finite positive number; nothing was resolved or created.
    InvalidMultiplier { detail: String },
    /// The source lookup itself failed.
    ResolutionFailed { detail: String },
    /// The group could not be created; no lines were attempted.
    GroupAllocationFailed { detail: String },
    /// The batch was cancelled before this job started.
    Cancelled,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Completed => f.write_str("completed"),
            JobStatus::NoLinesFound => f.write_str("no lines found"),
            JobStatus::NoSourceFound => f.write_str("no source found"),
            JobStatus::InvalidMultiplier { detail } => f.write_str(detail),
            JobStatus::ResolutionFailed { detail } => write!(f, "resolution failed: {detail}"),
            JobStatus::GroupAllocationFailed { detail } => {
                write!(f, "group allocation failed: {detail}")
            }
            JobStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Why one line was not created.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteWriteError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedLine {
    pub source_id: String,
    pub record_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    pub source_id: String,
    pub reason: LineError,
}

/// Something that changed a line's data without failing it.
#[derive(Debug, Clone, PartialEq)]
pub enum LineWarning {
    Quantity {
        source_id: String,
        fallback: QuantityFallback,
    },
    Truncated {
        source_id: String,
        truncation: Truncation,
    },
}

/// The source a job copied from.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub quote_id: String,
    pub quote_name: String,
    pub opportunity_name: Option<String>,
}

/// Result of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationOutcome {
    pub status: JobStatus,
    /// Created lines in source order.
    pub created: Vec<CreatedLine>,
    pub failures: Vec<LineFailure>,
    pub warnings: Vec<LineWarning>,
    pub group_id: Option<String>,
    pub provenance: Option<Provenance>,
}

impl ReplicationOutcome {
    /// An outcome with nothing attempted.
    pub fn terminal(status: JobStatus) -> Self {
        Self {
            status,
            created: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            group_id: None,
            provenance: None,
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn created_ids(&self) -> Vec<&str> {
        self.created.iter().map(|c| c.record_id.as_str()).collect()
    }
}

/// One job's label and outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub label: String,
    pub outcome: ReplicationOutcome,
}

/// Outcomes of a batch, in job order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
    pub total_created: usize,
}

impl BatchReport {
    pub fn total_failed(&self) -> usize {
        self.jobs.iter().map(|j| j.outcome.failures.len()).sum()
    }

    pub fn was_cancelled(&self) -> bool {
        self.jobs
            .iter()
            .any(|j| j.outcome.status == JobStatus::Cancelled)
    }
}
