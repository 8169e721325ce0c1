//! # Org Collaborators
//!
//! The replication engine talks to the outside world through two async traits: [`RecordApi`] creates
//! records, [`SourceResolver`] turns a [`SourceRef`] into the lines to copy. The sandbox org and the
//! dry-run recorder in [`crate::lifecycle`] implement them; a live CRM client would too.

use crate::replication::{CopySpec, FieldMap, SourceLineRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Record types the engine creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    QuoteLine,
    QuoteLineGroup,
}

impl RecordKind {
    /// CPQ object API name.
    pub fn api_name(self) -> &'static str {
        match self {
            RecordKind::QuoteLine => "SBQQ__QuoteLine__c",
            RecordKind::QuoteLineGroup => "SBQQ__QuoteLineGroup__c",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// A rejected record creation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteWriteError {
    /// The org refused the payload (validation rule, bad reference, field too long, ...).
    #[error("Malformed request: {detail}")]
    MalformedRequest { detail: String },

    /// The request never got a verdict.
    #[error("Transport error: {detail}")]
    Transport { detail: String },
}

impl RemoteWriteError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedRequest {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }
}

/// A source lookup that could not be answered. "Nothing there" is `Ok(None)`, not an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolutionError {
    #[error("Org unavailable: {0}")]
    Unavailable(String),
}

/// What a job copies from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRef {
    /// The primary (else most recent) quote of an opportunity.
    Opportunity(String),
    /// A quote by id.
    Quote(String),
    /// The most recent quote with this name.
    QuoteName(String),
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Opportunity(id) => write!(f, "opportunity {id}"),
            SourceRef::Quote(id) => write!(f, "quote {id}"),
            SourceRef::QuoteName(name) => write!(f, "quote named {name:?}"),
        }
    }
}

/// A source quote and its lines, restricted to [`CopySpec::query_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub quote_id: String,
    pub quote_name: String,
    pub opportunity_name: Option<String>,
    pub lines: Vec<SourceLineRecord>,
}

/// Creates records in the target org.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Creates one record and returns its id. One call, one attempt.
    async fn create_record(
        &self,
        kind: RecordKind,
        payload: &FieldMap,
    ) -> Result<String, RemoteWriteError>;
}

/// Finds the lines a job copies.
#[async_trait]
pub trait SourceResolver: Send + Sync {
    async fn resolve_sources(
        &self,
        source: &SourceRef,
        spec: &CopySpec,
    ) -> Result<Option<ResolvedSource>, ResolutionError>;
}
