//! # Group Allocator
//!
//! Creates the quote line group a job's lines are filed under. Not idempotent: every call creates a
//! new group, so callers allocate at most once per job.

use super::copy_spec::CopySpec;
use super::record::FieldMap;
use crate::remote::{RecordApi, RecordKind, RemoteWriteError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Name and optional description of a group to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl GroupRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Creates one group on `quote_id` and returns its id.
#[instrument(skip(records, spec), fields(group = %request.name))]
pub async fn allocate_group(
    records: &dyn RecordApi,
    spec: &CopySpec,
    quote_id: &str,
    request: &GroupRequest,
) -> Result<String, RemoteWriteError> {
    let linkage = spec.linkage();
    let mut payload = FieldMap::new();
    payload.insert(linkage.quote.clone(), Value::String(quote_id.to_string()));
    payload.insert(linkage.group_name.clone(), Value::String(request.name.clone()));
    if let Some(description) = &request.description {
        payload.insert(
            linkage.group_description.clone(),
            Value::String(description.clone()),
        );
    }

    match records
        .create_record(RecordKind::QuoteLineGroup, &payload)
        .await
    {
        Ok(group_id) => {
            info!(%group_id, "Group created");
            Ok(group_id)
        }
        Err(e) => {
            warn!(error = %e, "Group creation failed");
            Err(e)
        }
    }
}
