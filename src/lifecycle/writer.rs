use crate::clients::{LineGroupClient, QuoteLineClient};
use crate::line_group_actor::LineGroupError;
use crate::model::{GroupId, QuoteId, QuoteLineCreate, QuoteLineGroupCreate};
use crate::quote_line_actor::QuoteLineError;
use crate::remote::{RecordApi, RecordKind, RemoteWriteError};
use crate::replication::{FieldMap, LinkageFields};
use async_trait::async_trait;
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, instrument};

/// The engine's [`RecordApi`] over the sandbox actors.
///
/// Payloads arrive as flat field maps; the linkage fields are lifted out into typed ids, everything
/// else is stored as-is. The org's verdicts come back as [`RemoteWriteError::MalformedRequest`], a
/// dead actor as [`RemoteWriteError::Transport`].
#[derive(Clone)]
pub struct OrgWriter {
    lines: QuoteLineClient,
    groups: LineGroupClient,
    linkage: LinkageFields,
}

impl OrgWriter {
    pub fn new(lines: QuoteLineClient, groups: LineGroupClient, linkage: LinkageFields) -> Self {
        Self {
            lines,
            groups,
            linkage,
        }
    }

    async fn create_line(&self, mut payload: FieldMap) -> Result<String, RemoteWriteError> {
        let quote: QuoteId = take_reference(&mut payload, &self.linkage.quote)?
            .ok_or_else(|| missing(&self.linkage.quote))?;
        let group: Option<GroupId> = take_reference(&mut payload, &self.linkage.group)?;
        let quantity = payload
            .remove(&self.linkage.quantity)
            .filter(|v| !v.is_null());

        let mut params = QuoteLineCreate::on_quote(quote);
        params.group = group;
        params.quantity = quantity;
        params.fields = payload.into_iter().filter(|(_, v)| !v.is_null()).collect();

        let id = self.lines.create_line(params).await.map_err(line_error)?;
        Ok(id.to_string())
    }

    async fn create_group(&self, mut payload: FieldMap) -> Result<String, RemoteWriteError> {
        let quote: QuoteId = take_reference(&mut payload, &self.linkage.quote)?
            .ok_or_else(|| missing(&self.linkage.quote))?;
        let name = take_text(&mut payload, &self.linkage.group_name)?
            .ok_or_else(|| missing(&self.linkage.group_name))?;
        let description = take_text(&mut payload, &self.linkage.group_description)?;

        let id = self
            .groups
            .create_group(QuoteLineGroupCreate {
                quote,
                name,
                description,
            })
            .await
            .map_err(group_error)?;
        Ok(id.to_string())
    }
}

#[async_trait]
impl RecordApi for OrgWriter {
    #[instrument(skip(self, payload), fields(fields = payload.len()))]
    async fn create_record(
        &self,
        kind: RecordKind,
        payload: &FieldMap,
    ) -> Result<String, RemoteWriteError> {
        debug!("Creating record");
        match kind {
            RecordKind::QuoteLine => self.create_line(payload.clone()).await,
            RecordKind::QuoteLineGroup => self.create_group(payload.clone()).await,
        }
    }
}

fn missing(field: &str) -> RemoteWriteError {
    RemoteWriteError::malformed(format!("REQUIRED_FIELD_MISSING: {field}"))
}

fn take_text(payload: &mut FieldMap, field: &str) -> Result<Option<String>, RemoteWriteError> {
    match payload.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(RemoteWriteError::malformed(format!(
            "INVALID_TYPE_ON_FIELD_IN_RECORD: {field} = {other}"
        ))),
    }
}

fn take_reference<I: FromStr>(
    payload: &mut FieldMap,
    field: &str,
) -> Result<Option<I>, RemoteWriteError> {
    let Some(text) = take_text(payload, field)? else {
        return Ok(None);
    };
    text.parse().map(Some).map_err(|_| {
        RemoteWriteError::malformed(format!("INVALID_CROSS_REFERENCE_KEY: {field} = {text}"))
    })
}

fn line_error(e: QuoteLineError) -> RemoteWriteError {
    if e.is_rejection() {
        RemoteWriteError::malformed(e.to_string())
    } else {
        RemoteWriteError::transport(e.to_string())
    }
}

fn group_error(e: LineGroupError) -> RemoteWriteError {
    match e {
        LineGroupError::ActorCommunicationError(_) => RemoteWriteError::transport(e.to_string()),
        other => RemoteWriteError::malformed(other.to_string()),
    }
}
