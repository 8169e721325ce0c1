use crate::remote::{RecordApi, RecordKind, RemoteWriteError};
use crate::replication::FieldMap;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tracing::info;

/// A [`RecordApi`] that accepts everything and writes nothing.
///
/// Every payload is logged and kept; ids are synthetic (`dry-run-7`) so group linkage still shows
/// up in the recorded line payloads.
#[derive(Debug, Default)]
pub struct DryRunRecorder {
    next_id: AtomicU32,
    recorded: Mutex<Vec<(RecordKind, FieldMap)>>,
}

impl DryRunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received so far, in call order.
    pub fn recorded(&self) -> Vec<(RecordKind, FieldMap)> {
        self.recorded
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordApi for DryRunRecorder {
    async fn create_record(
        &self,
        kind: RecordKind,
        payload: &FieldMap,
    ) -> Result<String, RemoteWriteError> {
        let id = format!("dry-run-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        info!(
            %kind,
            %id,
            payload = %serde_json::Value::Object(payload.clone()),
            "Dry run: record not created"
        );
        self.recorded
            .lock()
            .map_err(|_| RemoteWriteError::transport("dry-run recorder poisoned"))?
            .push((kind, payload.clone()));
        Ok(id)
    }
}
