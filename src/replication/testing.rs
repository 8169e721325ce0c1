//! In-process fakes for the org collaborators.

use super::copy_spec::CopySpec;
use super::record::FieldMap;
use crate::remote::{
    RecordApi, RecordKind, RemoteWriteError, ResolutionError, ResolvedSource, SourceRef,
    SourceResolver,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Answers creations from a FIFO script and records every payload.
#[derive(Default)]
pub struct ScriptedRecordApi {
    script: Mutex<VecDeque<Result<String, RemoteWriteError>>>,
    calls: Mutex<Vec<(RecordKind, FieldMap)>>,
}

impl ScriptedRecordApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(self, id: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(id.to_string()));
        self
    }

    pub fn fail(self, error: RemoteWriteError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(RecordKind, FieldMap)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordApi for ScriptedRecordApi {
    async fn create_record(
        &self,
        kind: RecordKind,
        payload: &FieldMap,
    ) -> Result<String, RemoteWriteError> {
        self.calls.lock().unwrap().push((kind, payload.clone()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteWriteError::transport("script exhausted")))
    }
}

/// Resolves sources from a fixed table; unknown references resolve to `Ok(None)`.
#[derive(Default)]
pub struct TableResolver {
    table: HashMap<SourceRef, Result<ResolvedSource, ResolutionError>>,
    lookups: Mutex<Vec<SourceRef>>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: SourceRef, resolved: Result<ResolvedSource, ResolutionError>) -> Self {
        self.table.insert(source, resolved);
        self
    }

    pub fn lookups(&self) -> Vec<SourceRef> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceResolver for TableResolver {
    async fn resolve_sources(
        &self,
        source: &SourceRef,
        _spec: &CopySpec,
    ) -> Result<Option<ResolvedSource>, ResolutionError> {
        self.lookups.lock().unwrap().push(source.clone());
        match self.table.get(source) {
            Some(Ok(resolved)) => Ok(Some(resolved.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(None),
        }
    }
}
