//! # Replication Engine
//!
//! Copies quote lines from source quotes onto a target quote.
//!
//! - [`projector`] - allow-list projection with large-text truncation
//! - [`quantity`] - quantity scaling with fallbacks, and the [`Multiplier`] type
//! - [`replicator`] - one creation call per source line, failures isolated per line
//! - [`group`] - optional quote line group per job
//! - [`batch`] - sequential job runner with cancellation and progress events
//!
//! The engine never talks to an org directly; it goes through [`RecordApi`](crate::remote::RecordApi)
//! and [`SourceResolver`](crate::remote::SourceResolver).

pub mod batch;
pub mod copy_spec;
pub mod error;
pub mod group;
pub mod outcome;
pub mod projector;
pub mod quantity;
pub mod record;
pub mod replicator;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{
    BatchCoordinator, CancelFlag, ProgressEvent, ProgressObserver, ReplicationContext,
    ReplicationJob,
};
pub use copy_spec::{CopySpec, LinkageFields};
pub use error::ValidationError;
pub use group::{allocate_group, GroupRequest};
pub use outcome::{
    BatchReport, CreatedLine, JobReport, JobStatus, LineError, LineFailure, LineWarning,
    Provenance, ReplicationOutcome,
};
pub use projector::{project, Projection, Truncation};
pub use quantity::{scale, Multiplier, QuantityFallback, RawMultiplier, ScaledQuantity};
pub use record::{FieldMap, NewLineRecord, ReplicationTarget, SourceLineRecord};
pub use replicator::LineReplicator;
