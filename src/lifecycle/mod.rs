//! # Sandbox Org
//!
//! Actors don't exist in a vacuum. This module starts them, wires them together and exposes them to
//! the replication engine:
//!
//! - [`SandboxOrg`] owns the four actors and their clients
//! - [`OrgReader`] resolves [`SourceRef`](crate::remote::SourceRef)s into source lines
//! - [`OrgWriter`] creates lines and groups from engine payloads
//! - [`DryRunRecorder`] stands in for the writer when nothing should be written
//! - [`Fixture`] seeds the org from JSON, [`plan_jobs`] turns a config into jobs
//!
//! Shutdown order matters: drop every reader and writer, then call [`SandboxOrg::shutdown`].

pub mod dry_run;
pub mod fixture;
pub mod org;
pub mod plan;
pub mod reader;
pub mod writer;

pub use dry_run::DryRunRecorder;
pub use fixture::{Fixture, SeedError, SeedIndex};
pub use org::{ClearReport, SandboxOrg};
pub use plan::{plan_jobs, Plan, PlanError};
pub use reader::OrgReader;
pub use writer::OrgWriter;
