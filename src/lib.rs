//! # Quote Merger
//!
//! > **Copy CPQ quote lines from many source quotes into one target quote.**
//!
//! A merge run takes a list of jobs, each naming a source (an opportunity's quote, a quote id, or a
//! quote name), a quantity multiplier and optionally a line group. Every source line is projected
//! onto an allow-list of fields, its quantity scaled, and recreated on the target quote. One bad
//! line never stops the others; one bad job never stops the batch.
//!
//! ## Architecture Notes
//!
//! ### 1. The Engine ([`replication`])
//! Pure per-record logic ([`project`](replication::project), [`scale`](replication::scale)) plus the
//! sequential [`BatchCoordinator`](replication::BatchCoordinator). The engine only knows the
//! [`RecordApi`](remote::RecordApi) and [`SourceResolver`](remote::SourceResolver) traits.
//!
//! ### 2. The Org ([`lifecycle`])
//! An in-memory CPQ org built from resource actors (see the `actor-framework` crate). The
//! [`SandboxOrg`](lifecycle::SandboxOrg) wires them together and hands out a reader and a writer
//! that implement the engine's traits.
//!
//! ### 3. The Interface ([`clients`])
//! Type-safe wrappers around each actor's `ResourceClient`. Server-side validation failures come back
//! as the actor's own error type.
//!
//! ### 4. The Actors ([`opportunity_actor`], [`quote_actor`], [`line_group_actor`], [`quote_line_actor`])
//! Each implements `ActorEntity` for one record type and checks its references on create. The quote
//! line actor also enforces the org's field limits and required fields.
//!
//! ### 5. Configuration ([`config`])
//! One TOML file: copy specification, target quote, jobs.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config demos/merge.toml --fixture demos/org.json
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod line_group_actor;
pub mod model;
pub mod opportunity_actor;
pub mod quote_actor;
pub mod quote_line_actor;
pub mod remote;
pub mod replication;
